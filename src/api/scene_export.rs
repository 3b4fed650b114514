use tracing::debug;

use crate::error::ChartResult;
use crate::render::{ImageFormat, RenderSurface, encode_data_url};

use super::Scene;

impl<S: RenderSurface> Scene<S> {
    /// Renders the current frame and returns it as a base64 data URL.
    ///
    /// `format` is `"png"`, `"jpeg"` or `"webp"`; anything else encodes PNG.
    pub fn to_image(&mut self, format: &str) -> ChartResult<String> {
        self.ensure_active()?;
        let format = ImageFormat::parse(format);

        self.surface.set_dirty();
        self.surface.draw()?;
        let mut framebuffer = self.surface.read_pixels()?;
        // Surfaces read bottom-up.
        framebuffer.flip_vertical();

        let url = encode_data_url(&framebuffer, format)?;
        debug!(
            mime = format.mime_type(),
            width = framebuffer.width,
            height = framebuffer.height,
            bytes = url.len(),
            "image exported"
        );
        Ok(url)
    }
}
