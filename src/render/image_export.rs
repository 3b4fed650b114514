use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Encodings supported by image export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Parses a format name; anything unrecognized becomes [`ImageFormat::Png`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "jpeg" => Self::Jpeg,
            "webp" => Self::Webp,
            _ => Self::Png,
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    #[must_use]
    pub fn data_url_prefix(self) -> String {
        format!("data:{};base64,", self.mime_type())
    }

    const fn codec(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Webp => image::ImageFormat::WebP,
        }
    }
}

/// Tightly packed RGBA8 pixels read back from a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Framebuffer {
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut rgba = Vec::with_capacity(count * 4);
        for _ in 0..count {
            rgba.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidViewport {
                width: f64::from(self.width),
                height: f64::from(self.height),
            });
        }
        if self.rgba.len() != self.row_bytes() * self.height as usize {
            return Err(ChartError::InvalidData(format!(
                "framebuffer holds {} bytes, expected {}x{}x4",
                self.rgba.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Swaps rows top-to-bottom in place; converts between bottom-left
    /// (framebuffer) and top-left (image) origins.
    pub fn flip_vertical(&mut self) {
        let row_bytes = self.row_bytes();
        let height = self.height as usize;
        if row_bytes == 0 || self.rgba.len() < row_bytes * height {
            return;
        }
        let (mut top, mut bottom) = (0usize, height.saturating_sub(1));
        while top < bottom {
            let (head, tail) = self.rgba.split_at_mut(bottom * row_bytes);
            head[top * row_bytes..(top + 1) * row_bytes].swap_with_slice(&mut tail[..row_bytes]);
            top += 1;
            bottom -= 1;
        }
    }

    /// RGBA value at `(x, y)` counted from the first stored row.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.row_bytes() + x as usize * 4;
        let bytes = self.rgba.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Encodes top-left-origin pixels and wraps them in a base64 data URL.
pub fn encode_data_url(framebuffer: &Framebuffer, format: ImageFormat) -> ChartResult<String> {
    framebuffer.validate()?;
    let rgba = RgbaImage::from_raw(framebuffer.width, framebuffer.height, framebuffer.rgba.clone())
        .ok_or_else(|| {
            ChartError::ImageEncode("framebuffer does not match its dimensions".to_owned())
        })?;

    // JPEG has no alpha channel.
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        ImageFormat::Png | ImageFormat::Webp => DynamicImage::ImageRgba8(rgba),
    };

    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, format.codec())
        .map_err(|e| ChartError::ImageEncode(format!("{}: {e}", format.mime_type())))?;

    let mut url = format.data_url_prefix();
    STANDARD.encode_string(encoded.get_ref(), &mut url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::{Framebuffer, ImageFormat, encode_data_url};

    #[test]
    fn unknown_format_falls_back_to_png() {
        assert_eq!(ImageFormat::parse("bmp"), ImageFormat::Png);
        assert_eq!(ImageFormat::parse(""), ImageFormat::Png);
        assert_eq!(ImageFormat::parse("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::parse("webp"), ImageFormat::Webp);
    }

    #[test]
    fn flip_swaps_first_and_last_rows() {
        let mut framebuffer = Framebuffer::filled(2, 3, [0, 0, 0, 255]);
        framebuffer.rgba[0] = 10;
        framebuffer.rgba[2 * 8] = 30;

        framebuffer.flip_vertical();

        assert_eq!(framebuffer.pixel(0, 0), Some([30, 0, 0, 255]));
        assert_eq!(framebuffer.pixel(0, 2), Some([10, 0, 0, 255]));
        assert_eq!(framebuffer.pixel(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn every_format_encodes_with_matching_prefix() {
        let framebuffer = Framebuffer::filled(4, 4, [200, 10, 10, 255]);
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Webp] {
            let url = encode_data_url(&framebuffer, format).expect("encode");
            assert!(url.starts_with(&format.data_url_prefix()), "{url}");
            assert!(url.len() > format.data_url_prefix().len());
        }
    }

    #[test]
    fn truncated_framebuffer_is_rejected() {
        let mut framebuffer = Framebuffer::filled(2, 2, [0, 0, 0, 0]);
        framebuffer.rgba.pop();
        assert!(encode_data_url(&framebuffer, ImageFormat::Png).is_err());
    }
}
