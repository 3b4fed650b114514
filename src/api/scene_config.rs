use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_AXIS_PAD_PX;
use crate::error::{ChartError, ChartResult};
use crate::render::{ContextAttributes, SelectBoxStyle};

fn default_host_pixel_ratio() -> f64 {
    1.0
}

fn default_axis_pad_px() -> f64 {
    DEFAULT_AXIS_PAD_PX
}

/// Scene bootstrap options.
///
/// Serializable so hosts can persist chart setup next to their layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneOptions {
    /// Explicit pixel ratio; `None` uses `host_pixel_ratio`.
    #[serde(default)]
    pub pixel_ratio: Option<f64>,
    /// Device pixel ratio reported by the host display.
    #[serde(default = "default_host_pixel_ratio")]
    pub host_pixel_ratio: f64,
    #[serde(default)]
    pub context_attributes: ContextAttributes,
    /// Autorange padding applied to both ends of both axes, in CSS pixels.
    #[serde(default = "default_axis_pad_px")]
    pub axis_pad_px: f64,
    #[serde(default)]
    pub select_box: SelectBoxStyle,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: None,
            host_pixel_ratio: default_host_pixel_ratio(),
            context_attributes: ContextAttributes::default(),
            axis_pad_px: default_axis_pad_px(),
            select_box: SelectBoxStyle::default(),
        }
    }
}

impl SceneOptions {
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = Some(pixel_ratio);
        self
    }

    #[must_use]
    pub fn resolved_pixel_ratio(&self) -> f64 {
        self.pixel_ratio.unwrap_or(self.host_pixel_ratio)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let pixel_ratio = self.resolved_pixel_ratio();
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.axis_pad_px.is_finite() || self.axis_pad_px < 0.0 {
            return Err(ChartError::InvalidData(
                "axis padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
