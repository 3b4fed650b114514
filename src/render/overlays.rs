use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Rect};

fn default_outer_fill() -> bool {
    true
}

/// Fill style of the zoom selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectBoxStyle {
    #[serde(default)]
    pub inner_fill: bool,
    #[serde(default = "default_outer_fill")]
    pub outer_fill: bool,
}

impl Default for SelectBoxStyle {
    fn default() -> Self {
        Self {
            inner_fill: false,
            outer_fill: default_outer_fill(),
        }
    }
}

/// Box-zoom selection overlay state pushed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectBoxOverlay {
    pub enabled: bool,
    /// Normalized `[xmin, ymin, xmax, ymax]` in surface pixel space.
    pub select_box: Rect,
    pub style: SelectBoxStyle,
}

impl SelectBoxOverlay {
    #[must_use]
    pub fn new(style: SelectBoxStyle) -> Self {
        Self {
            enabled: false,
            select_box: Rect::new(0.0, 0.0, 0.0, 0.0),
            style,
        }
    }

    pub fn show(&mut self, select_box: Rect) {
        self.enabled = true;
        self.select_box = select_box;
    }

    pub fn hide(&mut self) {
        self.enabled = false;
    }
}

/// Axis spike (crosshair) overlay; `None` hides the spikes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpikeOverlay {
    pub center: Option<DataPoint>,
}

impl SpikeOverlay {
    pub fn set_center(&mut self, center: DataPoint) {
        self.center = Some(center);
    }

    pub fn clear(&mut self) {
        self.center = None;
    }
}
