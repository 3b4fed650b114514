use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle stored as `[xmin, ymin, xmax, ymax]`.
///
/// Used for data boxes, view boxes, screen boxes and trace bounds alike; the
/// coordinate space is given by the context it is passed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[must_use]
    pub const fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// Identity element for bounds unions: `[+inf, +inf, -inf, -inf]`.
    #[must_use]
    pub const fn empty_bounds() -> Self {
        Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        )
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the rectangle cannot be used as the source of a linear mapping.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let width = self.width();
        let height = self.height();
        !width.is_finite() || !height.is_finite() || width == 0.0 || height == 0.0
    }

    /// Min/max along one axis, `0` for x and `1` for y.
    #[must_use]
    pub fn axis_extent(self, axis: usize) -> (f64, f64) {
        if axis == 0 {
            (self.min_x, self.max_x)
        } else {
            (self.min_y, self.max_y)
        }
    }

    pub fn set_axis_extent(&mut self, axis: usize, min: f64, max: f64) {
        if axis == 0 {
            self.min_x = min;
            self.max_x = max;
        } else {
            self.min_y = min;
            self.max_y = max;
        }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.min_x * factor,
            self.min_y * factor,
            self.max_x * factor,
            self.max_y * factor,
        )
    }

    /// Rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Self {
        Self::new(a[0].min(b[0]), a[1].min(b[1]), a[0].max(b[0]), a[1].max(b[1]))
    }
}

/// Point in chart data space (origin bottom-left, y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Point in CSS pixels relative to the canvas (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point in framebuffer pixels (origin bottom-left, y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas backing-store size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }
}
