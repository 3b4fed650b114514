use serde::{Deserialize, Serialize};

use crate::core::{AxisState, Rect};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DragMode;
use crate::render::Color;

fn default_show_grid() -> bool {
    true
}

fn default_background() -> Color {
    Color::WHITE
}

/// Layout snapshot handed to the scene on construction and every `plot`.
///
/// The scene is the single owner once handed over: camera range updates,
/// autorange and tick computation all mutate this copy in the order
/// bounds → autorange → ticks → data box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default, rename = "dragmode")]
    pub drag_mode: DragMode,
    #[serde(default, rename = "xaxis")]
    pub x_axis: AxisState,
    #[serde(default, rename = "yaxis")]
    pub y_axis: AxisState,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
}

impl SceneLayout {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drag_mode: DragMode::default(),
            x_axis: AxisState::default(),
            y_axis: AxisState::default(),
            background: default_background(),
            show_grid: default_show_grid(),
        }
    }

    #[must_use]
    pub fn with_drag_mode(mut self, drag_mode: DragMode) -> Self {
        self.drag_mode = drag_mode;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: AxisState, y_axis: AxisState) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        self.background.validate()
    }

    #[must_use]
    pub fn axis(&self, axis: usize) -> &AxisState {
        if axis == 0 { &self.x_axis } else { &self.y_axis }
    }

    pub fn axis_mut(&mut self, axis: usize) -> &mut AxisState {
        if axis == 0 {
            &mut self.x_axis
        } else {
            &mut self.y_axis
        }
    }

    /// Current axis ranges as `[x0, y0, x1, y1]`.
    #[must_use]
    pub fn data_box(&self) -> Rect {
        Rect::new(
            self.x_axis.range[0],
            self.y_axis.range[0],
            self.x_axis.range[1],
            self.y_axis.range[1],
        )
    }

    /// Writes a camera-produced data box back into the axis ranges.
    pub fn apply_data_box(&mut self, data_box: Rect) {
        self.x_axis.range = [data_box.min_x, data_box.max_x];
        self.y_axis.range = [data_box.min_y, data_box.max_y];
    }
}
