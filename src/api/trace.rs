use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Rect, ScreenPoint};
use crate::error::ChartResult;
use crate::render::{Color, ObjectId, RenderSurface, SurfaceHit};

fn default_line_width() -> f64 {
    2.0
}

fn default_marker_size() -> f64 {
    6.0
}

/// Hover text: one label for the whole trace, or one per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextLabels {
    Single(String),
    PerPoint(Vec<String>),
}

impl TextLabels {
    #[must_use]
    pub fn label_for(&self, point_index: usize) -> Option<&str> {
        match self {
            Self::Single(text) => Some(text),
            Self::PerPoint(texts) => texts.get(point_index).map(String::as_str),
        }
    }
}

/// One entry of the plotted data list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDescriptor {
    pub uid: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<TextLabels>,
    /// `"lines"`, `"markers"` or `"lines+markers"`.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default = "default_marker_size")]
    pub marker_size: f64,
}

impl TraceDescriptor {
    #[must_use]
    pub fn new(uid: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            kind: kind.into(),
            x: Vec::new(),
            y: Vec::new(),
            name: None,
            text: None,
            mode: None,
            color: None,
            line_width: default_line_width(),
            marker_size: default_marker_size(),
        }
    }

    #[must_use]
    pub fn with_points(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextLabels) -> Self {
        self.text = Some(text);
        self
    }

    /// Number of usable points; extra samples on the longer array are ignored.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x.len().min(self.y.len())
    }
}

/// Structured result of translating a raw surface hit through its trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickSelection {
    pub trace_uid: String,
    pub point_index: usize,
    pub data_coord: DataPoint,
    /// Coordinate in the trace's own units, used for hover labels.
    pub trace_coord: [f64; 2],
    /// Filled by the pick resolver once the hover is forwarded.
    pub screen_coord: Option<ScreenPoint>,
    pub text_label: Option<String>,
    pub name: Option<String>,
    pub color: Color,
}

/// One renderable series owned by the scene.
///
/// A trace allocates its surface object on creation and must release it
/// exactly once from `dispose`.
pub trait Trace {
    fn uid(&self) -> &str;
    fn kind(&self) -> &str;
    fn object_id(&self) -> ObjectId;
    /// `[xmin, ymin, xmax, ymax]`; [`Rect::empty_bounds`] when no point is finite.
    fn bounds(&self) -> Rect;
    /// Rejects a descriptor `update` would fail on, without touching a surface.
    fn validate(&self, _descriptor: &TraceDescriptor) -> ChartResult<()> {
        Ok(())
    }
    fn update(&mut self, surface: &mut dyn RenderSurface, descriptor: &TraceDescriptor) -> ChartResult<()>;
    fn dispose(&mut self, surface: &mut dyn RenderSurface);
    fn handle_pick(&self, hit: &SurfaceHit) -> Option<PickSelection>;
}
