use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Default autorange padding in CSS pixels applied to both ends of an axis.
pub const DEFAULT_AXIS_PAD_PX: f64 = 10.0;

fn default_autorange() -> bool {
    true
}

fn default_range() -> [f64; 2] {
    [-1.0, 1.0]
}

fn default_tick_spacing_px() -> f64 {
    80.0
}

/// One tick mark: data-space position plus display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Ordered tick sequence for one axis. Replaced wholesale, never edited.
pub type TickSet = Vec<Tick>;

/// Tick sets for both axes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTicks {
    pub x: TickSet,
    pub y: TickSet,
}

impl AxisTicks {
    #[must_use]
    pub fn new(x: TickSet, y: TickSet) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn axis(&self, axis: usize) -> &TickSet {
        if axis == 0 { &self.x } else { &self.y }
    }
}

/// Data value that must stay `pad` CSS pixels inside the axis after autorange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddedBound {
    pub value: f64,
    pub pad: f64,
}

impl PaddedBound {
    #[must_use]
    pub const fn new(value: f64, pad: f64) -> Self {
        Self { value, pad }
    }
}

pub type PaddedBounds = SmallVec<[PaddedBound; 2]>;

/// Per-axis state owned by the scene layout.
///
/// `range`, `autorange`, `title` and `tick_spacing_px` come from the host
/// layout; `length`, `ticks`, `min_pad` and `max_pad` are recomputed by the
/// scene on every plot/camera cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    #[serde(default = "default_range")]
    pub range: [f64; 2],
    #[serde(default = "default_autorange")]
    pub autorange: bool,
    #[serde(default)]
    pub title: Option<String>,
    /// Preferred distance between ticks, consumed by tick services.
    #[serde(default = "default_tick_spacing_px")]
    pub tick_spacing_px: f64,
    #[serde(default)]
    pub length: f64,
    #[serde(skip)]
    pub ticks: TickSet,
    #[serde(skip)]
    pub min_pad: PaddedBounds,
    #[serde(skip)]
    pub max_pad: PaddedBounds,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            range: default_range(),
            autorange: default_autorange(),
            title: None,
            tick_spacing_px: default_tick_spacing_px(),
            length: 0.0,
            ticks: TickSet::new(),
            min_pad: PaddedBounds::new(),
            max_pad: PaddedBounds::new(),
        }
    }
}

impl AxisState {
    /// Axis fixed to `range`; autorange leaves it alone.
    #[must_use]
    pub fn fixed(min: f64, max: f64) -> Self {
        Self {
            range: [min, max],
            autorange: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the padded descriptors with a single `[min, max]` pair.
    pub fn set_padded_extent(&mut self, min: f64, max: f64, pad: f64) {
        self.min_pad.clear();
        self.min_pad.push(PaddedBound::new(min, pad));
        self.max_pad.clear();
        self.max_pad.push(PaddedBound::new(max, pad));
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.range[1] - self.range[0]
    }
}
