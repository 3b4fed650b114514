use serde::{Deserialize, Serialize};

use crate::api::SceneLayout;
use crate::core::{AxisTicks, CanvasSize, DataPoint, Rect, screen_box_for, view_box_for};
use crate::error::ChartResult;
use crate::render::{Color, Framebuffer, SelectBoxOverlay, SpikeOverlay};

/// Handle of a pickable object owned by the surface (one per trace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Point list and style a trace hands to the surface for upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceGeometry {
    pub positions: Vec<DataPoint>,
    pub color: Color,
    pub line_width: f64,
    pub marker_size: f64,
    pub draw_lines: bool,
    pub draw_markers: bool,
}

/// Nearest pickable object under a queried position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceHit {
    pub object: ObjectId,
    pub point_index: usize,
    pub data_coord: DataPoint,
}

/// Full configuration pushed into the surface on `update`.
///
/// Boxes are in CSS pixels except `data_box`; the surface scales by
/// `pixel_ratio` internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub data_box: Rect,
    pub view_box: Rect,
    pub screen_box: Rect,
    pub ticks: AxisTicks,
    pub pixel_ratio: f64,
    pub background: Color,
    pub show_grid: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl SurfaceConfig {
    #[must_use]
    pub fn new(pixel_ratio: f64) -> Self {
        Self {
            data_box: Rect::new(-1.0, -1.0, 1.0, 1.0),
            view_box: Rect::new(0.0, 0.0, 0.0, 0.0),
            screen_box: Rect::new(0.0, 0.0, 0.0, 0.0),
            ticks: AxisTicks::default(),
            pixel_ratio,
            background: Color::WHITE,
            show_grid: true,
            x_title: None,
            y_title: None,
        }
    }

    /// Copies presentation attributes from the layout and recomputes the boxes.
    pub fn merge(&mut self, layout: &SceneLayout) {
        self.background = layout.background;
        self.show_grid = layout.show_grid;
        self.x_title = layout.x_axis.title.clone();
        self.y_title = layout.y_axis.title.clone();
        self.screen_box = screen_box_for(layout.width, layout.height);
        self.view_box = view_box_for(layout.width, layout.height);
    }
}

/// GPU rendering surface the scene drives.
///
/// Implementations own the rasterizer. Pick coordinates are in pick space:
/// framebuffer pixels divided by the pixel ratio, origin bottom-left.
pub trait RenderSurface {
    fn update(&mut self, config: &SurfaceConfig) -> ChartResult<()>;
    fn draw(&mut self) -> ChartResult<()>;
    /// Forces the next `draw` to repaint even when nothing was uploaded.
    fn set_dirty(&mut self);
    fn set_data_box(&mut self, data_box: Rect);
    fn pick(&mut self, x: f64, y: f64) -> ChartResult<Option<SurfaceHit>>;
    /// Resizes the canvas backing store.
    fn resize(&mut self, canvas: CanvasSize) -> ChartResult<()>;

    fn allocate_object(&mut self, geometry: &TraceGeometry) -> ChartResult<ObjectId>;
    fn update_object(&mut self, object: ObjectId, geometry: &TraceGeometry) -> ChartResult<()>;
    fn release_object(&mut self, object: ObjectId);

    fn update_spikes(&mut self, spikes: &SpikeOverlay);
    fn update_select_box(&mut self, select_box: &SelectBoxOverlay);

    /// Reads the default framebuffer, rows bottom-to-top.
    fn read_pixels(&mut self) -> ChartResult<Framebuffer>;
    fn dispose(&mut self);

    fn pixel_ratio(&self) -> f64;
    /// Current view box in framebuffer pixels.
    fn view_box(&self) -> Rect;
    fn data_box(&self) -> Rect;
}
