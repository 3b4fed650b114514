use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::{CanvasSize, DevicePoint, Rect, data_to_device};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ContextKind, Framebuffer, ObjectId, RenderSurface, SelectBoxOverlay, SpikeOverlay,
    SurfaceConfig, SurfaceHit, SurfaceProvider, SurfaceRequest, TraceGeometry,
};

/// Pick radius in pick-space pixels used by [`NullSurface::pick`].
pub const NULL_SURFACE_PICK_RADIUS: f64 = 12.0;

/// Headless surface used by tests and hosts without a GPU.
///
/// It rasterizes nothing but keeps every piece of state the scene pushes,
/// counts calls, and resolves picks by nearest uploaded point so hover logic
/// can be exercised end to end.
#[derive(Debug)]
pub struct NullSurface {
    pub kind: ContextKind,
    pub canvas: CanvasSize,
    pub pixel_ratio: f64,
    pub config: Option<SurfaceConfig>,
    pub data_box: Rect,
    pub spikes: SpikeOverlay,
    pub select_box: Option<SelectBoxOverlay>,
    pub update_count: usize,
    pub draw_count: usize,
    pub dirty_count: usize,
    pub resize_count: usize,
    pub pick_count: usize,
    pub disposed: bool,
    /// Objects released so far, in release order.
    pub released: Vec<ObjectId>,
    /// When set, `pick` returns this instead of searching.
    pub pick_override: Option<Option<SurfaceHit>>,
    /// When set, the next `draw` fails with this message.
    pub fail_next_draw: Option<String>,
    objects: IndexMap<ObjectId, TraceGeometry>,
    next_object: u64,
    dirty: bool,
}

impl NullSurface {
    #[must_use]
    pub fn new(kind: ContextKind, canvas: CanvasSize, pixel_ratio: f64) -> Self {
        Self {
            kind,
            canvas,
            pixel_ratio,
            config: None,
            data_box: Rect::new(-1.0, -1.0, 1.0, 1.0),
            spikes: SpikeOverlay::default(),
            select_box: None,
            update_count: 0,
            draw_count: 0,
            dirty_count: 0,
            resize_count: 0,
            pick_count: 0,
            disposed: false,
            released: Vec::new(),
            pick_override: None,
            fail_next_draw: None,
            objects: IndexMap::new(),
            next_object: 1,
            dirty: true,
        }
    }

    #[must_use]
    pub fn object(&self, object: ObjectId) -> Option<&TraceGeometry> {
        self.objects.get(&object)
    }

    #[must_use]
    pub fn live_object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn ensure_live(&self) -> ChartResult<()> {
        if self.disposed {
            return Err(ChartError::Surface("surface used after dispose".to_owned()));
        }
        Ok(())
    }

    fn pick_space_view_box(&self) -> Rect {
        self.config
            .as_ref()
            .map(|config| config.view_box)
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0))
    }
}

impl RenderSurface for NullSurface {
    fn update(&mut self, config: &SurfaceConfig) -> ChartResult<()> {
        self.ensure_live()?;
        self.data_box = config.data_box;
        self.config = Some(config.clone());
        self.update_count += 1;
        self.dirty = true;
        Ok(())
    }

    fn draw(&mut self) -> ChartResult<()> {
        self.ensure_live()?;
        if let Some(message) = self.fail_next_draw.take() {
            return Err(ChartError::Surface(message));
        }
        self.draw_count += 1;
        self.dirty = false;
        Ok(())
    }

    fn set_dirty(&mut self) {
        self.dirty_count += 1;
        self.dirty = true;
    }

    fn set_data_box(&mut self, data_box: Rect) {
        if self.data_box != data_box {
            self.dirty = true;
        }
        self.data_box = data_box;
    }

    fn pick(&mut self, x: f64, y: f64) -> ChartResult<Option<SurfaceHit>> {
        self.ensure_live()?;
        self.pick_count += 1;
        if let Some(forced) = self.pick_override {
            return Ok(forced);
        }

        let view_box = self.pick_space_view_box();
        let mut best: Option<(f64, SurfaceHit)> = None;
        for (object, geometry) in &self.objects {
            for (point_index, point) in geometry.positions.iter().enumerate() {
                if !point.is_finite() {
                    continue;
                }
                let Some(DevicePoint { x: px, y: py }) =
                    data_to_device(*point, self.data_box, view_box)
                else {
                    return Ok(None);
                };
                let distance = (px - x).hypot(py - y);
                if distance > NULL_SURFACE_PICK_RADIUS {
                    continue;
                }
                // Later objects draw on top and win ties.
                if best.map_or(true, |(current, _)| distance <= current) {
                    best = Some((
                        distance,
                        SurfaceHit {
                            object: *object,
                            point_index,
                            data_coord: *point,
                        },
                    ));
                }
            }
        }
        Ok(best.map(|(_, hit)| hit))
    }

    fn resize(&mut self, canvas: CanvasSize) -> ChartResult<()> {
        self.ensure_live()?;
        self.canvas = canvas;
        self.resize_count += 1;
        Ok(())
    }

    fn allocate_object(&mut self, geometry: &TraceGeometry) -> ChartResult<ObjectId> {
        self.ensure_live()?;
        let object = ObjectId::new(self.next_object);
        self.next_object += 1;
        self.objects.insert(object, geometry.clone());
        self.dirty = true;
        Ok(object)
    }

    fn update_object(&mut self, object: ObjectId, geometry: &TraceGeometry) -> ChartResult<()> {
        self.ensure_live()?;
        let Some(slot) = self.objects.get_mut(&object) else {
            return Err(ChartError::Surface(format!(
                "object {} is not allocated",
                object.raw()
            )));
        };
        *slot = geometry.clone();
        self.dirty = true;
        Ok(())
    }

    fn release_object(&mut self, object: ObjectId) {
        if self.objects.shift_remove(&object).is_some() {
            self.released.push(object);
            self.dirty = true;
        }
    }

    fn update_spikes(&mut self, spikes: &SpikeOverlay) {
        self.spikes = *spikes;
    }

    fn update_select_box(&mut self, select_box: &SelectBoxOverlay) {
        self.select_box = Some(*select_box);
    }

    fn read_pixels(&mut self) -> ChartResult<Framebuffer> {
        self.ensure_live()?;
        let background = self
            .config
            .as_ref()
            .map(|config| config.background.to_rgba8())
            .unwrap_or([255, 255, 255, 255]);
        Ok(Framebuffer::filled(
            self.canvas.width,
            self.canvas.height,
            background,
        ))
    }

    fn dispose(&mut self) {
        let objects: Vec<ObjectId> = self.objects.keys().copied().collect();
        for object in objects {
            self.release_object(object);
        }
        self.disposed = true;
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn view_box(&self) -> Rect {
        self.pick_space_view_box().scaled(self.pixel_ratio)
    }

    fn data_box(&self) -> Rect {
        self.data_box
    }
}

/// Provider handing out [`NullSurface`]s for the context kinds it supports.
#[derive(Debug, Clone)]
pub struct NullSurfaceProvider {
    supported: SmallVec<[ContextKind; 2]>,
    /// Every kind requested so far, in order.
    pub requested: Vec<ContextKind>,
}

impl Default for NullSurfaceProvider {
    fn default() -> Self {
        Self {
            supported: ContextKind::fallback_chain(),
            requested: Vec::new(),
        }
    }
}

impl NullSurfaceProvider {
    /// Provider that only grants `kinds`.
    #[must_use]
    pub fn supporting(kinds: &[ContextKind]) -> Self {
        Self {
            supported: kinds.iter().copied().collect(),
            requested: Vec::new(),
        }
    }

    /// Provider that never grants a context.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::supporting(&[])
    }
}

impl SurfaceProvider for NullSurfaceProvider {
    type Surface = NullSurface;

    fn acquire(&mut self, request: &SurfaceRequest) -> Option<NullSurface> {
        self.requested.push(request.kind);
        if !self.supported.contains(&request.kind) {
            return None;
        }
        Some(NullSurface::new(
            request.kind,
            request.canvas,
            request.pixel_ratio,
        ))
    }
}
