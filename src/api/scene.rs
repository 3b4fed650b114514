use std::sync::Arc;

use crate::core::{CanvasSize, Rect};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CameraController, PointerCamera};
use crate::render::{RenderSurface, SelectBoxOverlay, SpikeOverlay, SurfaceConfig};

use super::{
    AutorangeService, FrameDriver, FrameDriverState, FrameScheduler, HoverSink, HoverTarget,
    LinearTickService, ManualFrameScheduler, NullHoverSink, PaddedAutorange, PickResolver,
    SceneLayout, SceneOptions, TickCache, TickService, TraceFactoryRegistry, TraceRegistry,
};

/// Collaborators a scene is wired to at construction.
///
/// `headless()` gives a scene that runs without a host: a pointer camera with
/// no input, a manual frame scheduler, linear ticks and padded autorange.
pub struct SceneCollaborators {
    pub camera: Box<dyn CameraController>,
    pub hover: Box<dyn HoverSink>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub autorange: Arc<dyn AutorangeService>,
    pub ticks: Arc<dyn TickService>,
    pub factories: TraceFactoryRegistry,
}

impl SceneCollaborators {
    #[must_use]
    pub fn headless() -> Self {
        Self {
            camera: Box::new(PointerCamera::new()),
            hover: Box::new(NullHoverSink),
            scheduler: Box::new(ManualFrameScheduler::new()),
            autorange: Arc::new(PaddedAutorange),
            ticks: Arc::new(LinearTickService),
            factories: TraceFactoryRegistry::with_defaults(),
        }
    }

    #[must_use]
    pub fn with_camera(mut self, camera: impl CameraController + 'static) -> Self {
        self.camera = Box::new(camera);
        self
    }

    #[must_use]
    pub fn with_hover(mut self, hover: impl HoverSink + 'static) -> Self {
        self.hover = Box::new(hover);
        self
    }

    #[must_use]
    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    #[must_use]
    pub fn with_autorange(mut self, autorange: Arc<dyn AutorangeService>) -> Self {
        self.autorange = autorange;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Arc<dyn TickService>) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_factories(mut self, factories: TraceFactoryRegistry) -> Self {
        self.factories = factories;
        self
    }
}

impl Default for SceneCollaborators {
    fn default() -> Self {
        Self::headless()
    }
}

/// One 2D plotting area bound to a rendering surface.
///
/// The scene owns its surface, its traces and the overlays, and keeps them
/// in sync with the latest layout. All mutation goes through `&mut self`.
pub struct Scene<S: RenderSurface> {
    pub(super) hover_target: HoverTarget,
    pub(super) pixel_ratio: f64,
    pub(super) canvas: CanvasSize,
    pub(super) layout: SceneLayout,
    pub(super) options: SceneOptions,
    pub(super) surface: S,
    pub(super) config: SurfaceConfig,
    pub(super) camera: Box<dyn CameraController>,
    pub(super) traces: TraceRegistry,
    pub(super) factories: TraceFactoryRegistry,
    pub(super) select_box: SelectBoxOverlay,
    pub(super) spikes: SpikeOverlay,
    pub(super) bounds: Rect,
    pub(super) picker: PickResolver,
    pub(super) ticks: TickCache,
    pub(super) driver: FrameDriver,
    pub(super) autorange: Arc<dyn AutorangeService>,
    pub(super) tick_service: Arc<dyn TickService>,
    pub(super) hover: Box<dyn HoverSink>,
}

impl<S: RenderSurface> Scene<S> {
    pub(super) fn ensure_active(&self) -> ChartResult<()> {
        if self.driver.state() == FrameDriverState::Disposed {
            return Err(ChartError::SceneDisposed);
        }
        Ok(())
    }

    /// Releases traces and the surface and stops the frame loop.
    ///
    /// A visible hover is hidden first. Safe to call more than once; later
    /// calls do nothing.
    pub fn destroy(&mut self) {
        if self.driver.state() == FrameDriverState::Disposed {
            return;
        }
        if self.picker.is_hovering() {
            self.hover.hide_hover(self.hover_target);
        }
        self.traces.dispose(&mut self.surface);
        self.surface.dispose();
        self.driver.dispose();
        self.picker.clear();
        tracing::debug!(target_id = self.hover_target.raw(), "scene destroyed");
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.driver.state() == FrameDriverState::Disposed
    }
}
