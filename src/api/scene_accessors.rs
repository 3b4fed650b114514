use crate::core::{CanvasSize, Rect};
use crate::interaction::DragMode;
use crate::render::{RenderSurface, SelectBoxOverlay, SpikeOverlay, SurfaceConfig};

use super::{
    FrameDriverState, FrameToken, HoverTarget, PickResolver, Scene, SceneLayout, SceneOptions,
    TickCacheStats, TraceRegistry,
};

impl<S: RenderSurface> Scene<S> {
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access for hosts that need backend-specific calls.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[must_use]
    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    /// Switches the interaction mode read by the next frame.
    pub fn set_drag_mode(&mut self, drag_mode: DragMode) {
        self.layout.drag_mode = drag_mode;
    }

    /// Aggregated data bounds from the last `plot`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn traces(&self) -> &TraceRegistry {
        &self.traces
    }

    #[must_use]
    pub fn trace_uids(&self) -> Vec<String> {
        self.traces.uids()
    }

    #[must_use]
    pub fn tick_stats(&self) -> TickCacheStats {
        self.ticks.stats()
    }

    #[must_use]
    pub fn lifecycle(&self) -> FrameDriverState {
        self.driver.state()
    }

    /// Token the host must pass to the next `on_animation_frame`.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.driver.pending()
    }

    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.driver.frames_run()
    }

    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Configuration last pushed with `RenderSurface::update`.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn hover_target(&self) -> HoverTarget {
        self.hover_target
    }

    #[must_use]
    pub fn pick_resolver(&self) -> &PickResolver {
        &self.picker
    }

    #[must_use]
    pub fn select_box(&self) -> &SelectBoxOverlay {
        &self.select_box
    }

    #[must_use]
    pub fn spikes(&self) -> &SpikeOverlay {
        &self.spikes
    }
}
