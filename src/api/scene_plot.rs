use tracing::{debug, trace};

use crate::core::canvas_pixel_size;
use crate::error::ChartResult;
use crate::render::RenderSurface;

use super::{ReconcileReport, Scene, SceneLayout, TraceDescriptor, compute_ticks};

impl<S: RenderSurface> Scene<S> {
    /// Full data and layout pass.
    ///
    /// Reconciles traces against `data`, autoranges both axes around the
    /// aggregated bounds and uploads the merged configuration once.
    pub fn plot(
        &mut self,
        data: &[TraceDescriptor],
        layout: SceneLayout,
    ) -> ChartResult<ReconcileReport> {
        self.ensure_active()?;
        layout.validate()?;
        let mut layout = layout;

        let canvas = canvas_pixel_size(layout.width, layout.height, self.pixel_ratio);
        if canvas != self.canvas {
            self.surface.resize(canvas)?;
            trace!(width = canvas.width, height = canvas.height, "canvas resized");
            self.canvas = canvas;
        }

        let report = match self.traces.reconcile(data, &self.factories, &mut self.surface) {
            Ok(report) => report,
            Err(err) => {
                self.bounds = self.traces.bounds();
                return Err(err);
            }
        };

        self.config.merge(&layout);
        self.bounds = self.traces.bounds();

        let view_box = self.config.view_box;
        let lengths = [view_box.width(), view_box.height()];
        for (axis, length) in lengths.into_iter().enumerate() {
            let (min, max) = self.bounds.axis_extent(axis);
            let state = layout.axis_mut(axis);
            state.set_padded_extent(min, max, self.options.axis_pad_px);
            state.length = length;
            self.autorange.auto_range(state);
        }

        let ticks = compute_ticks(self.tick_service.as_ref(), &layout.x_axis, &layout.y_axis);
        layout.x_axis.ticks = ticks.x.clone();
        layout.y_axis.ticks = ticks.y.clone();
        self.config.ticks = ticks.clone();
        self.ticks.replace(ticks);

        self.config.data_box = layout.data_box();
        self.surface.update(&self.config)?;
        self.layout = layout;

        debug!(
            created = report.created,
            updated = report.updated,
            removed = report.removed,
            skipped = report.skipped,
            bounds = ?self.bounds.to_array(),
            "plot applied"
        );
        Ok(report)
    }

    /// Syncs the surface with the current axis ranges.
    ///
    /// Returns `true` when the recomputed ticks differed and a configuration
    /// update was pushed.
    pub fn camera_changed(&mut self) -> ChartResult<bool> {
        self.ensure_active()?;
        let data_box = self.layout.data_box();
        self.surface.set_data_box(data_box);

        let next = compute_ticks(
            self.tick_service.as_ref(),
            &self.layout.x_axis,
            &self.layout.y_axis,
        );
        if !self.ticks.refresh(next) {
            return Ok(false);
        }

        let ticks = self.ticks.current().clone();
        self.layout.x_axis.ticks = ticks.x.clone();
        self.layout.y_axis.ticks = ticks.y.clone();
        self.config.ticks = ticks;
        self.config.data_box = data_box;
        self.surface.update(&self.config)?;
        trace!(
            x_ticks = self.config.ticks.x.len(),
            y_ticks = self.config.ticks.y.len(),
            "ticks uploaded"
        );
        Ok(true)
    }
}
