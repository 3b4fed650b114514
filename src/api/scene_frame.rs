use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::interaction::DragMode;
use crate::render::RenderSurface;

use super::{FrameOutcome, FrameReport, FrameToken, PickOutcome, Scene};

impl<S: RenderSurface> Scene<S> {
    /// Runs one frame for `token`.
    ///
    /// Stale tokens and frames after `destroy` are skipped without touching
    /// the surface. The next frame is scheduled even when this one fails.
    pub fn on_animation_frame(&mut self, token: FrameToken) -> ChartResult<FrameOutcome> {
        if !self.driver.begin_frame(token) {
            return Ok(FrameOutcome::Skipped);
        }

        let result = self.run_frame();
        self.driver.reschedule();
        match result {
            Ok(report) => Ok(FrameOutcome::Rendered(report)),
            Err(err) => {
                warn!(token = token.raw(), error = %err, "frame failed");
                Err(err)
            }
        }
    }

    fn run_frame(&mut self) -> ChartResult<FrameReport> {
        if let Some(range) = self.camera.take_range_update() {
            self.layout.apply_data_box(range);
        }
        let ticks_uploaded = self.camera_changed()?;

        let gesture = match self.layout.drag_mode {
            DragMode::Zoom => self.camera.box_gesture(),
            DragMode::Pan | DragMode::Select => None,
        };

        let pick = match gesture {
            Some(gesture) => {
                self.select_box.show(gesture.normalized());
                self.surface.update_select_box(&self.select_box);
                self.surface.set_dirty();
                trace!(select_box = ?self.select_box.select_box.to_array(), "select box shown");
                None
            }
            None => {
                if self.select_box.enabled {
                    self.select_box.hide();
                    self.surface.update_select_box(&self.select_box);
                    trace!("select box hidden");
                }
                let pointer = self.camera.pointer();
                let outcome = self.picker.resolve(
                    &mut self.surface,
                    &self.traces,
                    pointer,
                    self.canvas.height_px(),
                )?;
                self.apply_pick(&outcome);
                Some(outcome)
            }
        };

        self.surface.draw()?;

        Ok(FrameReport {
            ticks_uploaded,
            select_box_active: self.select_box.enabled,
            pick,
        })
    }

    fn apply_pick(&mut self, outcome: &PickOutcome) {
        match outcome {
            PickOutcome::Hover { label, selection } => {
                self.spikes.set_center(selection.data_coord);
                self.surface.update_spikes(&self.spikes);
                self.hover.show_hover(label, self.hover_target);
                trace!(uid = %selection.trace_uid, "hover shown");
            }
            PickOutcome::Unhover => {
                self.spikes.clear();
                self.surface.update_spikes(&self.spikes);
                self.hover.hide_hover(self.hover_target);
                trace!("hover hidden");
            }
            PickOutcome::Skipped | PickOutcome::Unchanged => {}
        }
    }
}
