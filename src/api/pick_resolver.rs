use ordered_float::OrderedFloat;
use tracing::{trace, warn};

use crate::core::{
    DataPoint, ScreenPoint, data_to_screen, device_to_pick_space, pointer_to_device,
};
use crate::error::ChartResult;
use crate::render::RenderSurface;

use super::{HoverLabel, PickSelection, TraceRegistry};

/// Result of one pick pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// No valid data mapping this frame; nothing was queried.
    Skipped,
    /// New hover to forward; `selection.screen_coord` is resolved.
    Hover {
        label: HoverLabel,
        selection: Box<PickSelection>,
    },
    /// Pointer left every object after a hover; forward one unhover.
    Unhover,
    /// Same hover as last time, or nothing under the pointer and nothing shown.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LastPick {
    trace_uid: String,
    data_coord: [OrderedFloat<f64>; 2],
}

impl LastPick {
    fn of(selection: &PickSelection) -> Self {
        Self {
            trace_uid: selection.trace_uid.clone(),
            data_coord: [
                OrderedFloat(selection.data_coord.x),
                OrderedFloat(selection.data_coord.y),
            ],
        }
    }
}

/// Pointer hit-testing with hover deduplication.
#[derive(Debug, Clone, Default)]
pub struct PickResolver {
    last: Option<LastPick>,
}

impl PickResolver {
    /// Whether a hover is currently being shown.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.last.is_some()
    }

    /// Last forwarded `(trace uid, data coordinate)`.
    #[must_use]
    pub fn last_pick(&self) -> Option<(&str, DataPoint)> {
        self.last.as_ref().map(|last| {
            (
                last.trace_uid.as_str(),
                DataPoint::new(last.data_coord[0].0, last.data_coord[1].0),
            )
        })
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Resolves `pointer` (CSS pixels) against the surface and the live traces.
    pub fn resolve(
        &mut self,
        surface: &mut dyn RenderSurface,
        traces: &TraceRegistry,
        pointer: ScreenPoint,
        canvas_height_px: f64,
    ) -> ChartResult<PickOutcome> {
        let data_box = surface.data_box();
        let pixel_ratio = surface.pixel_ratio();
        if data_box.is_degenerate() || !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Ok(PickOutcome::Skipped);
        }

        let device = pointer_to_device(pointer, pixel_ratio, canvas_height_px);
        let pick_point = device_to_pick_space(device, pixel_ratio);
        let Some(hit) = surface.pick(pick_point.x, pick_point.y)? else {
            if self.last.take().is_some() {
                return Ok(PickOutcome::Unhover);
            }
            return Ok(PickOutcome::Unchanged);
        };

        let Some(owner) = traces.find_by_object(hit.object) else {
            warn!(object = hit.object.raw(), "pick hit an object no trace owns");
            return Ok(PickOutcome::Unchanged);
        };
        let Some(mut selection) = owner.handle_pick(&hit) else {
            return Ok(PickOutcome::Unchanged);
        };

        let key = LastPick::of(&selection);
        if self.last.as_ref() == Some(&key) {
            return Ok(PickOutcome::Unchanged);
        }

        let Some(screen) = data_to_screen(
            hit.data_coord,
            data_box,
            surface.view_box(),
            canvas_height_px,
            pixel_ratio,
        ) else {
            return Ok(PickOutcome::Skipped);
        };
        selection.screen_coord = Some(screen);
        let Some(label) = HoverLabel::from_selection(&selection) else {
            return Ok(PickOutcome::Skipped);
        };

        trace!(uid = %selection.trace_uid, point = selection.point_index, "hover target changed");
        self.last = Some(key);
        Ok(PickOutcome::Hover {
            label,
            selection: Box::new(selection),
        })
    }
}
