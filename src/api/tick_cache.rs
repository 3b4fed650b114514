use serde::{Deserialize, Serialize};

use crate::core::{AxisState, AxisTicks, TickSet};

use super::TickService;

/// Counters exposed for diagnostics and upload-churn tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickCacheStats {
    pub computed: u64,
    pub uploads: u64,
    pub skipped: u64,
}

/// Runs the tick service for both axes.
#[must_use]
pub fn compute_ticks(service: &dyn TickService, x_axis: &AxisState, y_axis: &AxisState) -> AxisTicks {
    AxisTicks::new(service.calc_ticks(x_axis), service.calc_ticks(y_axis))
}

fn axis_ticks_changed(prev: &TickSet, next: &TickSet) -> bool {
    prev.len() != next.len()
        || prev
            .iter()
            .zip(next)
            .any(|(before, after)| before.position != after.position)
}

/// True when either axis differs in tick count or any tick position.
///
/// Labels are deliberately ignored: only positions move geometry.
#[must_use]
pub fn ticks_changed(prev: &AxisTicks, next: &AxisTicks) -> bool {
    axis_ticks_changed(&prev.x, &next.x) || axis_ticks_changed(&prev.y, &next.y)
}

/// Last tick sets pushed to the surface.
#[derive(Debug, Clone, Default)]
pub struct TickCache {
    current: AxisTicks,
    stats: TickCacheStats,
}

impl TickCache {
    #[must_use]
    pub fn current(&self) -> &AxisTicks {
        &self.current
    }

    #[must_use]
    pub fn stats(&self) -> TickCacheStats {
        self.stats
    }

    /// Stores `next` and returns `true` when it differs from the cached set.
    pub fn refresh(&mut self, next: AxisTicks) -> bool {
        self.stats.computed += 1;
        if !ticks_changed(&self.current, &next) {
            self.stats.skipped += 1;
            return false;
        }
        self.current = next;
        self.stats.uploads += 1;
        true
    }

    /// Unconditional replacement used by full `plot` passes.
    pub fn replace(&mut self, next: AxisTicks) {
        self.stats.computed += 1;
        self.stats.uploads += 1;
        self.current = next;
    }
}
