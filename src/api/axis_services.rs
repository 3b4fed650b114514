//! Axis autorange and tick generation services.
//!
//! Both are injected into each scene so independent scenes never share axis
//! state. The bundled implementations cover linear axes; hosts with richer
//! axis machinery (dates, log, categories) plug in their own.

use crate::core::{AxisState, Tick, TickSet};

pub(crate) const MIN_TICKS: usize = 2;
pub(crate) const MAX_TICKS: usize = 12;

/// Expands `axis.range` around the padded descriptors when `axis.autorange`
/// is set. Must leave the range untouched otherwise.
pub trait AutorangeService {
    fn auto_range(&self, axis: &mut AxisState);
}

/// Produces the ordered tick sequence for the axis' current range and length.
pub trait TickService {
    fn calc_ticks(&self, axis: &AxisState) -> TickSet;
}

/// Linear autorange keeping every padded bound `pad` pixels inside the axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddedAutorange;

impl AutorangeService for PaddedAutorange {
    fn auto_range(&self, axis: &mut AxisState) {
        if !axis.autorange {
            return;
        }

        let lowest = axis
            .min_pad
            .iter()
            .filter(|bound| bound.value.is_finite())
            .min_by(|a, b| a.value.total_cmp(&b.value))
            .copied();
        let highest = axis
            .max_pad
            .iter()
            .filter(|bound| bound.value.is_finite())
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .copied();
        let (Some(low), Some(high)) = (lowest, highest) else {
            return;
        };

        if low.value >= high.value {
            // A single value gets a unit interval on each side.
            axis.range = [low.value - 1.0, low.value + 1.0];
            return;
        }

        let data_span = high.value - low.value;
        let usable_px = axis.length - low.pad - high.pad;
        if !usable_px.is_finite() || usable_px <= 0.0 {
            axis.range = [low.value, high.value];
            return;
        }

        let units_per_px = data_span / usable_px;
        axis.range = [
            low.value - low.pad * units_per_px,
            high.value + high.pad * units_per_px,
        ];
    }
}

/// Evenly spaced ticks on 1/2/5 multiples of a power of ten.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTickService;

pub(crate) fn target_tick_count(axis_length_px: f64, spacing_px: f64) -> usize {
    if !axis_length_px.is_finite() || axis_length_px <= 0.0 {
        return MIN_TICKS;
    }
    if !spacing_px.is_finite() || spacing_px <= 0.0 {
        return MIN_TICKS;
    }
    let raw = (axis_length_px / spacing_px).floor() as usize + 1;
    raw.clamp(MIN_TICKS, MAX_TICKS)
}

pub(crate) fn nice_step(span: f64, target_count: usize) -> f64 {
    let intervals = target_count.saturating_sub(1).max(1) as f64;
    let raw = span.abs() / intervals;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let multiplier = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    multiplier * magnitude
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    // Avoid "-0" labels for values that round to zero.
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

impl TickService for LinearTickService {
    fn calc_ticks(&self, axis: &AxisState) -> TickSet {
        let (start, end) = (axis.range[0], axis.range[1]);
        if !start.is_finite() || !end.is_finite() || start == end {
            return TickSet::new();
        }

        let count = target_tick_count(axis.length, axis.tick_spacing_px);
        let step = nice_step(end - start, count);
        if !step.is_finite() || step <= 0.0 {
            return TickSet::new();
        }

        let (low, high) = (start.min(end), start.max(end));
        let first = (low / step).ceil() as i64;
        let last = (high / step).floor() as i64;
        let mut ticks: TickSet = (first..=last)
            .map(|index| {
                let position = index as f64 * step;
                Tick::new(position, format_tick(position, step))
            })
            .collect();
        if start > end {
            ticks.reverse();
        }
        ticks
    }
}
