use crate::core::types::Rect;

/// Interval substituted on an axis whose union came out inverted.
pub const FALLBACK_AXIS_RANGE: (f64, f64) = (-1.0, 1.0);

/// Coordinate-wise union of trace bounds.
///
/// Each axis is repaired independently: when the union has `min > max`
/// (no traces, or only traces without finite points) that axis becomes
/// [`FALLBACK_AXIS_RANGE`]. Degenerate but ordered extents (`min == max`) are
/// returned untouched so autorange can expand them.
#[must_use]
pub fn aggregate_bounds<I>(bounds: I) -> Rect
where
    I: IntoIterator<Item = Rect>,
{
    let mut union = Rect::empty_bounds();
    for rect in bounds {
        union.min_x = union.min_x.min(rect.min_x);
        union.min_y = union.min_y.min(rect.min_y);
        union.max_x = union.max_x.max(rect.max_x);
        union.max_y = union.max_y.max(rect.max_y);
    }

    for axis in 0..2 {
        let (min, max) = union.axis_extent(axis);
        if min > max || min.is_nan() || max.is_nan() {
            union.set_axis_extent(axis, FALLBACK_AXIS_RANGE.0, FALLBACK_AXIS_RANGE.1);
        }
    }

    union
}

/// Bounds of a point list, skipping non-finite samples.
#[must_use]
pub fn point_bounds<I>(points: I) -> Rect
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut bounds = Rect::empty_bounds();
    for (x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        bounds.min_x = bounds.min_x.min(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_x = bounds.max_x.max(x);
        bounds.max_y = bounds.max_y.max(y);
    }
    bounds
}
