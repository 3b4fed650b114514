//! Conversions between data space, device pixels, pick space and CSS pixels.
//!
//! Data space and device pixels share a bottom-left origin; CSS pixels follow
//! the canvas convention (top-left origin, y down). Every function here is
//! pure. Mappings out of a zero-size data box are reported as `None`.

use crate::core::types::{CanvasSize, DataPoint, DevicePoint, Rect, ScreenPoint};

/// Fraction of the layout size reserved on each side for axis labels.
pub const VIEW_BOX_INSET: f64 = 0.125;

/// Full canvas rectangle in CSS pixels.
#[must_use]
pub fn screen_box_for(width: f64, height: f64) -> Rect {
    Rect::new(0.0, 0.0, width, height)
}

/// Inset rectangle in CSS pixels where plotted geometry lives.
#[must_use]
pub fn view_box_for(width: f64, height: f64) -> Rect {
    Rect::new(
        VIEW_BOX_INSET * width,
        VIEW_BOX_INSET * height,
        (1.0 - VIEW_BOX_INSET) * width,
        (1.0 - VIEW_BOX_INSET) * height,
    )
}

/// Backing-store size for a layout of `width`x`height` CSS pixels.
#[must_use]
pub fn canvas_pixel_size(width: f64, height: f64, pixel_ratio: f64) -> CanvasSize {
    CanvasSize::new(device_extent(width, pixel_ratio), device_extent(height, pixel_ratio))
}

fn device_extent(css: f64, pixel_ratio: f64) -> u32 {
    let scaled = (pixel_ratio * css).ceil();
    if scaled.is_finite() && scaled > 0.0 {
        scaled.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// CSS pointer position to framebuffer pixels, flipping y.
#[must_use]
pub fn pointer_to_device(pointer: ScreenPoint, pixel_ratio: f64, canvas_height_px: f64) -> DevicePoint {
    DevicePoint::new(
        pointer.x * pixel_ratio,
        canvas_height_px - pixel_ratio * pointer.y,
    )
}

/// Framebuffer pixels to the ratio-normalized space the surface picks in.
#[must_use]
pub fn device_to_pick_space(device: DevicePoint, pixel_ratio: f64) -> DevicePoint {
    DevicePoint::new(device.x / pixel_ratio, device.y / pixel_ratio)
}

/// Data coordinate to framebuffer pixels through `device_view_box`.
#[must_use]
pub fn data_to_device(data: DataPoint, data_box: Rect, device_view_box: Rect) -> Option<DevicePoint> {
    if data_box.is_degenerate() {
        return None;
    }
    let x = device_view_box.width() * (data.x - data_box.min_x) / data_box.width()
        + device_view_box.min_x;
    let y = device_view_box.height() * (data.y - data_box.min_y) / data_box.height()
        + device_view_box.min_y;
    Some(DevicePoint::new(x, y))
}

/// Framebuffer pixels back to data space.
#[must_use]
pub fn device_to_data(device: DevicePoint, data_box: Rect, device_view_box: Rect) -> Option<DataPoint> {
    if data_box.is_degenerate() || device_view_box.is_degenerate() {
        return None;
    }
    let x = (device.x - device_view_box.min_x) / device_view_box.width() * data_box.width()
        + data_box.min_x;
    let y = (device.y - device_view_box.min_y) / device_view_box.height() * data_box.height()
        + data_box.min_y;
    Some(DataPoint::new(x, y))
}

/// Data coordinate to a CSS pixel position on the canvas.
///
/// `device_view_box` is the surface view box in framebuffer pixels and
/// `canvas_height_px` the backing-store height.
#[must_use]
pub fn data_to_screen(
    data: DataPoint,
    data_box: Rect,
    device_view_box: Rect,
    canvas_height_px: f64,
    pixel_ratio: f64,
) -> Option<ScreenPoint> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return None;
    }
    let device = data_to_device(data, data_box, device_view_box)?;
    Some(ScreenPoint::new(
        device.x / pixel_ratio,
        (canvas_height_px - device.y) / pixel_ratio,
    ))
}

/// CSS pixel position back to data space.
#[must_use]
pub fn screen_to_data(
    screen: ScreenPoint,
    data_box: Rect,
    device_view_box: Rect,
    canvas_height_px: f64,
    pixel_ratio: f64,
) -> Option<DataPoint> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return None;
    }
    let device = pointer_to_device(screen, pixel_ratio, canvas_height_px);
    device_to_data(device, data_box, device_view_box)
}
