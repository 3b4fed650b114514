pub mod axis;
pub mod bounds;
pub mod coordinate_transform;
pub mod types;

pub use axis::{AxisState, AxisTicks, DEFAULT_AXIS_PAD_PX, PaddedBound, PaddedBounds, Tick, TickSet};
pub use bounds::{FALLBACK_AXIS_RANGE, aggregate_bounds, point_bounds};
pub use coordinate_transform::{
    VIEW_BOX_INSET, canvas_pixel_size, data_to_device, data_to_screen, device_to_data,
    device_to_pick_space, pointer_to_device, screen_box_for, screen_to_data, view_box_for,
};
pub use types::{CanvasSize, DataPoint, DevicePoint, Rect, ScreenPoint};
