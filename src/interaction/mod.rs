use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{Rect, ScreenPoint};

/// Layout drag mode; only `Zoom` shows the selection box overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    #[default]
    Zoom,
    Pan,
    Select,
}

/// In-progress box gesture corners in surface pixel space, in drag order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGesture {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

impl BoxGesture {
    #[must_use]
    pub const fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Self { start, end }
    }

    /// Min/max rectangle regardless of drag direction.
    #[must_use]
    pub fn normalized(self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }
}

/// Camera / input listener collaborator.
///
/// Translates raw pointer and wheel input into the state the frame loop reads.
/// Pan and zoom are reported as a new data box through `take_range_update`,
/// which the scene applies to its layout before recomputing ticks.
pub trait CameraController {
    /// Last pointer position in CSS pixels.
    fn pointer(&self) -> ScreenPoint;
    /// Active box-select gesture, if any.
    fn box_gesture(&self) -> Option<BoxGesture>;
    fn take_range_update(&mut self) -> Option<Rect> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraInput {
    pub pointer: ScreenPoint,
    pub gesture: Option<BoxGesture>,
    pub pending_range: Option<Rect>,
}

/// Camera whose input is fed by the host through a shared handle.
///
/// Clones share state: give one clone to the scene and drive the other from
/// the host's event handlers.
#[derive(Debug, Clone, Default)]
pub struct PointerCamera {
    input: Rc<RefCell<CameraInput>>,
}

impl PointerCamera {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_pointer(&self, x: f64, y: f64) {
        self.input.borrow_mut().pointer = ScreenPoint::new(x, y);
    }

    pub fn begin_box(&self, start: [f64; 2]) {
        self.input.borrow_mut().gesture = Some(BoxGesture::new(start, start));
    }

    pub fn drag_box_to(&self, end: [f64; 2]) {
        if let Some(gesture) = self.input.borrow_mut().gesture.as_mut() {
            gesture.end = end;
        }
    }

    pub fn end_box(&self) {
        self.input.borrow_mut().gesture = None;
    }

    /// Queues a pan/zoom result for the next frame.
    pub fn set_data_box(&self, data_box: Rect) {
        self.input.borrow_mut().pending_range = Some(data_box);
    }

    #[must_use]
    pub fn snapshot(&self) -> CameraInput {
        self.input.borrow().clone()
    }
}

impl CameraController for PointerCamera {
    fn pointer(&self) -> ScreenPoint {
        self.input.borrow().pointer
    }

    fn box_gesture(&self) -> Option<BoxGesture> {
        self.input.borrow().gesture
    }

    fn take_range_update(&mut self) -> Option<Rect> {
        self.input.borrow_mut().pending_range.take()
    }
}
