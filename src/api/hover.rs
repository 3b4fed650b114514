use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::PickSelection;

static NEXT_HOVER_TARGET: AtomicU64 = AtomicU64::new(1);

/// Identifies the overlay container a scene's tooltips are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoverTarget(u64);

impl HoverTarget {
    /// Fresh target, unique within the process.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_HOVER_TARGET.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Tooltip payload forwarded to the hover sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverLabel {
    /// CSS-pixel anchor on the canvas.
    pub x: f64,
    pub y: f64,
    pub x_label: String,
    pub y_label: String,
    pub text: String,
    pub name: Option<String>,
    /// CSS color string.
    pub color: String,
}

impl HoverLabel {
    /// Builds the label from a selection whose screen coordinate is resolved.
    #[must_use]
    pub fn from_selection(selection: &PickSelection) -> Option<Self> {
        let screen = selection.screen_coord?;
        Some(Self {
            x: screen.x,
            y: screen.y,
            x_label: selection.trace_coord[0].to_string(),
            y_label: selection.trace_coord[1].to_string(),
            text: selection.text_label.clone().unwrap_or_default(),
            name: selection.name.clone(),
            color: selection.color.to_css(),
        })
    }
}

/// Tooltip collaborator.
pub trait HoverSink {
    fn show_hover(&mut self, label: &HoverLabel, target: HoverTarget);
    fn hide_hover(&mut self, target: HoverTarget);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHoverSink;

impl HoverSink for NullHoverSink {
    fn show_hover(&mut self, _label: &HoverLabel, _target: HoverTarget) {}

    fn hide_hover(&mut self, _target: HoverTarget) {}
}

#[cfg(test)]
mod tests {
    use super::{HoverLabel, HoverTarget};
    use crate::api::PickSelection;
    use crate::core::{DataPoint, ScreenPoint};
    use crate::render::Color;

    #[test]
    fn label_formats_trace_coordinates_and_defaults_text() {
        let selection = PickSelection {
            trace_uid: "a".to_owned(),
            point_index: 0,
            data_coord: DataPoint::new(1.0, 0.5),
            trace_coord: [1.0, 0.5],
            screen_coord: Some(ScreenPoint::new(10.0, 20.0)),
            text_label: None,
            name: Some("series".to_owned()),
            color: Color::rgb(0.0, 0.0, 1.0),
        };

        let label = HoverLabel::from_selection(&selection).expect("label");
        assert_eq!(label.x_label, "1");
        assert_eq!(label.y_label, "0.5");
        assert_eq!(label.text, "");
        assert_eq!(label.color, "rgba(0, 0, 255, 1)");
    }

    #[test]
    fn targets_are_unique() {
        assert_ne!(HoverTarget::next(), HoverTarget::next());
    }
}
