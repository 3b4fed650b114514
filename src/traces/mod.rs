//! Built-in trace kinds.

mod line_with_markers;

pub use line_with_markers::{LineWithMarkersFactory, LineWithMarkersTrace, SCATTERGL_KIND};
