//! scene2d: 2D GPU scene manager for charting surfaces.
//!
//! A [`Scene`] owns one rendering surface and keeps its traces, axes and
//! overlays in sync with host-supplied data and layout. Rasterization, camera
//! input, tooltips and tick generation are collaborators behind traits, so the
//! whole scene runs headless against [`render::NullSurface`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod traces;

pub use api::{Scene, SceneCollaborators, SceneLayout, SceneOptions, TraceDescriptor};
pub use error::{ChartError, ChartResult};
