mod image_export;
mod null_surface;
mod overlays;
mod primitives;
mod provider;
mod surface;

pub use image_export::{Framebuffer, ImageFormat, encode_data_url};
pub use null_surface::{NULL_SURFACE_PICK_RADIUS, NullSurface, NullSurfaceProvider};
pub use overlays::{SelectBoxOverlay, SelectBoxStyle, SpikeOverlay};
pub use primitives::Color;
pub use provider::{ContextAttributes, ContextKind, SurfaceProvider, SurfaceRequest};
pub use surface::{ObjectId, RenderSurface, SurfaceConfig, SurfaceHit, TraceGeometry};
