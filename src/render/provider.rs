use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::CanvasSize;
use crate::render::RenderSurface;

/// Rendering context flavors requested in order until one is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextKind {
    WebGl,
    ExperimentalWebGl,
}

impl ContextKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebGl => "webgl",
            Self::ExperimentalWebGl => "experimental-webgl",
        }
    }

    /// Acquisition order used by scene construction.
    #[must_use]
    pub fn fallback_chain() -> SmallVec<[Self; 2]> {
        smallvec![Self::WebGl, Self::ExperimentalWebGl]
    }
}

fn default_true() -> bool {
    true
}

/// Context creation attributes forwarded untouched to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAttributes {
    #[serde(default = "default_true")]
    pub alpha: bool,
    #[serde(default = "default_true")]
    pub antialias: bool,
    #[serde(default = "default_true")]
    pub premultiplied_alpha: bool,
    /// Keeps the framebuffer readable after presentation; needed by image export
    /// on some hosts.
    #[serde(default)]
    pub preserve_drawing_buffer: bool,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            premultiplied_alpha: true,
            preserve_drawing_buffer: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRequest {
    pub kind: ContextKind,
    pub canvas: CanvasSize,
    pub pixel_ratio: f64,
    pub attributes: ContextAttributes,
}

/// Rendering-context acquisition.
///
/// Returning `None` means the context kind is not supported; the scene then
/// tries the next kind in [`ContextKind::fallback_chain`].
pub trait SurfaceProvider {
    type Surface: RenderSurface;

    fn acquire(&mut self, request: &SurfaceRequest) -> Option<Self::Surface>;
}
