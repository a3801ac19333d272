mod null_renderer;
mod scene;

pub use null_renderer::NullRenderer;
pub use scene::{LinePrimitive, Primitive, SceneCanvas, ScenePad};

use crate::error::PlotResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully laid-out `SceneCanvas` so rasterization stays
/// isolated from histogram composition.
pub trait Renderer {
    fn render(&mut self, canvas: &SceneCanvas) -> PlotResult<()>;
}
