use crate::error::PlotResult;
use crate::render::{Renderer, SceneCanvas};

/// No-op renderer used by tests and headless figure production.
///
/// It still validates the scene so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub rendered_canvases: usize,
    pub last_pad_count: usize,
    pub last_primitive_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, canvas: &SceneCanvas) -> PlotResult<()> {
        canvas.validate()?;
        self.rendered_canvases += 1;
        self.last_pad_count = canvas.pads.len();
        self.last_primitive_count = canvas.primitive_count();
        Ok(())
    }
}
