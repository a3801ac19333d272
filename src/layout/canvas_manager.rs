use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Axis, Histogram};
use crate::error::{PlotError, PlotResult};
use crate::io::DataFile;
use crate::layout::Canvas;
use crate::render::{Renderer, SceneCanvas, ScenePad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    Unconfigured,
    Built,
    Drawn,
    Closed,
}

impl CanvasState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfigured => "Unconfigured",
            Self::Built => "Built",
            Self::Drawn => "Drawn",
            Self::Closed => "Closed",
        }
    }
}

/// Owns one realized canvas from `make_plot` until `close`.
#[derive(Debug)]
pub struct CanvasManager {
    definition: Option<Canvas>,
    scene: Option<SceneCanvas>,
    label_index: IndexMap<String, usize>,
    state: CanvasState,
}

impl Default for CanvasManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: None,
            scene: None,
            label_index: IndexMap::new(),
            state: CanvasState::Unconfigured,
        }
    }

    #[must_use]
    pub fn with_definition(canvas: Canvas) -> Self {
        let mut manager = Self::new();
        manager.definition = Some(canvas);
        manager
    }

    #[must_use]
    pub fn state(&self) -> CanvasState {
        self.state
    }

    #[must_use]
    pub fn definition(&self) -> Option<&Canvas> {
        self.definition.as_ref()
    }

    /// Replaces the definition and drops any realized canvas.
    pub fn set_definition(&mut self, canvas: Canvas) -> PlotResult<()> {
        self.ensure_not_closed("set_definition")?;
        self.definition = Some(canvas);
        self.scene = None;
        self.label_index.clear();
        self.state = CanvasState::Unconfigured;
        Ok(())
    }

    /// Realizes the canvas and its pads.
    pub fn make_plot(&mut self) -> PlotResult<()> {
        if self.state != CanvasState::Unconfigured {
            return Err(self.invalid("make_plot"));
        }
        let definition = self.definition.as_ref().ok_or(PlotError::InvalidState {
            operation: "make_plot without definition",
            state: CanvasState::Unconfigured.as_str(),
        })?;
        let scene = definition.realize()?;
        self.label_index = scene
            .pads
            .iter()
            .enumerate()
            .map(|(index, pad)| (pad.label.clone(), index))
            .collect();
        debug!(canvas = %scene.name, pads = scene.pads.len(), "canvas built");
        self.scene = Some(scene);
        self.state = CanvasState::Built;
        Ok(())
    }

    #[must_use]
    pub fn pad_index(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    pub fn pad(&mut self, label: &str) -> PlotResult<&mut ScenePad> {
        let index = self
            .pad_index(label)
            .ok_or_else(|| PlotError::InvalidLayout(format!("no pad labelled `{label}`")))?;
        self.pad_at(index)
    }

    pub fn pad_at(&mut self, index: usize) -> PlotResult<&mut ScenePad> {
        let scene = self.scene_mut("pad")?;
        let len = scene.pads.len();
        scene
            .pads
            .get_mut(index)
            .ok_or(PlotError::OutOfRangeIndex {
                field: "pad",
                index,
                len,
            })
    }

    /// Index of the pad playing `role`.
    ///
    /// Without a role, or on a canvas realized without pads, everything goes
    /// to the first region.
    pub fn resolve_role(&self, role: Option<&str>) -> PlotResult<usize> {
        let single = self
            .definition
            .as_ref()
            .is_none_or(|canvas| canvas.pad_count() == 0);
        match role {
            _ if single => Ok(0),
            None => Ok(0),
            Some(label) => self
                .pad_index(label)
                .ok_or_else(|| PlotError::InvalidLayout(format!("no pad labelled `{label}`"))),
        }
    }

    /// Forwards to [`Canvas::scale_axis_text`] on the current definition.
    pub fn scale_axis_text(
        &self,
        big: usize,
        small: usize,
        axis: Axis,
        hist: &mut Histogram,
    ) -> PlotResult<f64> {
        self.ensure_not_closed("scale_axis_text")?;
        let definition = self.definition.as_ref().ok_or(PlotError::InvalidState {
            operation: "scale_axis_text without definition",
            state: self.state.as_str(),
        })?;
        definition.scale_axis_text(big, small, axis, hist)
    }

    /// Hands the scene to `renderer`; repeated calls keep the Drawn state.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> PlotResult<()> {
        match self.state {
            CanvasState::Built | CanvasState::Drawn => {}
            _ => return Err(self.invalid("draw")),
        }
        if self.state == CanvasState::Drawn {
            return Ok(());
        }
        let scene = self.scene.as_ref().ok_or_else(|| self.invalid("draw"))?;
        renderer.render(scene)?;
        self.state = CanvasState::Drawn;
        Ok(())
    }

    /// Stores a copy of the drawn canvas in `file`.
    pub fn write(&self, file: &mut DataFile) -> PlotResult<()> {
        if self.state != CanvasState::Drawn {
            return Err(self.invalid("write"));
        }
        let scene = self.scene.as_ref().ok_or_else(|| self.invalid("write"))?;
        file.write_canvas(scene.clone())?;
        debug!(canvas = %scene.name, file = %file.path(), "canvas written");
        Ok(())
    }

    #[must_use]
    pub fn scene(&self) -> Option<&SceneCanvas> {
        self.scene.as_ref()
    }

    /// Releases the realized canvas. Terminal.
    pub fn close(&mut self) -> PlotResult<()> {
        self.ensure_not_closed("close")?;
        self.scene = None;
        self.label_index.clear();
        self.state = CanvasState::Closed;
        Ok(())
    }

    fn scene_mut(&mut self, operation: &'static str) -> PlotResult<&mut SceneCanvas> {
        match self.state {
            CanvasState::Built | CanvasState::Drawn => {}
            state => {
                return Err(PlotError::InvalidState {
                    operation,
                    state: state.as_str(),
                });
            }
        }
        let state = self.state.as_str();
        self.scene
            .as_mut()
            .ok_or(PlotError::InvalidState { operation, state })
    }

    fn ensure_not_closed(&self, operation: &'static str) -> PlotResult<()> {
        if self.state == CanvasState::Closed {
            return Err(self.invalid(operation));
        }
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> PlotError {
        PlotError::InvalidState {
            operation,
            state: self.state.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{CanvasManager, CanvasState};
    use crate::io::{DataFile, FileMode, MemoryStorage};
    use crate::layout::Canvas;
    use crate::render::NullRenderer;

    #[test]
    fn lifecycle_follows_build_draw_write_close() {
        let storage = MemoryStorage::new();
        let mut out =
            DataFile::open(Rc::new(storage.clone()), "out.json", FileMode::Recreate).expect("open");
        let mut renderer = NullRenderer::default();
        let mut manager = CanvasManager::with_definition(Canvas::spectra_ratio("cTest", "", 0.3));
        assert_eq!(manager.state(), CanvasState::Unconfigured);

        assert!(manager.write(&mut out).is_err());
        manager.make_plot().expect("build");
        assert_eq!(manager.state(), CanvasState::Built);
        assert_eq!(manager.pad_index("ratio"), Some(1));
        assert!(manager.write(&mut out).is_err());

        manager.draw(&mut renderer).expect("draw");
        manager.draw(&mut renderer).expect("draw is idempotent");
        assert_eq!(renderer.rendered_canvases, 1);
        manager.write(&mut out).expect("write");

        manager.close().expect("close");
        assert_eq!(manager.state(), CanvasState::Closed);
        assert!(manager.make_plot().is_err());
        assert!(manager.pad("spectra").is_err());
        assert!(manager.close().is_err());

        out.close().expect("close file");
        assert!(storage.contents("out.json").expect("file").objects.contains_key("cTest"));
    }

    #[test]
    fn make_plot_requires_definition() {
        let mut manager = CanvasManager::new();
        assert!(manager.make_plot().is_err());
    }

    #[test]
    fn roles_fall_back_to_root_without_pads() {
        let mut manager = CanvasManager::with_definition(Canvas::new(
            "c",
            "",
            crate::core::Dimensions::default(),
        ));
        manager.make_plot().expect("build");
        assert_eq!(manager.resolve_role(Some("ratio")).expect("role"), 0);
    }
}
