use serde::{Deserialize, Serialize};

use crate::core::{Margins, PadOptions, Vertices};
use crate::error::PlotResult;
use crate::render::ScenePad;

/// Declared sub-region of a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub vertices: Vertices,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub options: PadOptions,
}

impl Pad {
    #[must_use]
    pub fn new(name: impl Into<String>, vertices: Vertices) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            vertices,
            margins: Margins::default(),
            options: PadOptions::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: PadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.vertices.validate()?;
        self.margins.validate()
    }

    /// Creates the empty drawable region for this pad.
    #[must_use]
    pub fn realize(&self, label: impl Into<String>) -> ScenePad {
        ScenePad {
            name: self.name.clone(),
            title: self.title.clone(),
            label: label.into(),
            vertices: self.vertices,
            margins: self.margins,
            options: self.options,
            primitives: Vec::new(),
        }
    }
}
