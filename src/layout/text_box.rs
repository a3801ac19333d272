use serde::{Deserialize, Serialize};

use crate::core::{TextStyle, Vertices};

/// Free-floating annotation block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub vertices: Vertices,
    pub lines: Vec<String>,
    #[serde(default)]
    pub text: TextStyle,
}

impl TextBox {
    #[must_use]
    pub fn new(vertices: Vertices) -> Self {
        Self {
            vertices,
            lines: Vec::new(),
            text: TextStyle::default(),
        }
    }

    #[must_use]
    pub fn with_lines<I, S>(vertices: Vertices, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vertices,
            lines: lines.into_iter().map(Into::into).collect(),
            text: TextStyle::default(),
        }
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
