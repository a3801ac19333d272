use serde::{Deserialize, Serialize};

use crate::core::{TextStyle, Vertices};

/// One legend row: the drawn object it refers to, its label and the draw
/// option used for the swatch (`"p"`, `"l"`, `"f"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub object: String,
    pub label: String,
    pub option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub vertices: Vertices,
    pub header: String,
    pub entries: Vec<LegendEntry>,
    #[serde(default)]
    pub text: TextStyle,
}

impl Legend {
    #[must_use]
    pub fn new(vertices: Vertices, header: impl Into<String>) -> Self {
        Self {
            vertices,
            header: header.into(),
            entries: Vec::new(),
            text: TextStyle::default(),
        }
    }

    pub fn add_entry(
        &mut self,
        object: impl Into<String>,
        label: impl Into<String>,
        option: impl Into<String>,
    ) {
        self.entries.push(LegendEntry {
            object: object.into(),
            label: label.into(),
            option: option.into(),
        });
    }

    /// Header line plus one line per entry.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.entries.len() + usize::from(!self.header.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Legend;
    use crate::core::Vertices;

    #[test]
    fn legend_keeps_entry_order() {
        let mut legend = Legend::new(Vertices::new(0.5, 0.5, 0.9, 0.9), "pp, #sqrt{s} = 200 GeV");
        legend.add_entry("hA", "first", "p");
        legend.add_entry("hB", "second", "lf");
        assert_eq!(legend.entries[0].object, "hA");
        assert_eq!(legend.entries[1].option, "lf");
        assert_eq!(legend.line_count(), 3);
    }
}
