use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, Histogram, Margins, PadOptions, Vertices};
use crate::core::style::{Color, LineStyle};
use crate::error::{PlotError, PlotResult};
use crate::layout::{Legend, TextBox};

/// Straight line in the user coordinates of the pad it is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub style: LineStyle,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self {
            x1,
            y1: y,
            x2,
            y2: y,
            width: 1.0,
            style: LineStyle::Dashed,
            color: Color::GRAY,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(PlotError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PlotError::InvalidData(
                "line width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One drawn object, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Histogram { hist: Histogram, option: String },
    Legend(Legend),
    TextBox(TextBox),
    Line(LinePrimitive),
}

/// Realized pad owning everything drawn into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePad {
    pub name: String,
    pub title: String,
    pub label: String,
    pub vertices: Vertices,
    pub margins: Margins,
    pub options: PadOptions,
    pub primitives: Vec<Primitive>,
}

impl ScenePad {
    pub fn push_histogram(&mut self, hist: Histogram, option: impl Into<String>) {
        self.primitives.push(Primitive::Histogram {
            hist,
            option: option.into(),
        });
    }

    pub fn push_legend(&mut self, legend: Legend) {
        self.primitives.push(Primitive::Legend(legend));
    }

    pub fn push_text_box(&mut self, text_box: TextBox) {
        self.primitives.push(Primitive::TextBox(text_box));
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.primitives.push(Primitive::Line(line));
    }

    pub fn histograms(&self) -> impl Iterator<Item = &Histogram> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Histogram { hist, .. } => Some(hist),
            _ => None,
        })
    }

    #[must_use]
    pub fn histogram(&self, name: &str) -> Option<&Histogram> {
        self.histograms().find(|hist| hist.name == name)
    }

    #[must_use]
    pub fn legends(&self) -> Vec<&Legend> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Legend(legend) => Some(legend),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<&LinePrimitive> {
        self.primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.vertices.validate()?;
        self.margins.validate()?;
        for primitive in &self.primitives {
            match primitive {
                Primitive::Histogram { hist, .. } => {
                    if hist.name.is_empty() {
                        return Err(PlotError::InvalidData(format!(
                            "pad `{}` holds an unnamed histogram",
                            self.name
                        )));
                    }
                }
                Primitive::Legend(legend) => legend.vertices.validate()?,
                Primitive::TextBox(text_box) => text_box.vertices.validate()?,
                Primitive::Line(line) => line.validate()?,
            }
        }
        Ok(())
    }
}

/// Realized canvas: the root surface plus its pads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCanvas {
    pub name: String,
    pub title: String,
    pub dimensions: Dimensions,
    pub options: PadOptions,
    pub pads: Vec<ScenePad>,
}

impl SceneCanvas {
    #[must_use]
    pub fn pad(&self, label: &str) -> Option<&ScenePad> {
        self.pads.iter().find(|pad| pad.label == label)
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.pads.iter().map(|pad| pad.primitives.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pads.iter().all(ScenePad::is_empty)
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.dimensions.is_valid() {
            return Err(PlotError::InvalidLayout(format!(
                "canvas `{}` has invalid dimensions {}x{}",
                self.name, self.dimensions.width, self.dimensions.height
            )));
        }
        for pad in &self.pads {
            pad.validate()?;
        }
        Ok(())
    }
}
