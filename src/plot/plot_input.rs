use serde::{Deserialize, Serialize};

use crate::core::{Rebin, Style};
use crate::plot::Projection;

/// One plotted series: where to fetch it and how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    pub file: String,
    pub object: String,
    #[serde(default)]
    pub rename: String,
    #[serde(default)]
    pub legend: String,
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub rebin: Rebin,
    #[serde(default)]
    pub projection: Option<Projection>,
}

impl PlotInput {
    #[must_use]
    pub fn new(file: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            object: object.into(),
            rename: String::new(),
            legend: String::new(),
            option: String::new(),
            style: Style::default(),
            rebin: Rebin::default(),
            projection: None,
        }
    }

    #[must_use]
    pub fn with_rename(mut self, rename: impl Into<String>) -> Self {
        self.rename = rename.into();
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = legend.into();
        self
    }

    #[must_use]
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = option.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_rebin(mut self, rebin: Rebin) -> Self {
        self.rebin = rebin;
        self
    }

    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Name of the drawn copy: the rename when set, else the object name.
    #[must_use]
    pub fn output_name(&self) -> &str {
        if self.rename.is_empty() {
            &self.object
        } else {
            &self.rename
        }
    }

    /// Style of the drawn series; a projection brings its own.
    #[must_use]
    pub fn series_style(&self) -> &Style {
        self.projection
            .as_ref()
            .map_or(&self.style, |projection| &projection.style)
    }

    #[must_use]
    pub fn series_legend(&self) -> &str {
        match &self.projection {
            Some(projection) if !projection.legend.is_empty() => &projection.legend,
            _ => &self.legend,
        }
    }

    #[must_use]
    pub fn series_option(&self) -> &str {
        match &self.projection {
            Some(projection) if !projection.option.is_empty() => &projection.option,
            _ => &self.option,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlotInput;
    use crate::core::{Axis, Color, Interval, Style};
    use crate::plot::Projection;

    #[test]
    fn output_name_prefers_rename() {
        let input = PlotInput::new("in.json", "hA");
        assert_eq!(input.output_name(), "hA");
        assert_eq!(input.with_rename("hB").output_name(), "hB");
    }

    #[test]
    fn projection_overrides_series_presentation() {
        let mut projection = Projection::new(Axis::X, Interval::default(), "hProj");
        projection.legend = "slice".to_owned();
        projection.style = Style::default().with_color(Color::RED);
        let input = PlotInput::new("in.json", "h2")
            .with_legend("full")
            .with_option("hist")
            .with_projection(projection);
        assert_eq!(input.series_legend(), "slice");
        assert_eq!(input.series_option(), "hist");
        assert_eq!(input.series_style().plot.color, Color::RED);
    }
}
