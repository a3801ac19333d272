use serde::{Deserialize, Serialize};

use crate::core::{Interval, Range};
use crate::layout::Canvas;

/// Figure-wide settings shared by all series of one routine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    #[serde(default)]
    pub header: String,
    pub canvas: Canvas,
    /// Axis window applied to every drawn series; `None` keeps full axes.
    #[serde(default)]
    pub plot_range: Option<Range>,
    /// Integration window for normalization; `None` integrates all
    /// in-range bins.
    #[serde(default)]
    pub norm_range: Option<Range>,
    #[serde(default = "default_norm_to")]
    pub norm_to: f64,
    #[serde(default)]
    pub do_norm: bool,
    /// Pad label hosting ratios.
    #[serde(default)]
    pub ratio_pad: Option<String>,
    /// Pad label hosting spectra.
    #[serde(default)]
    pub spectra_pad: Option<String>,
    /// Pad label hosting correction factors.
    #[serde(default)]
    pub correction_pad: Option<String>,
    /// Y interval of ratio and correction pads.
    #[serde(default)]
    pub ratio_range: Option<Interval>,
    /// Extra annotation lines drawn next to the legend.
    #[serde(default)]
    pub text: Vec<String>,
    /// `(big, small)` pad indices used to rescale axis text of 2D panels.
    #[serde(default)]
    pub reference_pads: Option<(usize, usize)>,
}

fn default_norm_to() -> f64 {
    1.0
}

impl PlotOptions {
    #[must_use]
    pub fn new(canvas: Canvas) -> Self {
        Self {
            header: String::new(),
            canvas,
            plot_range: None,
            norm_range: None,
            norm_to: default_norm_to(),
            do_norm: false,
            ratio_pad: None,
            spectra_pad: None,
            correction_pad: None,
            ratio_range: None,
            text: Vec::new(),
            reference_pads: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    #[must_use]
    pub fn with_plot_range(mut self, range: Range) -> Self {
        self.plot_range = Some(range);
        self
    }

    /// Normalizes every series to `norm_to` over its full axes.
    #[must_use]
    pub fn with_norm(mut self, norm_to: f64) -> Self {
        self.norm_to = norm_to;
        self.do_norm = true;
        self
    }

    #[must_use]
    pub fn with_norm_range(mut self, norm_range: Range, norm_to: f64) -> Self {
        self.norm_range = Some(norm_range);
        self.with_norm(norm_to)
    }

    #[must_use]
    pub fn with_roles(
        mut self,
        spectra: Option<&str>,
        ratio: Option<&str>,
        correction: Option<&str>,
    ) -> Self {
        self.spectra_pad = spectra.map(str::to_owned);
        self.ratio_pad = ratio.map(str::to_owned);
        self.correction_pad = correction.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_ratio_range(mut self, range: Interval) -> Self {
        self.ratio_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_text<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text = lines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_reference_pads(mut self, big: usize, small: usize) -> Self {
        self.reference_pads = Some((big, small));
        self
    }
}
