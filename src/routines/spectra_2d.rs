use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Vertices;
use crate::error::{PlotError, PlotResult};
use crate::io::DataFile;
use crate::layout::Legend;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::{
    PlotMaker, PlotRoutine, annotate, attach_legend, build_canvas, lead_style, match_axis_text,
    new_legend, present,
};

/// One two-dimensional series per pad, each with its own draw option.
///
/// With `reference_pads = Some((big, small))` the axis text of the series in
/// pad `small` is scaled to read like the one in pad `big`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectra2D {
    inputs: Vec<PlotInput>,
    options: PlotOptions,
}

impl Spectra2D {
    #[must_use]
    pub fn configure(inputs: Vec<PlotInput>, options: PlotOptions) -> Self {
        Self { inputs, options }
    }

    #[must_use]
    pub fn inputs(&self) -> &[PlotInput] {
        &self.inputs
    }

    #[must_use]
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }
}

impl PlotRoutine for Spectra2D {
    fn name(&self) -> &'static str {
        "spectra_2d"
    }

    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()> {
        let options = &self.options;
        let regions = options.canvas.pad_count().max(1);
        if self.inputs.len() > regions {
            return Err(PlotError::InvalidLayout(format!(
                "canvas `{}` has {regions} pad(s) for {} 2D series",
                options.canvas.name,
                self.inputs.len()
            )));
        }

        let mut series = maker.load_all(&self.inputs, options)?;
        for (hist, input) in series.iter_mut().zip(&self.inputs) {
            present(hist, input.series_style(), options);
        }

        let mut manager = build_canvas(options)?;
        let reference = options
            .reference_pads
            .and_then(|(big, small)| series.get_mut(small).map(|hist| (big, small, hist)));
        if let Some((big, small, hist)) = reference {
            match_axis_text(&manager, big, small, hist)?;
        }

        let style = lead_style(&self.inputs);
        for (index, (hist, input)) in series.into_iter().zip(&self.inputs).enumerate() {
            let pad = manager.pad_at(index)?;
            let mut legend = if index == 0 {
                new_legend(options)
            } else {
                Legend::new(Vertices::default(), "")
            };
            if !input.series_legend().is_empty() {
                legend.add_entry(hist.name.clone(), input.series_legend(), "");
            }
            pad.push_histogram(hist, input.series_option());
            if index == 0 {
                annotate(pad, legend, options, &style);
            } else {
                attach_legend(pad, legend, &style);
            }
        }

        debug!(canvas = %options.canvas.name, series = self.inputs.len(), "2D spectra placed");
        maker.finish(manager, output)
    }
}
