use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlotResult;
use crate::io::DataFile;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::{
    PlotMaker, PlotRoutine, annotate, build_canvas, draw_option, lead_style, new_legend, present,
};

/// Overlay of N one-dimensional series on the spectra pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectra1D {
    inputs: Vec<PlotInput>,
    options: PlotOptions,
}

impl Spectra1D {
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

impl PlotRoutine for Spectra1D {
    fn name(&self) -> &'static str {
        "spectra_1d"
    }

    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()> {
        let options = &self.options;
        let mut series = maker.load_all(&self.inputs, options)?;
        for (hist, input) in series.iter_mut().zip(&self.inputs) {
            present(hist, input.series_style(), options);
        }

        let mut manager = build_canvas(options)?;
        let spectra = manager.resolve_role(options.spectra_pad.as_deref())?;
        let pad = manager.pad_at(spectra)?;
        let mut legend = new_legend(options);
        for (index, (hist, input)) in series.into_iter().zip(&self.inputs).enumerate() {
            legend.add_entry(hist.name.clone(), input.series_legend(), "pl");
            pad.push_histogram(hist, draw_option(input.series_option(), index));
        }
        annotate(pad, legend, options, &lead_style(&self.inputs));

        debug!(canvas = %options.canvas.name, series = self.inputs.len(), "1D spectra placed");
        maker.finish(manager, output)
    }
}
