use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlotResult;
use crate::io::DataFile;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::{
    PlotMaker, PlotRoutine, annotate, build_canvas, draw_option, match_axis_text, new_legend,
    present, present_ratio, unity_line,
};
use crate::tools;

/// Comparisons drawn against a common baseline.
///
/// The ratio pad shows every series divided by the baseline, the baseline
/// itself included as the flat reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VsBaseline1D {
    baseline: PlotInput,
    comparisons: Vec<PlotInput>,
    options: PlotOptions,
}

impl VsBaseline1D {
    #[must_use]
    pub fn configure(baseline: PlotInput, comparisons: Vec<PlotInput>, options: PlotOptions) -> Self {
        Self {
            baseline,
            comparisons,
            options,
        }
    }

    #[must_use]
    pub fn baseline(&self) -> &PlotInput {
        &self.baseline
    }

    #[must_use]
    pub fn comparisons(&self) -> &[PlotInput] {
        &self.comparisons
    }

    #[must_use]
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }
}

impl PlotRoutine for VsBaseline1D {
    fn name(&self) -> &'static str {
        "vs_baseline_1d"
    }

    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()> {
        let options = &self.options;
        let inputs: Vec<&PlotInput> = std::iter::once(&self.baseline)
            .chain(&self.comparisons)
            .collect();

        let baseline = maker.load(&self.baseline, options)?;
        let mut spectra = vec![baseline.clone()];
        for input in &self.comparisons {
            spectra.push(maker.load(input, options)?);
        }
        let mut ratios = spectra
            .iter()
            .map(|hist| tools::divide_1d(hist, &baseline, 1.0, 1.0))
            .collect::<PlotResult<Vec<_>>>()?;

        for (hist, input) in spectra.iter_mut().zip(&inputs) {
            present(hist, input.series_style(), options);
        }
        for (hist, input) in ratios.iter_mut().zip(&inputs) {
            present_ratio(hist, input.series_style(), options);
        }

        let mut manager = build_canvas(options)?;
        let spectra_pad = manager.resolve_role(options.spectra_pad.as_deref())?;
        let ratio_pad = manager.resolve_role(options.ratio_pad.as_deref())?;
        for hist in &mut ratios {
            match_axis_text(&manager, spectra_pad, ratio_pad, hist)?;
        }

        let mut legend = new_legend(options);
        let pad = manager.pad_at(spectra_pad)?;
        for (index, (hist, input)) in spectra.into_iter().zip(&inputs).enumerate() {
            legend.add_entry(hist.name.clone(), input.series_legend(), "pl");
            pad.push_histogram(hist, draw_option(input.series_option(), index));
        }
        annotate(pad, legend, options, self.baseline.series_style());

        let reference = ratios.first().map(unity_line);
        let pad = manager.pad_at(ratio_pad)?;
        let offset = pad.histograms().count();
        for (index, (hist, input)) in ratios.into_iter().zip(&inputs).enumerate() {
            pad.push_histogram(hist, draw_option(input.series_option(), offset + index));
        }
        if let Some(line) = reference {
            pad.push_line(line);
        }

        debug!(
            canvas = %options.canvas.name,
            comparisons = self.comparisons.len(),
            "baseline comparison placed"
        );
        maker.finish(manager, output)
    }
}
