use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Vertices;
use crate::error::{PlotError, PlotResult};
use crate::io::DataFile;
use crate::layout::Legend;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::{
    PlotMaker, PlotRoutine, annotate, attach_legend, build_canvas, draw_option, lead_style,
    match_axis_text, new_legend, present, present_ratio, unity_line,
};
use crate::tools;

/// Pairwise ratios `numerators[i] / denominators[i]`.
///
/// Both lists go to the spectra pad, the ratios to the ratio pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratios1D {
    denominators: Vec<PlotInput>,
    numerators: Vec<PlotInput>,
    options: PlotOptions,
}

impl Ratios1D {
    #[must_use]
    pub fn configure(
        denominators: Vec<PlotInput>,
        numerators: Vec<PlotInput>,
        options: PlotOptions,
    ) -> Self {
        Self {
            denominators,
            numerators,
            options,
        }
    }

    #[must_use]
    pub fn denominators(&self) -> &[PlotInput] {
        &self.denominators
    }

    #[must_use]
    pub fn numerators(&self) -> &[PlotInput] {
        &self.numerators
    }

    #[must_use]
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }
}

/// `"numerator / denominator"`, or whichever side has a legend.
fn ratio_label(numer: &PlotInput, denom: &PlotInput) -> String {
    match (numer.series_legend(), denom.series_legend()) {
        ("", denom) => denom.to_owned(),
        (numer, "") => numer.to_owned(),
        (numer, denom) => format!("{numer} / {denom}"),
    }
}

impl PlotRoutine for Ratios1D {
    fn name(&self) -> &'static str {
        "ratios_1d"
    }

    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()> {
        if self.denominators.len() != self.numerators.len() {
            return Err(PlotError::InvalidData(format!(
                "{} denominators for {} numerators",
                self.denominators.len(),
                self.numerators.len()
            )));
        }
        let options = &self.options;
        let mut denominators = maker.load_all(&self.denominators, options)?;
        let mut numerators = maker.load_all(&self.numerators, options)?;
        let mut ratios = numerators
            .iter()
            .zip(&denominators)
            .map(|(numer, denom)| tools::divide_1d(numer, denom, 1.0, 1.0))
            .collect::<PlotResult<Vec<_>>>()?;

        for (hist, input) in denominators.iter_mut().zip(&self.denominators) {
            present(hist, input.series_style(), options);
        }
        for (hist, input) in numerators.iter_mut().zip(&self.numerators) {
            present(hist, input.series_style(), options);
        }
        for (hist, input) in ratios.iter_mut().zip(&self.numerators) {
            present_ratio(hist, input.series_style(), options);
        }

        let mut manager = build_canvas(options)?;
        let spectra = manager.resolve_role(options.spectra_pad.as_deref())?;
        let ratio = manager.resolve_role(options.ratio_pad.as_deref())?;
        for hist in &mut ratios {
            match_axis_text(&manager, spectra, ratio, hist)?;
        }

        let mut legend = new_legend(options);
        let pad = manager.pad_at(spectra)?;
        let spectra_inputs = self.denominators.iter().chain(&self.numerators);
        for (index, (hist, input)) in denominators
            .into_iter()
            .chain(numerators)
            .zip(spectra_inputs)
            .enumerate()
        {
            legend.add_entry(hist.name.clone(), input.series_legend(), "pl");
            pad.push_histogram(hist, draw_option(input.series_option(), index));
        }
        annotate(pad, legend, options, &lead_style(&self.numerators));

        let reference = ratios.first().map(unity_line);
        let mut ratio_legend = Legend::new(Vertices::default(), "");
        let pad = manager.pad_at(ratio)?;
        let offset = pad.histograms().count();
        let pairs = self.numerators.iter().zip(&self.denominators);
        for (index, (hist, (numer, denom))) in ratios.into_iter().zip(pairs).enumerate() {
            ratio_legend.add_entry(hist.name.clone(), ratio_label(numer, denom), "pl");
            pad.push_histogram(hist, draw_option(numer.series_option(), offset + index));
        }
        if let Some(line) = reference {
            pad.push_line(line);
        }
        if ratio != spectra {
            attach_legend(pad, ratio_legend, &lead_style(&self.numerators));
        }

        debug!(canvas = %options.canvas.name, pairs = self.numerators.len(), "ratios placed");
        maker.finish(manager, output)
    }
}
