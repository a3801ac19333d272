use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Histogram;
use crate::error::{PlotError, PlotResult};
use crate::io::DataFile;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::{
    PlotMaker, PlotRoutine, annotate, build_canvas, draw_option, lead_style, match_axis_text,
    new_legend, present, present_ratio, unity_line,
};
use crate::tools;

/// Data corrected by the simulated `truth / reco` factor.
///
/// Pads by role: spectra gets every input plus the corrected spectrum,
/// correction gets `truth / reco`, ratio gets `corrected / truth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectSpectra1D {
    data: Vec<PlotInput>,
    reco: Vec<PlotInput>,
    truth: Vec<PlotInput>,
    options: PlotOptions,
}

/// Histograms derived for one `(data, reco, truth)` triple.
struct Corrected {
    correction: Histogram,
    corrected: Histogram,
    closure: Histogram,
}

impl CorrectSpectra1D {
    #[must_use]
    pub fn configure(
        data: Vec<PlotInput>,
        reco: Vec<PlotInput>,
        truth: Vec<PlotInput>,
        options: PlotOptions,
    ) -> Self {
        Self {
            data,
            reco,
            truth,
            options,
        }
    }

    #[must_use]
    pub fn data(&self) -> &[PlotInput] {
        &self.data
    }

    #[must_use]
    pub fn reco(&self) -> &[PlotInput] {
        &self.reco
    }

    #[must_use]
    pub fn truth(&self) -> &[PlotInput] {
        &self.truth
    }

    #[must_use]
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    fn correct(data: &Histogram, reco: &Histogram, truth: &Histogram) -> PlotResult<Corrected> {
        let correction = tools::divide_1d(truth, reco, 1.0, 1.0)?
            .renamed(format!("{}_correction", data.name));
        let corrected = tools::multiply(data, &correction)?
            .renamed(format!("{}_corrected", data.name));
        let closure = tools::divide_1d(&corrected, truth, 1.0, 1.0)?
            .renamed(format!("{}_over_truth", corrected.name));
        Ok(Corrected {
            correction,
            corrected,
            closure,
        })
    }
}

impl PlotRoutine for CorrectSpectra1D {
    fn name(&self) -> &'static str {
        "correct_spectra_1d"
    }

    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()> {
        if self.reco.len() != self.data.len() || self.truth.len() != self.data.len() {
            return Err(PlotError::InvalidData(format!(
                "correction needs equal input lists (data={}, reco={}, truth={})",
                self.data.len(),
                self.reco.len(),
                self.truth.len()
            )));
        }
        let options = &self.options;
        let data = maker.load_all(&self.data, options)?;
        let reco = maker.load_all(&self.reco, options)?;
        let truth = maker.load_all(&self.truth, options)?;
        let derived = data
            .iter()
            .zip(&reco)
            .zip(&truth)
            .map(|((data, reco), truth)| Self::correct(data, reco, truth))
            .collect::<PlotResult<Vec<_>>>()?;

        let mut manager = build_canvas(options)?;
        let spectra_pad = manager.resolve_role(options.spectra_pad.as_deref())?;
        let correction_pad = manager.resolve_role(options.correction_pad.as_deref())?;
        let ratio_pad = manager.resolve_role(options.ratio_pad.as_deref())?;

        let mut spectra = Vec::with_capacity(4 * data.len());
        let mut corrections = Vec::with_capacity(data.len());
        let mut closures = Vec::with_capacity(data.len());
        let triples = data.into_iter().zip(reco).zip(truth).zip(derived);
        for (index, (((data, reco), truth), derived)) in triples.enumerate() {
            let data_in = &self.data[index];
            let reco_in = &self.reco[index];
            let truth_in = &self.truth[index];
            let Corrected {
                mut correction,
                mut corrected,
                mut closure,
            } = derived;
            let corrected_legend = format!("{} corrected", data_in.series_legend());
            for (mut hist, input, legend) in [
                (data, data_in, data_in.series_legend().to_owned()),
                (reco, reco_in, reco_in.series_legend().to_owned()),
                (truth, truth_in, truth_in.series_legend().to_owned()),
            ] {
                present(&mut hist, input.series_style(), options);
                spectra.push((hist, input.series_option().to_owned(), legend));
            }
            present(&mut corrected, data_in.series_style(), options);
            spectra.push((corrected, data_in.series_option().to_owned(), corrected_legend));

            present_ratio(&mut correction, truth_in.series_style(), options);
            match_axis_text(&manager, spectra_pad, correction_pad, &mut correction)?;
            corrections.push((correction, truth_in.series_option().to_owned()));

            present_ratio(&mut closure, data_in.series_style(), options);
            match_axis_text(&manager, spectra_pad, ratio_pad, &mut closure)?;
            closures.push((closure, data_in.series_option().to_owned()));
        }

        let mut legend = new_legend(options);
        let pad = manager.pad_at(spectra_pad)?;
        for (index, (hist, option, label)) in spectra.into_iter().enumerate() {
            legend.add_entry(hist.name.clone(), label, "pl");
            pad.push_histogram(hist, draw_option(&option, index));
        }
        annotate(pad, legend, options, &lead_style(&self.data));

        for (role, hists) in [(correction_pad, corrections), (ratio_pad, closures)] {
            let reference = hists.first().map(|(hist, _)| unity_line(hist));
            let pad = manager.pad_at(role)?;
            let offset = pad.histograms().count();
            for (index, (hist, option)) in hists.into_iter().enumerate() {
                pad.push_histogram(hist, draw_option(&option, offset + index));
            }
            if let Some(line) = reference {
                pad.push_line(line);
            }
        }

        debug!(
            canvas = %options.canvas.name,
            triples = self.data.len(),
            "corrected spectra placed"
        );
        maker.finish(manager, output)
    }
}
