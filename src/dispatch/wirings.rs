//! Index-to-request expansion for each supported comparison.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Dimensions, PadOptions, Style, palette_color, palette_marker};
use crate::dispatch::index::{Level, Ordinal, PlotIndex, PtBin, Species, Spin};
use crate::dispatch::input::Input;
use crate::dispatch::output::Routine;
use crate::error::PlotResult;
use crate::io::DataFile;
use crate::layout::Canvas;
use crate::plot::{PlotInput, PlotOptions};
use crate::routines::PlotMaker;

type Siblings = SmallVec<[PlotIndex; 4]>;

const OPTION_1D: &str = "ep";
const OPTION_2D: &str = "colz";
const RATIO_SPLIT: f64 = 0.35;
const CORRECTION_SPLITS: (f64, f64) = (0.3, 0.55);

/// Axis scaling of the spectra pad of a 1D figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisOption {
    #[default]
    Linear,
    LogX,
    LogY,
    LogXY,
}

impl AxisOption {
    #[must_use]
    pub fn apply(self, options: PadOptions) -> PadOptions {
        let (log_x, log_y) = match self {
            Self::Linear => (false, false),
            Self::LogX => (true, false),
            Self::LogY => (false, true),
            Self::LogXY => (true, true),
        };
        options.with_log_x(log_x).with_log_y(log_y)
    }
}

/// One registered comparison bound to its current base index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    routine: Routine,
    index: PlotIndex,
}

impl Wiring {
    #[must_use]
    pub fn new(routine: Routine, index: PlotIndex) -> Self {
        Self { routine, index }
    }

    #[must_use]
    pub fn routine(&self) -> Routine {
        self.routine
    }

    #[must_use]
    pub fn index(&self) -> PlotIndex {
        self.index
    }

    pub fn set_index(&mut self, index: PlotIndex) {
        self.index = index;
    }

    /// Builds and writes the 1D figure of `variable` for the current index.
    pub fn make_1d(
        &self,
        maker: &mut PlotMaker,
        input: &Input,
        variable: &str,
        axis: AxisOption,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        debug!(routine = %self.routine, variable, index = ?self.index.ordinals(), "make 1D");
        let base = self.index;
        match self.routine {
            Routine::SimVsData => {
                let level_series = |level: Level| {
                    series(input, variable, &base.with_level(level), "SimVsData", level.index())
                };
                let baseline = level_series(Level::Data)?;
                let comparisons = [Level::Reco, Level::True]
                    .into_iter()
                    .map(level_series)
                    .collect::<PlotResult<Vec<_>>>()?;
                let options =
                    ratio_options(input, "cSimVsData", variable, clear_level(base), axis)?;
                maker.plot_vs_baseline_1d(baseline, comparisons, options, output)
            }
            Routine::RecoVsData => {
                let pts = pt_siblings(base);
                let denominators = with_level(&pts, Level::Data);
                let numerators = with_level(&pts, Level::Reco);
                let options =
                    ratio_options(input, "cRecoVsData", variable, clear_level(base), axis)?;
                maker.plot_ratios_1d(
                    styled_by_pt(input, variable, &denominators, "RecoVsData")?,
                    styled_by_pt(input, variable, &numerators, "RecoVsData")?,
                    options,
                    output,
                )
            }
            Routine::VsPtJet => {
                let pts = pt_siblings_all(base);
                let name = input.canvas_name(&format!("cVsPtJet{variable}"), &clear_pt(base))?;
                let mut canvas = Canvas::new(name, "", Dimensions::default());
                canvas.options = axis.apply(canvas.options);
                let options = PlotOptions::new(canvas).with_norm(1.0);
                maker.plot_spectra_1d(
                    styled_by_pt(input, variable, &pts, "VsPtJet")?,
                    options,
                    output,
                )
            }
            Routine::PPVsPAu => {
                let pts = pt_siblings(base);
                let denominators = with_species(&pts, Species::PP);
                let numerators = with_species(&pts, Species::PAu);
                let options =
                    ratio_options(input, "cPPVsPAu", variable, clear_species(base), axis)?
                        .with_norm(1.0);
                let pp_tag = species_prefix(input, "PPVsPAu", Species::PP)?;
                let pau_tag = species_prefix(input, "PPVsPAu", Species::PAu)?;
                maker.plot_ratios_1d(
                    styled_by_pt(input, variable, &denominators, &pp_tag)?,
                    styled_by_pt(input, variable, &numerators, &pau_tag)?,
                    options,
                    output,
                )
            }
            Routine::CorrectSpectra => {
                let pts = pt_siblings(base);
                let [data, reco, truth] = [Level::Data, Level::Reco, Level::True].map(|level| {
                    styled_by_pt(input, variable, &with_level(&pts, level), "Corrected")
                });
                let name =
                    input.canvas_name(&format!("cCorrectSpectra{variable}"), &clear_level(base))?;
                let (lower, upper) = CORRECTION_SPLITS;
                let mut canvas = Canvas::spectra_correction_ratio(name, "", lower, upper);
                apply_to_spectra_pad(&mut canvas, axis);
                let options = PlotOptions::new(canvas).with_roles(
                    Some("spectra"),
                    Some("ratio"),
                    Some("correction"),
                );
                maker.plot_correct_spectra_1d(data?, reco?, truth?, options, output)
            }
            Routine::SpinRatios => {
                let spin_series = |spin: Spin| {
                    series(input, variable, &base.with_spin(spin), "SpinRatios", spin.index())
                };
                let integrated = spin_series(Spin::Integrated)?;
                let mut numerators = Vec::with_capacity(Spin::POLARIZED.len());
                let mut denominators = Vec::with_capacity(Spin::POLARIZED.len());
                for spin in Spin::POLARIZED {
                    numerators.push(spin_series(spin)?);
                    let rename = format!("{}_{}", integrated.rename, input.hists.spin_tag(spin)?);
                    denominators.push(integrated.clone().with_rename(rename));
                }
                let options =
                    ratio_options(input, "cSpinRatios", variable, clear_spin(base), axis)?;
                maker.plot_ratios_1d(denominators, numerators, options, output)
            }
        }
    }

    /// Builds and writes the 2D panel figure of `variable`.
    pub fn make_2d(
        &self,
        maker: &mut PlotMaker,
        input: &Input,
        variable: &str,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        debug!(routine = %self.routine, variable, index = ?self.index.ordinals(), "make 2D");
        let base = self.index;
        let (panels, cleared): (Siblings, PlotIndex) = match self.routine {
            Routine::SimVsData | Routine::CorrectSpectra => (
                [Level::Data, Level::Reco, Level::True]
                    .into_iter()
                    .map(|level| base.with_level(level))
                    .collect(),
                clear_level(base),
            ),
            Routine::RecoVsData => (
                [Level::Data, Level::Reco]
                    .into_iter()
                    .map(|level| base.with_level(level))
                    .collect(),
                clear_level(base),
            ),
            Routine::VsPtJet => (pt_siblings_all(base), clear_pt(base)),
            Routine::PPVsPAu => (
                [Species::PP, Species::PAu]
                    .into_iter()
                    .map(|species| base.with_species(species))
                    .collect(),
                clear_species(base),
            ),
            Routine::SpinRatios => (
                [Spin::Integrated, Spin::BU, Spin::BD, Spin::YU, Spin::YD]
                    .into_iter()
                    .map(|spin| base.with_spin(spin))
                    .collect(),
                clear_spin(base),
            ),
        };
        let tag = format!("{}2D", self.routine);
        let inputs = panels
            .iter()
            .enumerate()
            .map(|(position, index)| {
                let tag = match (self.routine, index.species) {
                    (Routine::PPVsPAu, Some(species)) => species_prefix(input, &tag, species)?,
                    _ => tag.clone(),
                };
                series(input, variable, index, &tag, position)
                    .map(|series| series.with_option(OPTION_2D))
            })
            .collect::<PlotResult<Vec<_>>>()?;
        let name = input.canvas_name(&format!("c{tag}{variable}"), &cleared)?;
        let canvas = Canvas::panels(name, "", inputs.len());
        let mut options = PlotOptions::new(canvas);
        if inputs.len() > 1 {
            options = options.with_reference_pads(0, inputs.len() - 1);
        }
        maker.plot_spectra_2d(inputs, options, output)
    }
}

/// Fills unconstrained species and level so a source file can be chosen.
///
/// Only the file lookup sees the filled index; names and legends keep the
/// caller's unset fields.
fn resolve(index: PlotIndex) -> PlotIndex {
    PlotIndex {
        species: index.species.or(Some(Species::PP)),
        level: index.level.or(Some(Level::Data)),
        ..index
    }
}

fn clear_level(index: PlotIndex) -> PlotIndex {
    PlotIndex { level: None, ..index }
}

fn clear_species(index: PlotIndex) -> PlotIndex {
    PlotIndex {
        species: None,
        ..index
    }
}

fn clear_pt(index: PlotIndex) -> PlotIndex {
    PlotIndex { pt: None, ..index }
}

fn clear_spin(index: PlotIndex) -> PlotIndex {
    PlotIndex { spin: None, ..index }
}

/// Every pt bucket.
fn pt_siblings_all(index: PlotIndex) -> Siblings {
    PtBin::ALL.iter().map(|pt| index.with_pt(*pt)).collect()
}

/// Every pt bucket when pt is unconstrained, else the index itself.
fn pt_siblings(index: PlotIndex) -> Siblings {
    match index.pt {
        Some(_) => SmallVec::from_elem(index, 1),
        None => pt_siblings_all(index),
    }
}

fn with_level(indices: &[PlotIndex], level: Level) -> Siblings {
    indices.iter().map(|index| index.with_level(level)).collect()
}

fn with_species(indices: &[PlotIndex], species: Species) -> Siblings {
    indices.iter().map(|index| index.with_species(species)).collect()
}

/// Rename prefix keeping both species apart; histogram names carry no
/// species token.
fn species_prefix(input: &Input, tag: &str, species: Species) -> PlotResult<String> {
    Ok(format!("{tag}{}", input.files.species_tag(species)?))
}

/// Series colored and marked by their pt bucket.
fn styled_by_pt(
    input: &Input,
    variable: &str,
    indices: &[PlotIndex],
    tag: &str,
) -> PlotResult<Vec<PlotInput>> {
    indices
        .iter()
        .map(|index| {
            let bucket = index.pt.map_or(0, Ordinal::index);
            series(input, variable, index, tag, bucket)
        })
        .collect()
}

/// Plot input of one sibling index with the palette entry `bucket`.
fn series(
    input: &Input,
    variable: &str,
    index: &PlotIndex,
    tag: &str,
    bucket: usize,
) -> PlotResult<PlotInput> {
    let style = Style::default()
        .with_color(palette_color(bucket))
        .with_marker(palette_marker(bucket));
    Ok(PlotInput::new(input.file(&resolve(*index))?, input.hist_name(variable, index, "")?)
        .with_rename(input.hist_name(variable, index, tag)?)
        .with_legend(input.legend(index)?)
        .with_option(OPTION_1D)
        .with_style(style))
}

/// Spectra-over-ratio canvas named after `base` and the varying-free index.
fn ratio_options(
    input: &Input,
    base: &str,
    variable: &str,
    index: PlotIndex,
    axis: AxisOption,
) -> PlotResult<PlotOptions> {
    let name = input.canvas_name(&format!("{base}{variable}"), &index)?;
    let mut canvas = Canvas::spectra_ratio(name, "", RATIO_SPLIT);
    apply_to_spectra_pad(&mut canvas, axis);
    Ok(PlotOptions::new(canvas).with_roles(Some("spectra"), Some("ratio"), None))
}

fn apply_to_spectra_pad(canvas: &mut Canvas, axis: AxisOption) {
    if let Some(pad) = canvas.pads_mut().first_mut() {
        pad.options = axis.apply(pad.options);
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisOption, pt_siblings, resolve, series};
    use crate::core::PadOptions;
    use crate::dispatch::index::{Level, PlotIndex, PtBin, Species};
    use crate::dispatch::input::Input;

    #[test]
    fn axis_option_sets_log_flags() {
        let options = AxisOption::LogXY.apply(PadOptions::default());
        assert!(options.is_log_x() && options.is_log_y());
        let options = AxisOption::Linear.apply(options);
        assert!(!options.is_log_x() && !options.is_log_y());
    }

    #[test]
    fn fixed_pt_yields_a_single_sibling() {
        let index = PlotIndex::default().with_pt(PtBin::Pt10);
        assert_eq!(pt_siblings(index).len(), 1);
        assert_eq!(pt_siblings(PlotIndex::default()).len(), 3);
    }

    #[test]
    fn resolve_keeps_set_fields() {
        let index = PlotIndex::default().with_species(Species::PAu);
        let resolved = resolve(index);
        assert_eq!(resolved.species, Some(Species::PAu));
        assert_eq!(resolved.level, Some(Level::Data));
    }

    #[test]
    fn series_reads_the_data_file_but_names_without_a_level() {
        let input = Input::default();
        let index = PlotIndex::default()
            .with_species(Species::PP)
            .with_pt(PtBin::Pt5);
        let series = series(&input, "Ec", &index, "VsPtJet", 0).expect("series");
        let data = index.with_level(Level::Data);
        assert_eq!(series.file, input.file(&data).expect("file"));
        assert_eq!(series.object, "hEcStat_Pt5");
        assert_eq!(series.rename, "hVsPtJetEcStat_Pt5");
        assert!(!series.legend.contains("Data"), "{}", series.legend);
    }
}
