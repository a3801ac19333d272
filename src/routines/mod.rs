//! The five figure recipes and the [`PlotMaker`] that runs them.
//!
//! Every routine follows the same skeleton: fetch and prepare all series,
//! derive ratios or corrections, realize the canvas, place the series in
//! their pads, annotate, draw, write. Nothing reaches the output file unless
//! every step before `write` succeeded.

mod correct_spectra_1d;
mod ratios_1d;
mod spectra_1d;
mod spectra_2d;
mod vs_baseline_1d;

use std::fmt;
use std::rc::Rc;

use tracing::debug;

pub use correct_spectra_1d::CorrectSpectra1D;
pub use ratios_1d::Ratios1D;
pub use spectra_1d::Spectra1D;
pub use spectra_2d::Spectra2D;
pub use vs_baseline_1d::VsBaseline1D;

use crate::core::{Axis, Histogram, Style, Vertices};
use crate::error::PlotResult;
use crate::io::{DataFile, FileMode, Storage};
use crate::layout::{CanvasManager, Legend, TextBox};
use crate::plot::{PlotInput, PlotOptions};
use crate::render::{LinePrimitive, NullRenderer, Renderer, ScenePad};
use crate::tools;

const LEGEND_SPACING: f64 = 0.05;
const LEGEND_OFFSET: f64 = 0.02;
const BLOCK_TOP: f64 = 0.88;
const BLOCK_MAX_HEIGHT: f64 = 0.8;

/// A configured figure recipe.
pub trait PlotRoutine {
    fn name(&self) -> &'static str;

    /// Builds the figure and writes its canvas into `output`.
    fn plot(&self, maker: &mut PlotMaker, output: &mut DataFile) -> PlotResult<()>;
}

/// Runs routines against one input storage and one renderer.
pub struct PlotMaker {
    storage: Rc<dyn Storage>,
    renderer: Box<dyn Renderer>,
    plotted: usize,
}

impl fmt::Debug for PlotMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotMaker")
            .field("plotted", &self.plotted)
            .finish_non_exhaustive()
    }
}

impl PlotMaker {
    /// Maker that validates scenes without rasterizing them.
    #[must_use]
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self::with_renderer(storage, Box::new(NullRenderer::default()))
    }

    #[must_use]
    pub fn with_renderer(storage: Rc<dyn Storage>, renderer: Box<dyn Renderer>) -> Self {
        Self {
            storage,
            renderer,
            plotted: 0,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Rc<dyn Storage> {
        &self.storage
    }

    /// Number of canvases written so far.
    #[must_use]
    pub fn plotted(&self) -> usize {
        self.plotted
    }

    pub fn run(&mut self, routine: &dyn PlotRoutine, output: &mut DataFile) -> PlotResult<()> {
        debug!(routine = routine.name(), output = %output.path(), "running routine");
        routine.plot(self, output)
    }

    pub fn plot_spectra_1d(
        &mut self,
        inputs: Vec<PlotInput>,
        options: PlotOptions,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        self.run(&Spectra1D::configure(inputs, options), output)
    }

    pub fn plot_spectra_2d(
        &mut self,
        inputs: Vec<PlotInput>,
        options: PlotOptions,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        self.run(&Spectra2D::configure(inputs, options), output)
    }

    pub fn plot_ratios_1d(
        &mut self,
        denominators: Vec<PlotInput>,
        numerators: Vec<PlotInput>,
        options: PlotOptions,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        self.run(&Ratios1D::configure(denominators, numerators, options), output)
    }

    pub fn plot_vs_baseline_1d(
        &mut self,
        baseline: PlotInput,
        comparisons: Vec<PlotInput>,
        options: PlotOptions,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        self.run(&VsBaseline1D::configure(baseline, comparisons, options), output)
    }

    pub fn plot_correct_spectra_1d(
        &mut self,
        data: Vec<PlotInput>,
        reco: Vec<PlotInput>,
        truth: Vec<PlotInput>,
        options: PlotOptions,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        self.run(&CorrectSpectra1D::configure(data, reco, truth, options), output)
    }

    /// Fetches, projects, rebins and normalizes one series.
    ///
    /// The source file is closed before this returns.
    pub(crate) fn load(&self, input: &PlotInput, options: &PlotOptions) -> PlotResult<Histogram> {
        let source = {
            let file = tools::open_file(&self.storage, &input.file, FileMode::Read)?;
            tools::fetch(&input.object, &file)?
        };
        let projected = match &input.projection {
            Some(projection) => {
                let mut projection = projection.clone();
                if projection.rename.is_empty() && !input.rename.is_empty() {
                    projection.rename = input.rename.clone();
                }
                projection.apply(&source)?
            }
            None => source.renamed(input.output_name()),
        };
        let mut hist = input.rebin.apply(&projected)?;
        if options.do_norm {
            tools::normalize(&mut hist, options.norm_to, options.norm_range.as_ref());
        }
        Ok(hist)
    }

    pub(crate) fn load_all(
        &self,
        inputs: &[PlotInput],
        options: &PlotOptions,
    ) -> PlotResult<Vec<Histogram>> {
        inputs
            .iter()
            .map(|input| self.load(input, options))
            .collect()
    }

    /// Draws, writes and releases the canvas.
    pub(crate) fn finish(
        &mut self,
        mut manager: CanvasManager,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        manager.draw(self.renderer.as_mut())?;
        manager.write(output)?;
        manager.close()?;
        self.plotted += 1;
        Ok(())
    }
}

/// Realizes the canvas of `options`.
pub(crate) fn build_canvas(options: &PlotOptions) -> PlotResult<CanvasManager> {
    let mut manager = CanvasManager::with_definition(options.canvas.clone());
    manager.make_plot()?;
    Ok(manager)
}

/// First series keeps its option, later ones overlay with `same`.
pub(crate) fn draw_option(option: &str, index: usize) -> String {
    match (index, option.is_empty()) {
        (0, _) => option.to_owned(),
        (_, true) => "same".to_owned(),
        (_, false) => format!("{option} same"),
    }
}

/// Styles a spectrum and applies the plot range to every axis.
pub(crate) fn present(hist: &mut Histogram, style: &Style, options: &PlotOptions) {
    style.apply_to_histogram(hist);
    if let Some(range) = &options.plot_range {
        range.apply_all(hist);
    }
}

/// Styles a ratio: plot range on x, ratio range on the value axis.
pub(crate) fn present_ratio(hist: &mut Histogram, style: &Style, options: &PlotOptions) {
    style.apply_to_histogram(hist);
    if let Some(range) = &options.plot_range {
        range.apply(Axis::X, hist);
    }
    if let Some(range) = options.ratio_range {
        hist.set_minimum(range.low);
        hist.set_maximum(range.high);
    }
}

/// Rescales x and y axis text of a histogram drawn in a smaller pad.
pub(crate) fn match_axis_text(
    manager: &CanvasManager,
    big: usize,
    small: usize,
    hist: &mut Histogram,
) -> PlotResult<()> {
    if big == small {
        return Ok(());
    }
    manager.scale_axis_text(big, small, Axis::X, hist)?;
    manager.scale_axis_text(big, small, Axis::Y, hist)?;
    Ok(())
}

/// Dashed reference line at one across the visible x range of `hist`.
pub(crate) fn unity_line(hist: &Histogram) -> LinePrimitive {
    let range = hist.axis(Axis::X).visible_range();
    LinePrimitive::horizontal(1.0, range.low, range.high)
}

/// Top-right block sized to its line count.
fn block_vertices(lines: usize, x0: f64, x1: f64) -> Vertices {
    let height = tools::height(lines, LEGEND_SPACING, LEGEND_OFFSET).min(BLOCK_MAX_HEIGHT);
    Vertices::new(x0, BLOCK_TOP - height, x1, BLOCK_TOP)
}

/// Attaches the legend and the annotation lines of `options` to `pad`.
pub(crate) fn annotate(pad: &mut ScenePad, legend: Legend, options: &PlotOptions, style: &Style) {
    attach_legend(pad, legend, style);
    if !options.text.is_empty() {
        let mut text_box =
            TextBox::with_lines(block_vertices(options.text.len(), 0.18, 0.5), &options.text);
        style.apply_to_text_box(&mut text_box);
        pad.push_text_box(text_box);
    }
}

/// Sizes `legend` to its line count and places it top right.
///
/// Empty legends are dropped so an empty figure stays empty.
pub(crate) fn attach_legend(pad: &mut ScenePad, mut legend: Legend, style: &Style) {
    if legend.is_empty() {
        return;
    }
    legend.vertices = block_vertices(legend.line_count(), 0.55, 0.88);
    style.apply_to_legend(&mut legend);
    pad.push_legend(legend);
}

/// Empty legend carrying the figure header.
pub(crate) fn new_legend(options: &PlotOptions) -> Legend {
    Legend::new(Vertices::default(), options.header.clone())
}

/// Style of the first input, used for legend and text box fonts.
pub(crate) fn lead_style<'a>(inputs: impl IntoIterator<Item = &'a PlotInput>) -> Style {
    inputs
        .into_iter()
        .next()
        .map(|input| *input.series_style())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{block_vertices, draw_option};

    #[test]
    fn later_series_overlay_with_same() {
        assert_eq!(draw_option("ep", 0), "ep");
        assert_eq!(draw_option("ep", 1), "ep same");
        assert_eq!(draw_option("", 2), "same");
    }

    #[test]
    fn blocks_grow_downwards_and_stay_on_the_pad() {
        let small = block_vertices(2, 0.5, 0.9);
        let large = block_vertices(100, 0.5, 0.9);
        assert!(small.y0 > large.y0);
        assert!(large.validate().is_ok());
    }
}
