use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Axis, Dimensions, Histogram, Margins, PadOptions, Vertices};
use crate::error::{PlotError, PlotResult};
use crate::layout::Pad;
use crate::render::SceneCanvas;

/// Declarative description of a figure: root surface plus ordered pads.
///
/// With no pads the canvas margins govern the single drawable region; once
/// pads are added every pad carries its own margins and the canvas margins
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default)]
    pub options: PadOptions,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pads: Vec<Pad>,
    #[serde(default)]
    labels: Vec<String>,
}

impl Canvas {
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>, dimensions: Dimensions) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            dimensions,
            options: PadOptions::default(),
            margins: Margins::default(),
            pads: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Canvas with a large spectra pad on top of a short ratio pad.
    ///
    /// `split` is the y coordinate of the boundary between both pads.
    #[must_use]
    pub fn spectra_ratio(name: impl Into<String>, title: impl Into<String>, split: f64) -> Self {
        let name = name.into();
        let mut canvas = Self::new(name.clone(), title, Dimensions::new(750, 950));
        let spectra = Pad::new(format!("{name}_spectra"), Vertices::new(0.0, split, 1.0, 1.0))
            .with_margins(Margins::new(0.02, 0.02, 0.0, 0.15));
        let ratio = Pad::new(format!("{name}_ratio"), Vertices::new(0.0, 0.0, 1.0, split))
            .with_margins(Margins::new(0.0, 0.02, 0.25, 0.15));
        canvas.add_pad_with_label(spectra, "spectra");
        canvas.add_pad_with_label(ratio, "ratio");
        canvas
    }

    /// Three stacked pads: spectra on top, correction in the middle, ratio
    /// at the bottom.
    #[must_use]
    pub fn spectra_correction_ratio(
        name: impl Into<String>,
        title: impl Into<String>,
        lower_split: f64,
        upper_split: f64,
    ) -> Self {
        let name = name.into();
        let mut canvas = Self::new(name.clone(), title, Dimensions::new(750, 1150));
        let spectra = Pad::new(
            format!("{name}_spectra"),
            Vertices::new(0.0, upper_split, 1.0, 1.0),
        )
        .with_margins(Margins::new(0.02, 0.02, 0.0, 0.15));
        let correction = Pad::new(
            format!("{name}_correction"),
            Vertices::new(0.0, lower_split, 1.0, upper_split),
        )
        .with_margins(Margins::new(0.0, 0.02, 0.0, 0.15));
        let ratio = Pad::new(
            format!("{name}_ratio"),
            Vertices::new(0.0, 0.0, 1.0, lower_split),
        )
        .with_margins(Margins::new(0.0, 0.02, 0.25, 0.15));
        canvas.add_pad_with_label(spectra, "spectra");
        canvas.add_pad_with_label(correction, "correction");
        canvas.add_pad_with_label(ratio, "ratio");
        canvas
    }

    /// `columns` side-by-side panels of equal size with auto labels.
    #[must_use]
    pub fn panels(name: impl Into<String>, title: impl Into<String>, columns: usize) -> Self {
        let name = name.into();
        let columns = columns.max(1);
        let width = 1.0 / columns as f64;
        let dimensions = Dimensions::new(u32::try_from(750 * columns).unwrap_or(u32::MAX), 750);
        let mut canvas = Self::new(name.clone(), title, dimensions);
        for column in 0..columns {
            let x0 = width * column as f64;
            let x1 = if column + 1 == columns {
                1.0
            } else {
                width * (column + 1) as f64
            };
            let pad = Pad::new(format!("{name}_panel{column}"), Vertices::new(x0, 0.0, x1, 1.0))
                .with_margins(Margins::new(0.05, 0.15, 0.12, 0.15));
            canvas.add_pad(pad);
        }
        canvas
    }

    /// Appends a pad labelled with its index.
    pub fn add_pad(&mut self, pad: Pad) {
        let label = self.pads.len().to_string();
        self.add_pad_with_label(pad, label);
    }

    pub fn add_pad_with_label(&mut self, pad: Pad, label: impl Into<String>) {
        let label = label.into();
        if self.labels.contains(&label) {
            warn!(canvas = %self.name, label = %label, "duplicate pad label, last pad wins");
        }
        self.pads.push(pad);
        self.labels.push(label);
    }

    /// Replaces all pads. Missing labels default to the pad index.
    pub fn set_pads(&mut self, pads: Vec<Pad>, labels: Vec<String>) {
        if labels.len() != pads.len() {
            warn!(
                canvas = %self.name,
                pads = pads.len(),
                labels = labels.len(),
                "pad/label count mismatch, filling missing labels with indices"
            );
        }
        let mut labels = labels;
        labels.truncate(pads.len());
        for index in labels.len()..pads.len() {
            labels.push(index.to_string());
        }
        self.pads = pads;
        self.labels = labels;
        self.warn_on_duplicate_labels();
    }

    #[must_use]
    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    /// Pads for in-place edits; the pad count and labels stay fixed.
    pub fn pads_mut(&mut self) -> &mut [Pad] {
        &mut self.pads
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label to pad index; duplicate labels resolve to the last pad.
    #[must_use]
    pub fn label_index(&self) -> IndexMap<String, usize> {
        let mut index = IndexMap::with_capacity(self.labels.len());
        for (position, label) in self.labels.iter().enumerate() {
            index.insert(label.clone(), position);
        }
        index
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.dimensions.is_valid() {
            return Err(PlotError::InvalidLayout(format!(
                "canvas `{}` needs positive dimensions",
                self.name
            )));
        }
        if self.pads.is_empty() {
            return self.margins.validate();
        }
        for pad in &self.pads {
            pad.validate()?;
        }
        Ok(())
    }

    /// Materializes the root surface and one region per pad.
    ///
    /// A canvas without pads yields one full-size region carrying the canvas
    /// margins.
    pub fn realize(&self) -> PlotResult<SceneCanvas> {
        self.validate()?;
        let pads = if self.pads.is_empty() {
            let root = Pad::new(format!("{}_root", self.name), Vertices::full())
                .with_title(self.title.clone())
                .with_margins(self.margins)
                .with_options(self.options);
            vec![root.realize("0")]
        } else {
            self.pads
                .iter()
                .zip(&self.labels)
                .map(|(pad, label)| pad.realize(label.clone()))
                .collect()
        };
        Ok(SceneCanvas {
            name: self.name.clone(),
            title: self.title.clone(),
            dimensions: self.dimensions,
            options: self.options,
            pads,
        })
    }

    /// Ratio of pad areas `big / small` in normalized canvas units.
    pub fn axis_scale(&self, big: usize, small: usize) -> PlotResult<f64> {
        let big_area = self.pad_at(big)?.vertices.area();
        let small_area = self.pad_at(small)?.vertices.area();
        if small_area <= 0.0 || !small_area.is_finite() {
            return Err(PlotError::InvalidLayout(format!(
                "pad {small} of canvas `{}` has zero area",
                self.name
            )));
        }
        Ok(big_area / small_area)
    }

    /// Rescales axis title and label sizes of `hist` so text drawn in the
    /// `small` pad matches the `big` pad. Y offsets shrink by the same
    /// factor to keep their absolute distance from the axis.
    ///
    /// Call once per axis of each histogram; repeated calls compound.
    pub fn scale_axis_text(
        &self,
        big: usize,
        small: usize,
        axis: Axis,
        hist: &mut Histogram,
    ) -> PlotResult<f64> {
        let scale = self.axis_scale(big, small)?;
        let text = &mut hist.axis_mut(axis).text;
        text.title_size *= scale;
        text.label_size *= scale;
        if axis == Axis::Y {
            text.title_offset /= scale;
            text.label_offset /= scale;
        }
        Ok(scale)
    }

    fn pad_at(&self, index: usize) -> PlotResult<&Pad> {
        self.pads.get(index).ok_or(PlotError::OutOfRangeIndex {
            field: "pad",
            index,
            len: self.pads.len(),
        })
    }

    fn warn_on_duplicate_labels(&self) {
        let unique = self.label_index().len();
        if unique != self.labels.len() {
            warn!(
                canvas = %self.name,
                labels = self.labels.len(),
                unique,
                "pad labels are not unique, last pad wins"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Canvas;
    use crate::core::{Axis, Dimensions, Histogram, Vertices};
    use crate::layout::Pad;

    #[test]
    fn auto_labels_are_pad_indices() {
        let mut canvas = Canvas::new("c", "", Dimensions::default());
        for _ in 0..3 {
            canvas.add_pad(Pad::new("p", Vertices::full()));
        }
        assert_eq!(canvas.labels(), &["0", "1", "2"]);
        assert_eq!(canvas.label_index().len(), 3);
    }

    #[test]
    fn set_pads_fills_missing_labels_and_duplicates_resolve_last() {
        let mut canvas = Canvas::new("c", "", Dimensions::default());
        let pads = vec![
            Pad::new("a", Vertices::full()),
            Pad::new("b", Vertices::full()),
            Pad::new("c", Vertices::full()),
        ];
        canvas.set_pads(pads, vec!["x".to_owned(), "x".to_owned()]);
        assert_eq!(canvas.labels(), &["x", "x", "2"]);
        assert_eq!(canvas.label_index().get("x"), Some(&1));
    }

    #[test]
    fn canvas_without_pads_realizes_single_region_with_canvas_margins() {
        let canvas = Canvas::new("c", "title", Dimensions::default());
        let scene = canvas.realize().expect("realize");
        assert_eq!(scene.pads.len(), 1);
        assert_eq!(scene.pads[0].margins, canvas.margins);
        assert_eq!(scene.pads[0].label, "0");
    }

    #[test]
    fn equal_area_pads_do_not_rescale_text() {
        let canvas = Canvas::panels("c", "", 2);
        let mut hist = Histogram::new_1d("h", "", 3, 0.0, 3.0).expect("hist");
        let before = hist.axis(Axis::Y).text.clone();
        let scale = canvas
            .scale_axis_text(0, 1, Axis::Y, &mut hist)
            .expect("scale");
        assert!((scale - 1.0).abs() <= 1e-12);
        assert_eq!(hist.axis(Axis::Y).text, before);
    }

    #[test]
    fn ratio_pad_text_scales_by_area_ratio() {
        let mut canvas = Canvas::new("c", "", Dimensions::default());
        canvas.add_pad(Pad::new("a", Vertices::new(0.0, 0.3, 1.0, 1.0)));
        canvas.add_pad(Pad::new("b", Vertices::new(0.0, 0.0, 1.0, 0.3)));
        let mut hist = Histogram::new_1d("h", "", 3, 0.0, 3.0).expect("hist");
        hist.axis_mut(Axis::Y).text.title_offset = 1.4;
        let title_size = hist.axis(Axis::X).text.title_size;

        let scale = canvas
            .scale_axis_text(0, 1, Axis::X, &mut hist)
            .expect("scale x");
        assert!((scale - 7.0 / 3.0).abs() <= 1e-12);
        assert!((hist.axis(Axis::X).text.title_size - title_size * 7.0 / 3.0).abs() <= 1e-12);

        canvas
            .scale_axis_text(0, 1, Axis::Y, &mut hist)
            .expect("scale y");
        assert!((hist.axis(Axis::Y).text.title_offset - 1.4 * 3.0 / 7.0).abs() <= 1e-12);
    }

    #[test]
    fn axis_scale_rejects_unknown_pad() {
        let canvas = Canvas::spectra_ratio("c", "", 0.3);
        assert!(canvas.axis_scale(0, 5).is_err());
    }
}
