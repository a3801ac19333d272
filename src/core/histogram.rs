//! Binned histograms with per-bin errors.
//!
//! Bins are numbered from 1 on every axis; bin 0 is the underflow and bin
//! `n + 1` the overflow. Axes beyond the histogram dimension keep a single
//! cell so that 1D and 2D histograms still carry y/z axis text attributes.

use serde::{Deserialize, Serialize};

use crate::core::style::{Color, DrawAttributes};
use crate::core::{Axis, Interval};
use crate::error::{PlotError, PlotResult};

const EDGE_TOLERANCE: f64 = 1e-9;

/// Title and label attributes attached to one histogram axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisText {
    pub title: String,
    pub title_size: f64,
    pub title_offset: f64,
    pub title_font: u16,
    pub title_color: Color,
    pub center_title: bool,
    pub label_size: f64,
    pub label_offset: f64,
    pub label_font: u16,
    pub label_color: Color,
}

impl Default for AxisText {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_size: 0.035,
            title_offset: 1.0,
            title_font: 42,
            title_color: Color::BLACK,
            center_title: false,
            label_size: 0.035,
            label_offset: 0.005,
            label_font: 42,
            label_color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinAxis {
    edges: Vec<f64>,
    #[serde(default)]
    user_range: Option<Interval>,
    #[serde(default)]
    pub text: AxisText,
}

impl BinAxis {
    pub fn uniform(n_bins: usize, low: f64, high: f64) -> PlotResult<Self> {
        if n_bins == 0 {
            return Err(PlotError::InvalidData(
                "axis must have at least one bin".to_owned(),
            ));
        }
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(PlotError::InvalidData(format!(
                "axis range must be finite with low < high (got {low}, {high})"
            )));
        }
        let width = (high - low) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| low + width * i as f64).collect();
        edges.push(high);
        Ok(Self {
            edges,
            user_range: None,
            text: AxisText::default(),
        })
    }

    pub fn variable(edges: Vec<f64>) -> PlotResult<Self> {
        if edges.len() < 2 {
            return Err(PlotError::InvalidData(
                "variable axis needs at least two edges".to_owned(),
            ));
        }
        if edges.iter().any(|edge| !edge.is_finite())
            || edges.windows(2).any(|pair| pair[0] >= pair[1])
        {
            return Err(PlotError::InvalidData(
                "axis edges must be finite and strictly increasing".to_owned(),
            ));
        }
        Ok(Self {
            edges,
            user_range: None,
            text: AxisText::default(),
        })
    }

    /// Checks the invariants `uniform` and `variable` establish, for axes
    /// that arrived through deserialization.
    pub fn validate(&self) -> PlotResult<()> {
        match self.edge_problem() {
            Some(problem) => Err(PlotError::InvalidData(problem)),
            None => Ok(()),
        }
    }

    fn edge_problem(&self) -> Option<String> {
        if self.edges.len() < 2 {
            return Some(format!(
                "axis has {} edges, needs at least two",
                self.edges.len()
            ));
        }
        if self.edges.iter().any(|edge| !edge.is_finite())
            || self.edges.windows(2).any(|pair| pair[0] >= pair[1])
        {
            return Some("axis edges must be finite and strictly increasing".to_owned());
        }
        None
    }

    fn placeholder() -> Self {
        Self {
            edges: vec![0.0, 1.0],
            user_range: None,
            text: AxisText::default(),
        }
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.edges[0]
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the bin containing `value`: 0 below the axis, `n + 1` at or
    /// above the upper edge.
    #[must_use]
    pub fn find_bin(&self, value: f64) -> usize {
        if value.is_nan() || value < self.low() {
            return 0;
        }
        if value >= self.high() {
            return self.n_bins() + 1;
        }
        // First edge strictly greater than value is the upper edge of its bin.
        self.edges.partition_point(|edge| *edge <= value)
    }

    /// Low edge of `bin`; flows report the axis limits.
    #[must_use]
    pub fn bin_low_edge(&self, bin: usize) -> f64 {
        match bin {
            0 => f64::NEG_INFINITY,
            b if b > self.n_bins() => self.high(),
            b => self.edges[b - 1],
        }
    }

    #[must_use]
    pub fn bin_up_edge(&self, bin: usize) -> f64 {
        match bin {
            0 => self.low(),
            b if b > self.n_bins() => f64::INFINITY,
            b => self.edges[b],
        }
    }

    #[must_use]
    pub fn bin_center(&self, bin: usize) -> f64 {
        let bin = bin.clamp(1, self.n_bins());
        0.5 * (self.edges[bin - 1] + self.edges[bin])
    }

    #[must_use]
    pub fn bin_width(&self, bin: usize) -> f64 {
        let bin = bin.clamp(1, self.n_bins());
        self.edges[bin] - self.edges[bin - 1]
    }

    /// Bin whose center lies closest to `value`, restricted to in-range bins.
    #[must_use]
    pub fn nearest_bin(&self, value: f64) -> usize {
        let bin = self.find_bin(value);
        if bin == 0 {
            1
        } else if bin > self.n_bins() {
            self.n_bins()
        } else {
            bin
        }
    }

    #[must_use]
    pub fn same_binning(&self, other: &Self) -> bool {
        self.edges.len() == other.edges.len()
            && self
                .edges
                .iter()
                .zip(&other.edges)
                .all(|(a, b)| (a - b).abs() <= EDGE_TOLERANCE * (1.0 + a.abs()))
    }

    pub fn set_range(&mut self, range: Interval) {
        self.user_range = Some(range);
    }

    pub fn clear_range(&mut self) {
        self.user_range = None;
    }

    #[must_use]
    pub fn user_range(&self) -> Option<Interval> {
        self.user_range
    }

    /// Visible interval: the user range when set, else the full axis.
    #[must_use]
    pub fn visible_range(&self) -> Interval {
        self.user_range.unwrap_or(Interval {
            low: self.low(),
            high: self.high(),
        })
    }

    fn rebinned(&self, group: usize) -> Self {
        let kept = self.n_bins() / group;
        let edges = (0..=kept).map(|i| self.edges[i * group]).collect();
        Self {
            edges,
            user_range: self.user_range,
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub name: String,
    pub title: String,
    dimension: usize,
    axes: [BinAxis; 3],
    contents: Vec<f64>,
    sumw2: Vec<f64>,
    #[serde(default)]
    pub attributes: DrawAttributes,
    #[serde(default)]
    minimum: Option<f64>,
    #[serde(default)]
    maximum: Option<f64>,
    #[serde(default)]
    entries: f64,
}

impl Histogram {
    pub fn new_1d(
        name: impl Into<String>,
        title: impl Into<String>,
        n_bins: usize,
        low: f64,
        high: f64,
    ) -> PlotResult<Self> {
        let x = BinAxis::uniform(n_bins, low, high)?;
        Ok(Self::from_axes(name, title, vec![x]))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_2d(
        name: impl Into<String>,
        title: impl Into<String>,
        nx: usize,
        x_low: f64,
        x_high: f64,
        ny: usize,
        y_low: f64,
        y_high: f64,
    ) -> PlotResult<Self> {
        let x = BinAxis::uniform(nx, x_low, x_high)?;
        let y = BinAxis::uniform(ny, y_low, y_high)?;
        Ok(Self::from_axes(name, title, vec![x, y]))
    }

    /// Builds an empty histogram over `axes` (1 to 3 of them).
    ///
    /// Extra axes are ignored; missing ones get a single placeholder cell.
    #[must_use]
    pub fn from_axes(
        name: impl Into<String>,
        title: impl Into<String>,
        axes: Vec<BinAxis>,
    ) -> Self {
        let dimension = axes.len().clamp(1, 3);
        let mut iter = axes.into_iter();
        let x = iter.next().unwrap_or_else(BinAxis::placeholder);
        let y = iter.next().unwrap_or_else(BinAxis::placeholder);
        let z = iter.next().unwrap_or_else(BinAxis::placeholder);
        let mut hist = Self {
            name: name.into(),
            title: title.into(),
            dimension,
            axes: [x, y, z],
            contents: Vec::new(),
            sumw2: Vec::new(),
            attributes: DrawAttributes::default(),
            minimum: None,
            maximum: None,
            entries: 0.0,
        };
        let cells = hist.n_cells();
        hist.contents = vec![0.0; cells];
        hist.sumw2 = vec![0.0; cells];
        hist
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Rejects deserialized histograms whose axes or cell storage are
    /// inconsistent, naming the offending object.
    pub fn validate(&self) -> PlotResult<()> {
        let invalid = |reason: String| {
            PlotError::InvalidData(format!("histogram `{}`: {reason}", self.name))
        };
        if !(1..=3).contains(&self.dimension) {
            return Err(invalid(format!("dimension {} is not 1, 2 or 3", self.dimension)));
        }
        for axis in Axis::ALL {
            if let Some(problem) = self.axis(axis).edge_problem() {
                return Err(invalid(format!("{axis:?} {problem}")));
            }
        }
        let cells = self.n_cells();
        if self.contents.len() != cells || self.sumw2.len() != cells {
            return Err(invalid(format!(
                "{} contents and {} sumw2 entries for {cells} cells",
                self.contents.len(),
                self.sumw2.len()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> &BinAxis {
        &self.axes[axis.index()]
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut BinAxis {
        &mut self.axes[axis.index()]
    }

    #[must_use]
    pub fn is_active(&self, axis: Axis) -> bool {
        axis.index() < self.dimension
    }

    fn cells_along(&self, axis: Axis) -> usize {
        if self.is_active(axis) {
            self.axis(axis).n_bins() + 2
        } else {
            1
        }
    }

    fn n_cells(&self) -> usize {
        Axis::ALL
            .iter()
            .map(|axis| self.cells_along(*axis))
            .product()
    }

    /// Global cell index for per-axis bin numbers.
    #[must_use]
    pub fn bin(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let cx = self.cells_along(Axis::X);
        let cy = self.cells_along(Axis::Y);
        let iy = if self.is_active(Axis::Y) { iy } else { 0 };
        let iz = if self.is_active(Axis::Z) { iz } else { 0 };
        ix + cx * (iy + cy * iz)
    }

    /// Inverse of [`Histogram::bin`].
    #[must_use]
    pub fn bin_xyz(&self, global: usize) -> (usize, usize, usize) {
        let cx = self.cells_along(Axis::X);
        let cy = self.cells_along(Axis::Y);
        (global % cx, (global / cx) % cy, global / (cx * cy))
    }

    #[must_use]
    pub fn find_bin(&self, x: f64, y: f64, z: f64) -> usize {
        let ix = self.axis(Axis::X).find_bin(x);
        let iy = if self.is_active(Axis::Y) {
            self.axis(Axis::Y).find_bin(y)
        } else {
            0
        };
        let iz = if self.is_active(Axis::Z) {
            self.axis(Axis::Z).find_bin(z)
        } else {
            0
        };
        self.bin(ix, iy, iz)
    }

    /// Global indices of all in-range (non-flow) cells in storage order.
    #[must_use]
    pub fn in_range_bins(&self) -> Vec<usize> {
        let ranges = Axis::ALL.map(|axis| {
            if self.is_active(axis) {
                (1, self.axis(axis).n_bins())
            } else {
                (0, 0)
            }
        });
        let mut bins = Vec::new();
        for iz in ranges[2].0..=ranges[2].1 {
            for iy in ranges[1].0..=ranges[1].1 {
                for ix in ranges[0].0..=ranges[0].1 {
                    bins.push(self.bin(ix, iy, iz));
                }
            }
        }
        bins
    }

    #[must_use]
    pub fn bin_content(&self, global: usize) -> f64 {
        self.contents.get(global).copied().unwrap_or(0.0)
    }

    pub fn set_bin_content(&mut self, global: usize, value: f64) {
        if let Some(slot) = self.contents.get_mut(global) {
            *slot = value;
        }
    }

    #[must_use]
    pub fn bin_error(&self, global: usize) -> f64 {
        self.sumw2.get(global).copied().unwrap_or(0.0).sqrt()
    }

    pub fn set_bin_error(&mut self, global: usize, error: f64) {
        if let Some(slot) = self.sumw2.get_mut(global) {
            *slot = error * error;
        }
    }

    pub fn fill(&mut self, x: f64, weight: f64) {
        let bin = self.find_bin(x, 0.0, 0.0);
        self.fill_bin(bin, weight);
    }

    pub fn fill_2d(&mut self, x: f64, y: f64, weight: f64) {
        let bin = self.find_bin(x, y, 0.0);
        self.fill_bin(bin, weight);
    }

    fn fill_bin(&mut self, global: usize, weight: f64) {
        self.contents[global] += weight;
        self.sumw2[global] += weight * weight;
        self.entries += 1.0;
    }

    #[must_use]
    pub fn entries(&self) -> f64 {
        self.entries
    }

    /// Sums contents over the inclusive per-axis bin ranges `[first, last]`.
    ///
    /// Ranges of inactive axes are ignored.
    #[must_use]
    pub fn integral_bins(&self, ranges: [(usize, usize); 3]) -> f64 {
        let clamp = |axis: Axis, (first, last): (usize, usize)| {
            if self.is_active(axis) {
                let top = self.axis(axis).n_bins() + 1;
                (first.min(top), last.min(top))
            } else {
                (0, 0)
            }
        };
        let [rx, ry, rz] = [
            clamp(Axis::X, ranges[0]),
            clamp(Axis::Y, ranges[1]),
            clamp(Axis::Z, ranges[2]),
        ];
        let mut sum = 0.0;
        for iz in rz.0..=rz.1 {
            for iy in ry.0..=ry.1 {
                for ix in rx.0..=rx.1 {
                    sum += self.contents[self.bin(ix, iy, iz)];
                }
            }
        }
        sum
    }

    /// Sum over `[first, last]` on the x axis (all in-range bins on others).
    #[must_use]
    pub fn integral_x(&self, first: usize, last: usize) -> f64 {
        let full = |axis: Axis| (1, self.axis(axis).n_bins());
        self.integral_bins([(first, last), full(Axis::Y), full(Axis::Z)])
    }

    /// Sum over all in-range bins.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral_x(1, self.axis(Axis::X).n_bins())
    }

    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.contents {
            *value *= factor;
        }
        let squared = factor * factor;
        for value in &mut self.sumw2 {
            *value *= squared;
        }
    }

    /// Zeroes contents, errors and entries; binning and attributes stay.
    pub fn reset(&mut self) {
        self.contents.fill(0.0);
        self.sumw2.fill(0.0);
        self.entries = 0.0;
    }

    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.name = name.into();
        copy
    }

    #[must_use]
    pub fn minimum(&self) -> Option<f64> {
        self.minimum
    }

    #[must_use]
    pub fn maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn set_minimum(&mut self, value: f64) {
        self.minimum = Some(value);
    }

    pub fn set_maximum(&mut self, value: f64) {
        self.maximum = Some(value);
    }

    /// Largest in-range bin content.
    #[must_use]
    pub fn max_content(&self) -> f64 {
        self.in_range_bins()
            .into_iter()
            .map(|bin| self.contents[bin])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    #[must_use]
    pub fn same_binning(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && Axis::ALL
                .iter()
                .filter(|axis| self.is_active(**axis))
                .all(|axis| self.axis(*axis).same_binning(other.axis(*axis)))
    }

    /// Merges every `group` consecutive bins along `axis`.
    ///
    /// Trailing bins that do not fill a whole group move to the overflow.
    pub fn rebin(&self, axis: Axis, group: usize) -> PlotResult<Self> {
        if group == 0 {
            return Err(PlotError::InvalidData(
                "rebin group must be >= 1".to_owned(),
            ));
        }
        if !self.is_active(axis) {
            return Err(PlotError::InvalidData(format!(
                "cannot rebin axis {axis:?} of a {}D histogram `{}`",
                self.dimension, self.name
            )));
        }
        if group == 1 {
            return Ok(self.clone());
        }
        let old_n = self.axis(axis).n_bins();
        if group > old_n {
            return Err(PlotError::InvalidData(format!(
                "rebin group {group} exceeds {old_n} bins of `{}`",
                self.name
            )));
        }

        let mut rebinned = self.clone();
        rebinned.axes[axis.index()] = self.axis(axis).rebinned(group);
        let new_n = rebinned.axis(axis).n_bins();
        let cells = rebinned.n_cells();
        rebinned.contents = vec![0.0; cells];
        rebinned.sumw2 = vec![0.0; cells];

        let map_bin = |bin: usize| -> usize {
            if bin == 0 {
                0
            } else if bin > old_n {
                new_n + 1
            } else {
                ((bin - 1) / group + 1).min(new_n + 1)
            }
        };

        for global in 0..self.contents.len() {
            let (ix, iy, iz) = self.bin_xyz(global);
            let mut coords = [ix, iy, iz];
            coords[axis.index()] = map_bin(coords[axis.index()]);
            let target = rebinned.bin(coords[0], coords[1], coords[2]);
            rebinned.contents[target] += self.contents[global];
            rebinned.sumw2[target] += self.sumw2[global];
        }
        Ok(rebinned)
    }

    /// Sets `self = (c1 * numer) / (c2 * denom)` bin by bin.
    ///
    /// All three histograms must share binning. Bins with a zero denominator
    /// are left empty.
    pub fn divide(&mut self, numer: &Self, denom: &Self, c1: f64, c2: f64) -> PlotResult<()> {
        self.require_same_binning(numer)?;
        self.require_same_binning(denom)?;
        if c2 == 0.0 {
            return Err(PlotError::InvalidData(
                "divide weight for the denominator must be non-zero".to_owned(),
            ));
        }
        for global in 0..self.contents.len() {
            let n = numer.contents[global];
            let d = denom.contents[global];
            if d == 0.0 {
                self.contents[global] = 0.0;
                self.sumw2[global] = 0.0;
                continue;
            }
            let e1sq = numer.sumw2[global];
            let e2sq = denom.sumw2[global];
            self.contents[global] = (c1 * n) / (c2 * d);
            let d2 = d * d;
            self.sumw2[global] = c1 * c1 * (e1sq * d2 + e2sq * n * n) / (c2 * c2 * d2 * d2);
        }
        Ok(())
    }

    /// Multiplies contents bin by bin with errors added in quadrature.
    pub fn multiply(&mut self, other: &Self) -> PlotResult<()> {
        self.require_same_binning(other)?;
        for global in 0..self.contents.len() {
            let a = self.contents[global];
            let b = other.contents[global];
            self.sumw2[global] = self.sumw2[global] * b * b + other.sumw2[global] * a * a;
            self.contents[global] = a * b;
        }
        Ok(())
    }

    /// Projects a 2D histogram onto `axis`, integrating the orthogonal axis
    /// over bins `[first, last]`.
    pub fn projection(
        &self,
        name: impl Into<String>,
        axis: Axis,
        first: usize,
        last: usize,
    ) -> PlotResult<Self> {
        if self.dimension != 2 || axis == Axis::Z {
            return Err(PlotError::InvalidData(format!(
                "projection onto {axis:?} needs a 2D histogram (`{}` is {}D)",
                self.name, self.dimension
            )));
        }
        let other = if axis == Axis::X { Axis::Y } else { Axis::X };
        let top = self.axis(other).n_bins() + 1;
        let (first, last) = (first.min(top), last.min(top));

        let mut kept = self.axis(axis).clone();
        kept.clear_range();
        let mut projected = Self::from_axes(name, self.title.clone(), vec![kept]);
        projected.attributes = self.attributes;
        for bin in 0..=self.axis(axis).n_bins() + 1 {
            let mut sum = 0.0;
            let mut sumw2 = 0.0;
            for orth in first..=last {
                let global = if axis == Axis::X {
                    self.bin(bin, orth, 0)
                } else {
                    self.bin(orth, bin, 0)
                };
                sum += self.contents[global];
                sumw2 += self.sumw2[global];
            }
            projected.contents[bin] = sum;
            projected.sumw2[bin] = sumw2;
        }
        projected.entries = self.entries;
        Ok(projected)
    }

    fn require_same_binning(&self, other: &Self) -> PlotResult<()> {
        if self.same_binning(other) {
            Ok(())
        } else {
            Err(PlotError::ShapeMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BinAxis, Histogram};
    use crate::core::Axis;

    fn filled_1d(name: &str, contents: &[f64]) -> Histogram {
        let mut hist =
            Histogram::new_1d(name, "", contents.len(), 0.0, contents.len() as f64).expect("hist");
        for (i, value) in contents.iter().enumerate() {
            hist.set_bin_content(i + 1, *value);
            hist.set_bin_error(i + 1, value.abs().sqrt());
        }
        hist
    }

    #[test]
    fn find_bin_uses_flows_at_the_edges() {
        let axis = BinAxis::uniform(4, 0.0, 4.0).expect("axis");
        assert_eq!(axis.find_bin(-0.1), 0);
        assert_eq!(axis.find_bin(0.0), 1);
        assert_eq!(axis.find_bin(1.5), 2);
        assert_eq!(axis.find_bin(3.999), 4);
        assert_eq!(axis.find_bin(4.0), 5);
        assert_eq!(axis.nearest_bin(10.0), 4);
    }

    #[test]
    fn variable_axis_rejects_unsorted_edges() {
        assert!(BinAxis::variable(vec![0.0, 2.0, 1.0]).is_err());
        let axis = BinAxis::variable(vec![0.0, 1.0, 3.0]).expect("axis");
        assert!((axis.bin_center(2) - 2.0).abs() <= 1e-12);
        assert!((axis.bin_width(2) - 2.0).abs() <= 1e-12);
    }

    #[test]
    fn rebin_sums_groups_and_moves_remainder_to_overflow() {
        let hist = filled_1d("h", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let rebinned = hist.rebin(Axis::X, 2).expect("rebin");
        assert_eq!(rebinned.axis(Axis::X).n_bins(), 2);
        assert!((rebinned.bin_content(1) - 3.0).abs() <= 1e-12);
        assert!((rebinned.bin_content(2) - 7.0).abs() <= 1e-12);
        assert!((rebinned.bin_content(3) - 5.0).abs() <= 1e-12);
        assert!((rebinned.integral() - 10.0).abs() <= 1e-12);
    }

    #[test]
    fn rebin_rejects_inactive_axis() {
        let hist = filled_1d("h", &[1.0, 2.0]);
        assert!(hist.rebin(Axis::Y, 2).is_err());
        assert!(hist.rebin(Axis::X, 0).is_err());
    }

    #[test]
    fn rebin_2d_along_y_keeps_x_binning() {
        let mut hist = Histogram::new_2d("h2", "", 2, 0.0, 2.0, 4, 0.0, 4.0).expect("hist");
        for ix in 1..=2 {
            for iy in 1..=4 {
                let bin = hist.bin(ix, iy, 0);
                hist.set_bin_content(bin, (ix * 10 + iy) as f64);
            }
        }
        let rebinned = hist.rebin(Axis::Y, 2).expect("rebin");
        assert_eq!(rebinned.axis(Axis::X).n_bins(), 2);
        assert_eq!(rebinned.axis(Axis::Y).n_bins(), 2);
        assert!((rebinned.bin_content(rebinned.bin(1, 1, 0)) - 23.0).abs() <= 1e-12);
        assert!((rebinned.bin_content(rebinned.bin(2, 2, 0)) - 47.0).abs() <= 1e-12);
    }

    #[test]
    fn divide_propagates_errors_and_leaves_zero_denominators_empty() {
        let numer = filled_1d("n", &[6.0, 6.0, 6.0]);
        let denom = filled_1d("d", &[2.0, 0.0, 2.0]);
        let mut ratio = denom.renamed("r");
        ratio.reset();
        ratio.divide(&numer, &denom, 1.0, 1.0).expect("divide");

        assert!((ratio.bin_content(1) - 3.0).abs() <= 1e-12);
        assert_eq!(ratio.bin_content(2), 0.0);
        assert_eq!(ratio.bin_error(2), 0.0);
        let expected = 3.0 * ((6.0_f64.sqrt() / 6.0).powi(2) + (2.0_f64.sqrt() / 2.0).powi(2)).sqrt();
        assert!((ratio.bin_error(1) - expected).abs() <= 1e-12);
    }

    #[test]
    fn divide_reports_shape_mismatch() {
        let numer = filled_1d("n", &[1.0, 2.0, 3.0]);
        let denom = filled_1d("d", &[1.0, 2.0]);
        let mut ratio = denom.clone();
        let err = ratio
            .divide(&numer, &denom, 1.0, 1.0)
            .expect_err("binning differs");
        assert!(format!("{err}").contains("binning mismatch"));
    }

    #[test]
    fn projection_integrates_orthogonal_range() {
        let mut hist = Histogram::new_2d("h2", "", 2, 0.0, 2.0, 3, 0.0, 3.0).expect("hist");
        for ix in 1..=2 {
            for iy in 1..=3 {
                let bin = hist.bin(ix, iy, 0);
                hist.set_bin_content(bin, iy as f64);
            }
        }
        let px = hist.projection("px", Axis::X, 2, 3).expect("projection");
        assert_eq!(px.dimension(), 1);
        assert!((px.bin_content(1) - 5.0).abs() <= 1e-12);
        assert!((px.bin_content(2) - 5.0).abs() <= 1e-12);

        let py = hist.projection("py", Axis::Y, 1, 2).expect("projection");
        assert!((py.bin_content(3) - 6.0).abs() <= 1e-12);
    }

    #[test]
    fn fills_count_entries_and_max_ignores_flows() {
        let mut hist = Histogram::new_1d("h", "", 3, 0.0, 3.0).expect("hist");
        hist.fill(0.5, 2.0);
        hist.fill(1.5, 5.0);
        hist.fill(-1.0, 50.0);
        assert!((hist.entries() - 3.0).abs() <= 1e-12);
        assert!((hist.max_content() - 5.0).abs() <= 1e-12);
        assert!((hist.bin_content(0) - 50.0).abs() <= 1e-12);
    }

    #[test]
    fn validate_rejects_storage_that_disagrees_with_axes() {
        let short: Histogram = serde_json::from_str(
            r#"{"name":"hShort","title":"","dimension":1,
                "axes":[{"edges":[0,1,2]},{"edges":[0,1]},{"edges":[0,1]}],
                "contents":[],"sumw2":[]}"#,
        )
        .expect("well-formed json");
        let err = short.validate().expect_err("no cells stored");
        assert!(format!("{err}").contains("hShort"));

        let unsorted: Histogram = serde_json::from_str(
            r#"{"name":"hUnsorted","title":"","dimension":1,
                "axes":[{"edges":[2,1]},{"edges":[0,1]},{"edges":[0,1]}],
                "contents":[0,0,0],"sumw2":[0,0,0]}"#,
        )
        .expect("well-formed json");
        assert!(unsorted.validate().is_err());

        let hist = filled_1d("h", &[1.0, 2.0]);
        let restored: Histogram =
            serde_json::from_str(&serde_json::to_string(&hist).expect("serialize"))
                .expect("deserialize");
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn scale_scales_errors_linearly() {
        let mut hist = filled_1d("h", &[4.0]);
        hist.scale(0.5);
        assert!((hist.bin_content(1) - 2.0).abs() <= 1e-12);
        assert!((hist.bin_error(1) - 1.0).abs() <= 1e-12);
    }
}
