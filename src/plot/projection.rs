use serde::{Deserialize, Serialize};

use crate::core::{Axis, Histogram, Interval, Style};
use crate::error::{PlotError, PlotResult};

/// Request to collapse a 2D histogram onto one of its axes.
///
/// The orthogonal axis is integrated over every bin that overlaps `range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub axis: Axis,
    pub range: Interval,
    pub rename: String,
    #[serde(default)]
    pub legend: String,
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub style: Style,
}

impl Projection {
    #[must_use]
    pub fn new(axis: Axis, range: Interval, rename: impl Into<String>) -> Self {
        Self {
            axis,
            range,
            rename: rename.into(),
            legend: String::new(),
            option: String::new(),
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn orthogonal_axis(&self) -> Axis {
        match self.axis {
            Axis::X => Axis::Y,
            _ => Axis::X,
        }
    }

    pub fn apply(&self, hist: &Histogram) -> PlotResult<Histogram> {
        if self.axis == Axis::Z {
            return Err(PlotError::InvalidData(
                "projection onto the z axis is not supported".to_owned(),
            ));
        }
        let slicing = hist.axis(self.orthogonal_axis());
        let first = slicing.find_bin(self.range.low).max(1);
        let last = slicing.find_bin(self.range.high).min(slicing.n_bins());
        let name = if self.rename.is_empty() {
            format!("{}_proj{:?}", hist.name, self.axis)
        } else {
            self.rename.clone()
        };
        let mut projected = hist.projection(name, self.axis, first, last)?;
        self.style.apply_to_histogram(&mut projected);
        Ok(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::Projection;
    use crate::core::{Axis, Histogram, Interval};

    #[test]
    fn projection_integrates_bins_overlapping_range() {
        let mut hist = Histogram::new_2d("h2", "", 4, 0.0, 4.0, 4, 0.0, 4.0).expect("hist");
        for ix in 1..=4 {
            for iy in 1..=4 {
                let bin = hist.bin(ix, iy, 0);
                hist.set_bin_content(bin, 1.0);
            }
        }
        let projection = Projection::new(
            Axis::X,
            Interval::new(1.0, 2.5).expect("interval"),
            "hProj",
        );
        let projected = projection.apply(&hist).expect("project");
        assert_eq!(projected.name, "hProj");
        assert_eq!(projected.dimension(), 1);
        // y bins 2 and 3 overlap [1.0, 2.5]
        assert!((projected.bin_content(1) - 2.0).abs() <= 1e-12);
    }

    #[test]
    fn projection_of_1d_histogram_fails() {
        let hist = Histogram::new_1d("h", "", 4, 0.0, 4.0).expect("hist");
        let projection = Projection::new(Axis::X, Interval::default(), "p");
        assert!(projection.apply(&hist).is_err());
    }
}
