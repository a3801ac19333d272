use serde::{Deserialize, Serialize};

use crate::core::histogram::Histogram;
use crate::core::{Axis, Interval};

/// Per-axis closed intervals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Range {
    #[must_use]
    pub const fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn get(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, interval: Interval) {
        match axis {
            Axis::X => self.x = interval,
            Axis::Y => self.y = interval,
            Axis::Z => self.z = interval,
        }
    }

    /// Applies the interval of `axis` to the histogram.
    ///
    /// Binned axes get a user range. The value axis (y of a 1D histogram,
    /// z of a 2D one) gets display minimum and maximum only; its placeholder
    /// axis is left untouched.
    pub fn apply(&self, axis: Axis, hist: &mut Histogram) {
        let interval = self.get(axis);
        if hist.is_active(axis) {
            hist.axis_mut(axis).set_range(interval);
        } else if axis.index() == hist.dimension() {
            hist.set_minimum(interval.low);
            hist.set_maximum(interval.high);
        }
    }

    pub fn apply_xy(&self, hist: &mut Histogram) {
        self.apply(Axis::X, hist);
        self.apply(Axis::Y, hist);
    }

    pub fn apply_all(&self, hist: &mut Histogram) {
        for axis in Axis::ALL {
            self.apply(axis, hist);
        }
    }

    /// Inclusive bin ranges covering each interval, for integrals.
    #[must_use]
    pub fn bin_ranges(&self, hist: &Histogram) -> [(usize, usize); 3] {
        Axis::ALL.map(|axis| {
            if hist.is_active(axis) {
                let interval = self.get(axis);
                let bin_axis = hist.axis(axis);
                (bin_axis.find_bin(interval.low), bin_axis.find_bin(interval.high))
            } else {
                (0, 0)
            }
        })
    }
}
