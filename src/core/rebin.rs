use serde::{Deserialize, Serialize};

use crate::core::Axis;
use crate::core::histogram::Histogram;
use crate::error::PlotResult;

/// Merge request for one histogram axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebin {
    pub axis: Axis,
    pub group: usize,
    pub enabled: bool,
}

impl Default for Rebin {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            group: 1,
            enabled: false,
        }
    }
}

impl Rebin {
    #[must_use]
    pub const fn new(axis: Axis, group: usize) -> Self {
        Self {
            axis,
            group,
            enabled: true,
        }
    }

    /// Returns the rebinned histogram, or a plain copy when disabled.
    pub fn apply(&self, hist: &Histogram) -> PlotResult<Histogram> {
        if !self.enabled || self.group <= 1 {
            return Ok(hist.clone());
        }
        hist.rebin(self.axis, self.group)
    }
}
