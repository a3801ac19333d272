//! Domain-level indexing and the comparisons built from it.

pub mod index;
pub mod input;
pub mod output;
pub mod wirings;

pub use index::{
    ChargeBin, CfBin, Level, Ordinal, OrdinalRange, PlotIndex, PlotIndexRange, PtBin, Species,
    Spin,
};
pub use input::{FileInput, HistInput, Input};
pub use output::{Output, OutputState, Routine};
pub use wirings::{AxisOption, Wiring};
