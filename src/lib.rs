//! jetplot: histogram composition for jet-substructure figures.
//!
//! Declarative plot requests (inputs, options, canvas layouts) are turned
//! into multi-pad figures: histograms are fetched, rebinned, normalized,
//! divided and styled, placed into pads with legends, then written to an
//! output file. The `dispatch` layer expands a domain index into those
//! requests.

pub mod core;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod layout;
pub mod plot;
pub mod render;
pub mod routines;
pub mod telemetry;
pub mod tools;

pub use dispatch::{AxisOption, Input, Output, PlotIndex, PlotIndexRange, Routine};
pub use error::{PlotError, PlotResult};
pub use routines::{PlotMaker, PlotRoutine};
