use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatch::index::{PlotIndex, PlotIndexRange};
use crate::dispatch::input::Input;
use crate::dispatch::wirings::{AxisOption, Wiring};
use crate::error::{PlotError, PlotResult};
use crate::io::DataFile;
use crate::routines::PlotMaker;

/// Closed set of supported comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Routine {
    SimVsData,
    RecoVsData,
    VsPtJet,
    PPVsPAu,
    CorrectSpectra,
    SpinRatios,
}

impl Routine {
    pub const ALL: [Self; 6] = [
        Self::SimVsData,
        Self::RecoVsData,
        Self::VsPtJet,
        Self::PPVsPAu,
        Self::CorrectSpectra,
        Self::SpinRatios,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SimVsData => "SimVsData",
            Self::RecoVsData => "RecoVsData",
            Self::VsPtJet => "VsPtJet",
            Self::PPVsPAu => "PPVsPAu",
            Self::CorrectSpectra => "CorrectSpectra",
            Self::SpinRatios => "SpinRatios",
        }
    }
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Routine {
    type Err = PlotError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|routine| routine.as_str() == name)
            .ok_or_else(|| PlotError::UnknownRoutine(name.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    Uninit,
    Init,
}

/// Registry of wirings sharing one base index, plot maker and naming
/// database.
#[derive(Debug)]
pub struct Output {
    index: PlotIndex,
    maker: PlotMaker,
    input: Input,
    wirings: IndexMap<Routine, Wiring>,
    state: OutputState,
}

impl Output {
    #[must_use]
    pub fn new(maker: PlotMaker, input: Input) -> Self {
        Self {
            index: PlotIndex::default(),
            maker,
            input,
            wirings: IndexMap::new(),
            state: OutputState::Uninit,
        }
    }

    #[must_use]
    pub fn state(&self) -> OutputState {
        self.state
    }

    #[must_use]
    pub fn index(&self) -> PlotIndex {
        self.index
    }

    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[must_use]
    pub fn maker(&self) -> &PlotMaker {
        &self.maker
    }

    pub fn set_maker(&mut self, maker: PlotMaker) {
        self.maker = maker;
    }

    pub fn set_input(&mut self, input: Input) {
        self.input = input;
    }

    /// Registers every routine; later calls keep the existing wirings.
    pub fn init(&mut self) {
        if self.state == OutputState::Init {
            return;
        }
        for routine in Routine::ALL {
            self.wirings.insert(routine, Wiring::new(routine, self.index));
        }
        self.state = OutputState::Init;
        debug!(wirings = self.wirings.len(), "output registry initialized");
    }

    /// Sets the base index of the registry and of every wiring.
    pub fn update_index(&mut self, index: PlotIndex) {
        self.index = index;
        for wiring in self.wirings.values_mut() {
            wiring.set_index(index);
        }
    }

    pub fn routines(&self) -> impl Iterator<Item = Routine> + '_ {
        self.wirings.keys().copied()
    }

    pub fn wiring(&self, routine: Routine) -> PlotResult<&Wiring> {
        self.wirings
            .get(&routine)
            .ok_or_else(|| PlotError::UnknownRoutine(routine.as_str().to_owned()))
    }

    /// Looks a wiring up by routine name.
    pub fn get(&self, name: &str) -> PlotResult<&Wiring> {
        self.wiring(name.parse()?)
    }

    pub fn make_1d(
        &mut self,
        name: &str,
        variable: &str,
        axis: AxisOption,
        output: &mut DataFile,
    ) -> PlotResult<()> {
        let wiring = *self.get(name)?;
        wiring.make_1d(&mut self.maker, &self.input, variable, axis, output)
    }

    pub fn make_2d(&mut self, name: &str, variable: &str, output: &mut DataFile) -> PlotResult<()> {
        let wiring = *self.get(name)?;
        wiring.make_2d(&mut self.maker, &self.input, variable, output)
    }

    /// Runs `make_1d` once per index of `range`; the base index is left at
    /// the last one.
    pub fn make_all_1d(
        &mut self,
        name: &str,
        variable: &str,
        axis: AxisOption,
        range: &PlotIndexRange,
        output: &mut DataFile,
    ) -> PlotResult<usize> {
        self.get(name)?;
        let indices = range.materialize();
        for index in &indices {
            self.update_index(*index);
            self.make_1d(name, variable, axis, output)?;
        }
        Ok(indices.len())
    }

    pub fn make_all_2d(
        &mut self,
        name: &str,
        variable: &str,
        range: &PlotIndexRange,
        output: &mut DataFile,
    ) -> PlotResult<usize> {
        self.get(name)?;
        let indices = range.materialize();
        for index in &indices {
            self.update_index(*index);
            self.make_2d(name, variable, output)?;
        }
        Ok(indices.len())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{Output, OutputState, Routine};
    use crate::dispatch::index::{PlotIndex, Species};
    use crate::dispatch::input::Input;
    use crate::error::PlotError;
    use crate::io::MemoryStorage;
    use crate::routines::PlotMaker;

    fn output() -> Output {
        Output::new(PlotMaker::new(Rc::new(MemoryStorage::new())), Input::default())
    }

    #[test]
    fn routine_names_parse_back() {
        for routine in Routine::ALL {
            assert_eq!(routine.as_str().parse::<Routine>().expect("parse"), routine);
        }
        let err = "NoSuchPlot".parse::<Routine>().expect_err("unknown");
        assert!(matches!(err, PlotError::UnknownRoutine(name) if name == "NoSuchPlot"));
    }

    #[test]
    fn lookup_before_init_is_unknown() {
        let output = output();
        assert_eq!(output.state(), OutputState::Uninit);
        assert!(matches!(
            output.get("VsPtJet"),
            Err(PlotError::UnknownRoutine(_))
        ));
    }

    #[test]
    fn init_registers_every_routine_and_update_reaches_all() {
        let mut output = output();
        output.init();
        output.init();
        assert_eq!(output.routines().count(), Routine::ALL.len());

        let index = PlotIndex::default().with_species(Species::PAu);
        output.update_index(index);
        for routine in Routine::ALL {
            assert_eq!(output.wiring(routine).expect("wiring").index(), index);
        }
    }
}
