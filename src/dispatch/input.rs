//! File and histogram naming database.
//!
//! Every name the dispatch layer composes is a pure function of this
//! database and a [`PlotIndex`]: unconstrained fields contribute nothing.

use serde::{Deserialize, Serialize};

use crate::dispatch::index::{ChargeBin, CfBin, Level, Ordinal, PlotIndex, PtBin, Species, Spin};
use crate::error::{PlotError, PlotResult};

/// Input files by species and level plus their tags and legends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInput {
    /// `files[species][level]`.
    pub files: Vec<Vec<String>>,
    pub species_tags: Vec<String>,
    pub species_legends: Vec<String>,
    pub level_tags: Vec<String>,
    pub level_legends: Vec<String>,
}

impl Default for FileInput {
    fn default() -> Self {
        let files = ["pp", "pau"]
            .iter()
            .map(|species| {
                ["data", "reco", "true"]
                    .iter()
                    .map(|level| format!("input/{species}_{level}.json"))
                    .collect()
            })
            .collect();
        Self {
            files,
            species_tags: strings(["PP", "PAu"]),
            species_legends: strings(["p+p", "p+Au"]),
            level_tags: strings(["Data", "Reco", "True"]),
            level_legends: strings(["Data", "Reco.", "Truth"]),
        }
    }
}

impl FileInput {
    pub fn file(&self, species: Species, level: Level) -> PlotResult<&str> {
        let row = self
            .files
            .get(species.index())
            .ok_or(PlotError::OutOfRangeIndex {
                field: Species::FIELD,
                index: species.index(),
                len: self.files.len(),
            })?;
        lookup(row, Level::FIELD, level.index())
    }

    pub fn species_tag(&self, species: Species) -> PlotResult<&str> {
        lookup(&self.species_tags, Species::FIELD, species.index())
    }

    pub fn species_legend(&self, species: Species) -> PlotResult<&str> {
        lookup(&self.species_legends, Species::FIELD, species.index())
    }

    pub fn level_tag(&self, level: Level) -> PlotResult<&str> {
        lookup(&self.level_tags, Level::FIELD, level.index())
    }

    pub fn level_legend(&self, level: Level) -> PlotResult<&str> {
        lookup(&self.level_legends, Level::FIELD, level.index())
    }

    pub fn validate(&self) -> PlotResult<()> {
        check_list("species tags", &self.species_tags)?;
        check_list("level tags", &self.level_tags)?;
        check_parallel("species", &self.species_tags, &self.species_legends)?;
        check_parallel("level", &self.level_tags, &self.level_legends)?;
        if self.files.len() != self.species_tags.len() {
            return Err(PlotError::InvalidData(format!(
                "{} file rows for {} species",
                self.files.len(),
                self.species_tags.len()
            )));
        }
        for row in &self.files {
            if row.len() != self.level_tags.len() {
                return Err(PlotError::InvalidData(format!(
                    "file row has {} entries for {} levels",
                    row.len(),
                    self.level_tags.len()
                )));
            }
        }
        Ok(())
    }
}

/// Tags and legends of the histogram buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistInput {
    pub pt_tags: Vec<String>,
    pub pt_legends: Vec<String>,
    pub cf_tags: Vec<String>,
    pub cf_legends: Vec<String>,
    pub charge_tags: Vec<String>,
    pub charge_legends: Vec<String>,
    pub spin_tags: Vec<String>,
    pub spin_legends: Vec<String>,
}

impl Default for HistInput {
    fn default() -> Self {
        Self {
            pt_tags: strings(["Pt5", "Pt10", "Pt15"]),
            pt_legends: strings([
                "p_{T}^{jet} #in (5, 10) GeV/c",
                "p_{T}^{jet} #in (10, 15) GeV/c",
                "p_{T}^{jet} > 15 GeV/c",
            ]),
            cf_tags: strings(["CFLab", "CFJet"]),
            cf_legends: strings(["lab frame", "jet frame"]),
            charge_tags: strings(["Neg", "Neu", "Pos"]),
            charge_legends: strings(["Q_{jet} < 0", "Q_{jet} = 0", "Q_{jet} > 0"]),
            spin_tags: strings([
                "BU", "BD", "YU", "YD", "BUYU", "BUYD", "BDYU", "BDYD", "Int",
            ]),
            spin_legends: strings([
                "B#uparrow",
                "B#downarrow",
                "Y#uparrow",
                "Y#downarrow",
                "B#uparrowY#uparrow",
                "B#uparrowY#downarrow",
                "B#downarrowY#uparrow",
                "B#downarrowY#downarrow",
                "spin integrated",
            ]),
        }
    }
}

impl HistInput {
    pub fn pt_tag(&self, pt: PtBin) -> PlotResult<&str> {
        lookup(&self.pt_tags, PtBin::FIELD, pt.index())
    }

    pub fn pt_legend(&self, pt: PtBin) -> PlotResult<&str> {
        lookup(&self.pt_legends, PtBin::FIELD, pt.index())
    }

    pub fn cf_tag(&self, cf: CfBin) -> PlotResult<&str> {
        lookup(&self.cf_tags, CfBin::FIELD, cf.index())
    }

    pub fn cf_legend(&self, cf: CfBin) -> PlotResult<&str> {
        lookup(&self.cf_legends, CfBin::FIELD, cf.index())
    }

    pub fn charge_tag(&self, charge: ChargeBin) -> PlotResult<&str> {
        lookup(&self.charge_tags, ChargeBin::FIELD, charge.index())
    }

    pub fn charge_legend(&self, charge: ChargeBin) -> PlotResult<&str> {
        lookup(&self.charge_legends, ChargeBin::FIELD, charge.index())
    }

    pub fn spin_tag(&self, spin: Spin) -> PlotResult<&str> {
        lookup(&self.spin_tags, Spin::FIELD, spin.index())
    }

    pub fn spin_legend(&self, spin: Spin) -> PlotResult<&str> {
        lookup(&self.spin_legends, Spin::FIELD, spin.index())
    }

    pub fn validate(&self) -> PlotResult<()> {
        check_parallel("pt", &self.pt_tags, &self.pt_legends)?;
        check_parallel("cf", &self.cf_tags, &self.cf_legends)?;
        check_parallel("charge", &self.charge_tags, &self.charge_legends)?;
        check_parallel("spin", &self.spin_tags, &self.spin_legends)
    }
}

/// The complete naming database.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub files: FileInput,
    #[serde(default)]
    pub hists: HistInput,
}

impl Input {
    #[must_use]
    pub fn new(files: FileInput, hists: HistInput) -> Self {
        Self { files, hists }
    }

    pub fn from_json_str(json: &str) -> PlotResult<Self> {
        let input: Self = serde_json::from_str(json)
            .map_err(|err| PlotError::Serialization(format!("naming database: {err}")))?;
        input.validate()?;
        Ok(input)
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PlotError::Serialization(format!("naming database: {err}")))
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.files.validate()?;
        self.hists.validate()
    }

    /// Source file of `index`; species and level must both be set.
    pub fn file(&self, index: &PlotIndex) -> PlotResult<&str> {
        match (index.species, index.level) {
            (Some(species), Some(level)) => self.files.file(species, level),
            _ => Err(PlotError::InvalidData(format!(
                "file lookup needs species and level (got {:?})",
                index.ordinals()
            ))),
        }
    }

    /// `"h" + tag + level + variable + "Stat_" + pt + cf + spin`.
    pub fn hist_name(&self, variable: &str, index: &PlotIndex, tag: &str) -> PlotResult<String> {
        let mut name = format!("h{tag}");
        if let Some(level) = index.level {
            name.push_str(self.files.level_tag(level)?);
        }
        name.push_str(variable);
        name.push_str("Stat_");
        for token in [
            index.pt.map(|pt| self.hists.pt_tag(pt)),
            index.cf.map(|cf| self.hists.cf_tag(cf)),
            index.spin.map(|spin| self.hists.spin_tag(spin)),
        ]
        .into_iter()
        .flatten()
        {
            name.push_str(token?);
        }
        Ok(name)
    }

    /// Legends of the set fields in species, level, spin, pt, charge, cf
    /// order, joined by `", "`.
    pub fn legend(&self, index: &PlotIndex) -> PlotResult<String> {
        let parts = [
            index.species.map(|species| self.files.species_legend(species)),
            index.level.map(|level| self.files.level_legend(level)),
            index.spin.map(|spin| self.hists.spin_legend(spin)),
            index.pt.map(|pt| self.hists.pt_legend(pt)),
            index.charge.map(|charge| self.hists.charge_legend(charge)),
            index.cf.map(|cf| self.hists.cf_legend(cf)),
        ]
        .into_iter()
        .flatten()
        .collect::<PlotResult<Vec<_>>>()?;
        Ok(parts.join(", "))
    }

    /// `base + "_" + species + level + "_" + pt + charge + cf + spin`;
    /// empty segments and their separators are dropped.
    pub fn canvas_name(&self, base: &str, index: &PlotIndex) -> PlotResult<String> {
        let sample = [
            index.species.map(|species| self.files.species_tag(species)),
            index.level.map(|level| self.files.level_tag(level)),
        ];
        let bucket = [
            index.pt.map(|pt| self.hists.pt_tag(pt)),
            index.charge.map(|charge| self.hists.charge_tag(charge)),
            index.cf.map(|cf| self.hists.cf_tag(cf)),
            index.spin.map(|spin| self.hists.spin_tag(spin)),
        ];
        let sample = concat(sample)?;
        let bucket = concat(bucket)?;
        let segments = [base, sample.as_str(), bucket.as_str()];
        Ok(segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_"))
    }
}

fn concat<'a, const N: usize>(tokens: [Option<PlotResult<&'a str>>; N]) -> PlotResult<String> {
    tokens
        .into_iter()
        .flatten()
        .collect::<PlotResult<Vec<_>>>()
        .map(|tokens| tokens.concat())
}

fn lookup<'a>(list: &'a [String], field: &'static str, index: usize) -> PlotResult<&'a str> {
    list.get(index)
        .map(String::as_str)
        .ok_or(PlotError::OutOfRangeIndex {
            field,
            index,
            len: list.len(),
        })
}

fn check_list(what: &str, list: &[String]) -> PlotResult<()> {
    if list.is_empty() {
        Err(PlotError::InvalidData(format!("{what} must not be empty")))
    } else {
        Ok(())
    }
}

fn check_parallel(what: &str, tags: &[String], legends: &[String]) -> PlotResult<()> {
    check_list(&format!("{what} tags"), tags)?;
    if tags.len() != legends.len() {
        return Err(PlotError::InvalidData(format!(
            "{} {what} tags but {} legends",
            tags.len(),
            legends.len()
        )));
    }
    Ok(())
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::{HistInput, Input};
    use crate::dispatch::index::{ChargeBin, CfBin, Level, PlotIndex, PtBin, Species, Spin};
    use crate::error::PlotError;

    #[test]
    fn hist_name_omits_unconstrained_fields() {
        let input = Input::default();
        let bare = PlotIndex::default();
        assert_eq!(input.hist_name("Ec", &bare, "").expect("name"), "hEcStat_");

        let full = PlotIndex::default()
            .with_level(Level::Reco)
            .with_pt(PtBin::Pt10)
            .with_cf(CfBin::Jet)
            .with_spin(Spin::Integrated)
            .with_charge(ChargeBin::Positive);
        assert_eq!(
            input.hist_name("Ec", &full, "Tag").expect("name"),
            "hTagRecoEcStat_Pt10CFJetInt"
        );
    }

    #[test]
    fn legend_follows_species_level_spin_pt_charge_cf_order() {
        let input = Input::default();
        let index = PlotIndex::default()
            .with_cf(CfBin::Lab)
            .with_pt(PtBin::Pt5)
            .with_species(Species::PAu)
            .with_spin(Spin::BU);
        assert_eq!(
            input.legend(&index).expect("legend"),
            "p+Au, B#uparrow, p_{T}^{jet} #in (5, 10) GeV/c, lab frame"
        );
        assert_eq!(input.legend(&PlotIndex::default()).expect("legend"), "");
    }

    #[test]
    fn canvas_name_drops_empty_segments() {
        let input = Input::default();
        let species_only = PlotIndex::default().with_species(Species::PP);
        assert_eq!(
            input.canvas_name("cVsPtJetEc", &species_only).expect("name"),
            "cVsPtJetEc_PP"
        );
        let full = species_only
            .with_level(Level::Data)
            .with_pt(PtBin::Pt15)
            .with_charge(ChargeBin::Negative);
        assert_eq!(
            input.canvas_name("cEc", &full).expect("name"),
            "cEc_PPData_Pt15Neg"
        );
        let bucket_only = PlotIndex::default().with_spin(Spin::YD);
        assert_eq!(input.canvas_name("cEc", &bucket_only).expect("name"), "cEc_YD");
    }

    #[test]
    fn short_tag_lists_fail_with_out_of_range() {
        let mut input = Input::default();
        input.hists = HistInput {
            pt_tags: vec!["Pt5".to_owned()],
            pt_legends: vec!["low".to_owned()],
            ..HistInput::default()
        };
        let index = PlotIndex::default().with_pt(PtBin::Pt15);
        let err = input.hist_name("Ec", &index, "").expect_err("out of range");
        assert!(matches!(
            err,
            PlotError::OutOfRangeIndex {
                field: "pt",
                index: 2,
                len: 1
            }
        ));
    }

    #[test]
    fn file_lookup_needs_species_and_level() {
        let input = Input::default();
        let index = PlotIndex::default()
            .with_species(Species::PAu)
            .with_level(Level::True);
        assert_eq!(input.file(&index).expect("file"), "input/pau_true.json");
        assert!(input.file(&PlotIndex::default().with_species(Species::PP)).is_err());
    }

    #[test]
    fn json_round_trip_validates() {
        let input = Input::default();
        let json = input.to_json_pretty().expect("json");
        assert_eq!(Input::from_json_str(&json).expect("parse"), input);

        let mut broken = Input::default();
        broken.hists.spin_legends.pop();
        let json = broken.to_json_pretty().expect("json");
        assert!(Input::from_json_str(&json).is_err());
    }
}
