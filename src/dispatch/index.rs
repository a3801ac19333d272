use serde::{Deserialize, Serialize};

/// Dense, zero-based bucket enum.
pub trait Ordinal: Copy + Eq + 'static {
    const ALL: &'static [Self];
    /// Field name used in diagnostics.
    const FIELD: &'static str;

    fn index(self) -> usize;

    #[must_use]
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    fn count() -> usize {
        Self::ALL.len()
    }
}

macro_rules! ordinal_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl Ordinal for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const FIELD: &'static str = $field;

            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

ordinal_enum!(
    /// Analysis stage of a histogram.
    Level, "level" { Data, Reco, True }
);
ordinal_enum!(
    /// Colliding-beam configuration.
    Species, "species" { PP, PAu }
);
ordinal_enum!(
    /// Jet transverse-momentum bucket.
    PtBin, "pt" { Pt5, Pt10, Pt15 }
);
ordinal_enum!(
    /// Collins-frame bucket.
    CfBin, "cf" { Lab, Jet }
);
ordinal_enum!(
    /// Jet-charge sign bucket.
    ChargeBin, "charge" { Negative, Neutral, Positive }
);
ordinal_enum!(
    /// Beam polarization pattern (blue/yellow, up/down).
    Spin, "spin" { BU, BD, YU, YD, BUYU, BUYD, BDYU, BDYD, Integrated }
);

impl Spin {
    pub const POLARIZED: [Self; 8] = [
        Self::BU,
        Self::BD,
        Self::YU,
        Self::YD,
        Self::BUYU,
        Self::BUYD,
        Self::BDYU,
        Self::BDYD,
    ];
}

/// One input-histogram bucket; `None` leaves a field unconstrained and
/// drops it from every composed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotIndex {
    pub level: Option<Level>,
    pub species: Option<Species>,
    pub pt: Option<PtBin>,
    pub cf: Option<CfBin>,
    pub charge: Option<ChargeBin>,
    pub spin: Option<Spin>,
}

impl PlotIndex {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_species(mut self, species: Species) -> Self {
        self.species = Some(species);
        self
    }

    #[must_use]
    pub fn with_pt(mut self, pt: PtBin) -> Self {
        self.pt = Some(pt);
        self
    }

    #[must_use]
    pub fn with_cf(mut self, cf: CfBin) -> Self {
        self.cf = Some(cf);
        self
    }

    #[must_use]
    pub fn with_charge(mut self, charge: ChargeBin) -> Self {
        self.charge = Some(charge);
        self
    }

    #[must_use]
    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    /// Raw ordinals in field order, `-1` for unconstrained fields.
    #[must_use]
    pub fn ordinals(&self) -> [i32; 6] {
        fn raw<T: Ordinal>(value: Option<T>) -> i32 {
            value.map_or(-1, |value| i32::try_from(value.index()).unwrap_or(i32::MAX))
        }
        [
            raw(self.level),
            raw(self.species),
            raw(self.pt),
            raw(self.cf),
            raw(self.charge),
            raw(self.spin),
        ]
    }
}

/// Inclusive ordinal window for one index field; `-1` stands for the
/// unconstrained value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalRange {
    pub start: i32,
    pub end: i32,
}

impl Default for OrdinalRange {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

impl OrdinalRange {
    pub const UNCONSTRAINED: Self = Self { start: -1, end: -1 };

    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Every bucket of `T`.
    #[must_use]
    pub fn all<T: Ordinal>() -> Self {
        Self::new(0, max_ordinal::<T>())
    }

    #[must_use]
    pub fn single<T: Ordinal>(value: T) -> Self {
        let ordinal = i32::try_from(value.index()).unwrap_or(i32::MAX);
        Self::new(ordinal, ordinal)
    }

    /// Window clamped into `[-1, T::count() - 1]`.
    #[must_use]
    pub fn clamped<T: Ordinal>(self) -> Self {
        let max = max_ordinal::<T>();
        Self::new(self.start.clamp(-1, max), self.end.clamp(-1, max))
    }

    /// Number of values after clamping.
    #[must_use]
    pub fn len<T: Ordinal>(self) -> usize {
        let clamped = self.clamped::<T>();
        usize::try_from(clamped.end - clamped.start + 1).unwrap_or(0)
    }

    /// Field values in ascending ordinal order.
    #[must_use]
    pub fn values<T: Ordinal>(self) -> Vec<Option<T>> {
        let clamped = self.clamped::<T>();
        (clamped.start..=clamped.end)
            .map(|ordinal| usize::try_from(ordinal).ok().and_then(T::from_index))
            .collect()
    }
}

fn max_ordinal<T: Ordinal>() -> i32 {
    i32::try_from(T::count()).unwrap_or(i32::MAX) - 1
}

/// Cross product of per-field windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotIndexRange {
    pub level: OrdinalRange,
    pub species: OrdinalRange,
    pub pt: OrdinalRange,
    pub cf: OrdinalRange,
    pub charge: OrdinalRange,
    pub spin: OrdinalRange,
}

impl PlotIndexRange {
    /// Range holding exactly `index`.
    #[must_use]
    pub fn single(index: PlotIndex) -> Self {
        fn window<T: Ordinal>(value: Option<T>) -> OrdinalRange {
            value.map_or(OrdinalRange::UNCONSTRAINED, OrdinalRange::single)
        }
        Self {
            level: window(index.level),
            species: window(index.species),
            pt: window(index.pt),
            cf: window(index.cf),
            charge: window(index.charge),
            spin: window(index.spin),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.level.len::<Level>()
            * self.species.len::<Species>()
            * self.pt.len::<PtBin>()
            * self.cf.len::<CfBin>()
            * self.charge.len::<ChargeBin>()
            * self.spin.len::<Spin>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every index of the window, level varying slowest and spin fastest.
    #[must_use]
    pub fn materialize(&self) -> Vec<PlotIndex> {
        let mut indices = Vec::with_capacity(self.len());
        for level in self.level.values::<Level>() {
            for species in self.species.values::<Species>() {
                for pt in self.pt.values::<PtBin>() {
                    for cf in self.cf.values::<CfBin>() {
                        for charge in self.charge.values::<ChargeBin>() {
                            for spin in self.spin.values::<Spin>() {
                                indices.push(PlotIndex {
                                    level,
                                    species,
                                    pt,
                                    cf,
                                    charge,
                                    spin,
                                });
                            }
                        }
                    }
                }
            }
        }
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Level, Ordinal, OrdinalRange, PlotIndex, PlotIndexRange, PtBin, Species, Spin,
    };

    #[test]
    fn ordinals_are_dense_and_zero_based() {
        for (position, spin) in Spin::ALL.iter().enumerate() {
            assert_eq!(spin.index(), position);
            assert_eq!(Spin::from_index(position), Some(*spin));
        }
        assert_eq!(Spin::from_index(Spin::count()), None);
        assert_eq!(Level::count(), 3);
    }

    #[test]
    fn raw_ordinals_mark_unconstrained_fields() {
        let index = PlotIndex::default()
            .with_species(Species::PAu)
            .with_pt(PtBin::Pt15);
        assert_eq!(index.ordinals(), [-1, 1, 2, -1, -1, -1]);
    }

    #[test]
    fn windows_clamp_into_the_enum_range() {
        let range = OrdinalRange::new(-5, 10);
        assert_eq!(range.clamped::<PtBin>(), OrdinalRange::new(-1, 2));
        assert_eq!(range.len::<PtBin>(), 4);
        assert_eq!(OrdinalRange::new(2, 1).len::<PtBin>(), 0);
        assert_eq!(
            OrdinalRange::all::<PtBin>().values::<PtBin>(),
            vec![Some(PtBin::Pt5), Some(PtBin::Pt10), Some(PtBin::Pt15)]
        );
    }

    #[test]
    fn materialize_counts_the_cross_product() {
        let range = PlotIndexRange {
            species: OrdinalRange::all::<Species>(),
            pt: OrdinalRange::all::<PtBin>(),
            ..PlotIndexRange::default()
        };
        let indices = range.materialize();
        assert_eq!(indices.len(), 6);
        assert_eq!(range.len(), 6);
        assert_eq!(indices[0].species, Some(Species::PP));
        assert_eq!(indices[0].pt, Some(PtBin::Pt5));
        assert_eq!(indices[5].species, Some(Species::PAu));
        assert_eq!(indices[5].level, None);
    }

    #[test]
    fn single_range_round_trips_its_index() {
        let index = PlotIndex::default()
            .with_level(Level::Reco)
            .with_spin(Spin::BDYU);
        assert_eq!(PlotIndexRange::single(index).materialize(), vec![index]);
    }
}
