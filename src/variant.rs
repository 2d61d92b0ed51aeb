//! The historical configurations of the fork-join sort, selectable by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::mergesort::{ForkStrategy, MergeSort, DEFAULT_CROSSOVER};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Variant {
    /// v1: every range of two or more elements forks, both halves spawned.
    #[default]
    ForkAll,
    /// v2: crossover to the sequential sort, both halves spawned.
    ForkBoth,
    /// v3: crossover to the sequential sort, only the left half spawned.
    ForkOne,
    /// No forking at all.
    Sequential,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::ForkAll,
        Variant::ForkBoth,
        Variant::ForkOne,
        Variant::Sequential,
    ];

    /// Short name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Variant::ForkAll => "v1",
            Variant::ForkBoth => "v2",
            Variant::ForkOne => "v3",
            Variant::Sequential => "seq",
        }
    }

    /// The sorter for this variant. A `crossover` overrides the variant's own, except for
    /// [`Variant::Sequential`] which never forks.
    pub fn sorter(self, crossover: Option<usize>) -> MergeSort {
        let sorter = MergeSort::new();
        match self {
            Variant::ForkAll => sorter
                .crossover(crossover.unwrap_or(0))
                .strategy(ForkStrategy::SpawnBoth),
            Variant::ForkBoth => sorter
                .crossover(crossover.unwrap_or(DEFAULT_CROSSOVER))
                .strategy(ForkStrategy::SpawnBoth),
            Variant::ForkOne => sorter
                .crossover(crossover.unwrap_or(DEFAULT_CROSSOVER))
                .strategy(ForkStrategy::SpawnOne),
            Variant::Sequential => sorter.crossover(usize::MAX),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "fork-all" => Ok(Variant::ForkAll),
            "v2" | "fork-both" => Ok(Variant::ForkBoth),
            "v3" | "fork-one" => Ok(Variant::ForkOne),
            "seq" | "sequential" => Ok(Variant::Sequential),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.name().to_string()
    }
}
