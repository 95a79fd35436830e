use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Expectation cohort derived from draft position.
///
/// `A` carries the most draft capital (the first overall pick), `O` the least
/// (late seventh round). Undrafted free agents get their own `UDFA` cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    #[serde(rename = "UDFA")]
    Udfa,
}

impl Tier {
    pub const COUNT: usize = 16;

    pub const ALL: [Tier; Tier::COUNT] = [
        Tier::A,
        Tier::B,
        Tier::C,
        Tier::D,
        Tier::E,
        Tier::F,
        Tier::G,
        Tier::H,
        Tier::I,
        Tier::J,
        Tier::K,
        Tier::L,
        Tier::M,
        Tier::N,
        Tier::O,
        Tier::Udfa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::E => "E",
            Tier::F => "F",
            Tier::G => "G",
            Tier::H => "H",
            Tier::I => "I",
            Tier::J => "J",
            Tier::K => "K",
            Tier::L => "L",
            Tier::M => "M",
            Tier::N => "N",
            Tier::O => "O",
            Tier::Udfa => "UDFA",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        match Tier::ALL
            .iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(label))
        {
            Some(tier) => Ok(*tier),
            None => bail!("Unknown tier label '{}' (expected A-O or UDFA)", s),
        }
    }
}

/// One value per tier, with every slot populated.
///
/// Built once at config load so lookups never need a presence check.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable<T> {
    values: [T; Tier::COUNT],
}

impl<T: Copy> TierTable<T> {
    pub fn filled(value: T) -> Self {
        Self {
            values: [value; Tier::COUNT],
        }
    }

    /// Start from `default` and apply per-tier overrides on top.
    pub fn with_overrides(default: T, overrides: &BTreeMap<Tier, T>) -> Self {
        let mut table = Self::filled(default);
        for (tier, value) in overrides {
            table.set(*tier, *value);
        }
        table
    }

    pub fn get(&self, tier: Tier) -> T {
        self.values[tier.index()]
    }

    pub fn set(&mut self, tier: Tier, value: T) {
        self.values[tier.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, T)> + '_ {
        Tier::ALL.iter().map(move |tier| (*tier, self.get(*tier)))
    }
}

/// Small set of tiers, used for the early/late-round groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierSet(u32);

impl TierSet {
    pub fn contains(self, tier: Tier) -> bool {
        self.0 & (1 << tier.index()) != 0
    }

    pub fn insert(&mut self, tier: Tier) {
        self.0 |= 1 << tier.index();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Tier> for TierSet {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        let mut set = TierSet::default();
        for tier in iter {
            set.insert(tier);
        }
        set
    }
}

impl<const N: usize> From<[Tier; N]> for TierSet {
    fn from(tiers: [Tier; N]) -> Self {
        tiers.into_iter().collect()
    }
}
