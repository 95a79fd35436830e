use serde::{Deserialize, Serialize};

use super::types::Tier;
use crate::player::DraftSlot;

/// Inclusive pick window mapped to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRange {
    pub min_pick: u32,
    pub max_pick: u32,
    pub tier: Tier,
}

impl PickRange {
    pub fn new(min_pick: u32, max_pick: u32, tier: Tier) -> Self {
        Self {
            min_pick,
            max_pick,
            tier,
        }
    }

    pub fn contains(&self, pick: u32) -> bool {
        pick >= self.min_pick && pick <= self.max_pick
    }
}

/// Tiers used when no pick range matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundFallbacks {
    pub round2: Tier,
    pub round3_early: Tier,
    pub round3_late: Tier,
    pub round4: Tier,
    pub round5: Tier,
    pub round6: Tier,
    /// Also used for any round outside 2-7.
    pub round7: Tier,
}

impl Default for RoundFallbacks {
    fn default() -> Self {
        Self {
            round2: Tier::I,
            round3_early: Tier::J,
            round3_late: Tier::K,
            round4: Tier::L,
            round5: Tier::M,
            round6: Tier::N,
            round7: Tier::O,
        }
    }
}

/// Tier mapping configuration.
///
/// Pick ranges are checked in order and the first match wins; ranges are
/// expected to be ascending and non-overlapping (see `validate_config`).
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig {
    pub pick_ranges: Vec<PickRange>,
    pub round_fallbacks: RoundFallbacks,
    /// Last pick (inclusive) that counts as "early" round 3.
    pub round3_cutoff: u32,
}

pub const DEFAULT_ROUND3_CUTOFF: u32 = 100;

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            pick_ranges: Vec::new(),
            round_fallbacks: RoundFallbacks::default(),
            round3_cutoff: DEFAULT_ROUND3_CUTOFF,
        }
    }
}

impl TierConfig {
    /// The first- and second-round windows shipped in `config/tier-mappings.json`.
    pub fn standard() -> Self {
        Self {
            pick_ranges: vec![
                PickRange::new(1, 1, Tier::A),
                PickRange::new(2, 5, Tier::B),
                PickRange::new(6, 10, Tier::C),
                PickRange::new(11, 15, Tier::D),
                PickRange::new(16, 20, Tier::E),
                PickRange::new(21, 32, Tier::F),
                PickRange::new(33, 44, Tier::G),
                PickRange::new(45, 54, Tier::H),
            ],
            ..Self::default()
        }
    }
}

/// Maps a draft position to its expectation tier.
#[derive(Debug, Clone, Default)]
pub struct TierResolver {
    config: TierConfig,
}

impl TierResolver {
    pub fn new(config: TierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    /// Resolve a drafted player's tier. Every input maps to some tier.
    pub fn resolve(&self, overall_pick: u32, draft_round: u32) -> Tier {
        if let Some(range) = self
            .config
            .pick_ranges
            .iter()
            .find(|range| range.contains(overall_pick))
        {
            return range.tier;
        }

        let fallbacks = &self.config.round_fallbacks;
        match draft_round {
            2 => fallbacks.round2,
            3 if overall_pick <= self.config.round3_cutoff => fallbacks.round3_early,
            3 => fallbacks.round3_late,
            4 => fallbacks.round4,
            5 => fallbacks.round5,
            6 => fallbacks.round6,
            _ => fallbacks.round7,
        }
    }

    /// Resolve any draft slot; undrafted players always land in `UDFA`.
    pub fn resolve_slot(&self, slot: DraftSlot) -> Tier {
        match slot {
            DraftSlot::Drafted { round, pick } => self.resolve(pick, round),
            DraftSlot::Undrafted => Tier::Udfa,
        }
    }
}
