use serde::{Deserialize, Serialize};

use crate::tier::{Tier, TierSet, TierTable};

/// Performance baseline for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierExpectations {
    pub av: f64,
    pub reg_snaps: f64,
    pub st_snaps: f64,
    /// 0-100 scale, like the player's own percentages.
    pub reg_pct: f64,
    pub st_pct: f64,
    pub seasons: f64,
}

impl Default for TierExpectations {
    fn default() -> Self {
        Self {
            av: 1.0,
            reg_snaps: 1.0,
            st_snaps: 1.0,
            reg_pct: 1.0,
            st_pct: 1.0,
            seasons: 3.0,
        }
    }
}

/// Weights for the two-component bust success score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessWeights {
    pub av: f64,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QbSettings {
    /// Tiers where a quarterback counts as high draft capital.
    pub early_tiers: TierSet,
    pub expected_av_multiplier: f64,
    pub weights: SuccessWeights,
}

impl Default for QbSettings {
    fn default() -> Self {
        Self {
            early_tiers: TierSet::from([Tier::A, Tier::B, Tier::C, Tier::D, Tier::E]),
            expected_av_multiplier: 1.3,
            weights: SuccessWeights { av: 0.8, usage: 0.2 },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistSettings {
    /// Kickers and punters drafted in this round or earlier count as high capital.
    pub high_capital_max_round: u32,
    pub expected_av_multiplier: f64,
    pub weights: SuccessWeights,
}

impl Default for SpecialistSettings {
    fn default() -> Self {
        Self {
            high_capital_max_round: 3,
            expected_av_multiplier: 1.3,
            weights: SuccessWeights { av: 0.7, usage: 0.3 },
        }
    }
}

/// Credit for special-teams contributors who never register AV.
#[derive(Debug, Clone, PartialEq)]
pub struct RescueSettings {
    pub min_games: u32,
    pub min_st_pct: f64,
    /// Fraction of expected AV granted per tier; zero disables the rescue.
    pub floors: TierTable<f64>,
}

impl Default for RescueSettings {
    fn default() -> Self {
        let mut floors = TierTable::filled(0.0);
        floors.set(Tier::M, 0.20);
        floors.set(Tier::N, 0.30);
        floors.set(Tier::O, 0.50);
        Self {
            min_games: 12,
            min_st_pct: 20.0,
            floors,
        }
    }
}

/// How seasons played scale the bust success score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerLengthCurve {
    /// Shared longevity factor: `0.5 + 0.5 * seasons / expected`, capped at 1.
    #[default]
    Longevity,
    /// `min(1, seasons / expected)`, zero for a player with no seasons.
    Linear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BustSettings {
    pub thresholds: TierTable<f64>,
    pub weights: SuccessWeights,
    pub qb: QbSettings,
    pub specialist: SpecialistSettings,
    pub rescue: RescueSettings,
    pub career_length: CareerLengthCurve,
}

impl Default for BustSettings {
    fn default() -> Self {
        Self {
            thresholds: TierTable::filled(0.7),
            weights: SuccessWeights { av: 0.6, usage: 0.4 },
            qb: QbSettings::default(),
            specialist: SpecialistSettings::default(),
            rescue: RescueSettings::default(),
            career_length: CareerLengthCurve::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoStealSettings {
    pub min_round: u32,
    pub min_first_team_all_pros: u32,
    pub min_pro_bowls: u32,
}

impl Default for AutoStealSettings {
    fn default() -> Self {
        Self {
            min_round: 4,
            min_first_team_all_pros: 2,
            min_pro_bowls: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StealWeights {
    pub av_over: f64,
    pub award: f64,
    pub usage_over: f64,
    pub starter: f64,
}

impl Default for StealWeights {
    fn default() -> Self {
        Self {
            av_over: 0.45,
            award: 0.20,
            usage_over: 0.15,
            starter: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StealSettings {
    pub thresholds: TierTable<f64>,
    pub auto_steal: AutoStealSettings,
    pub weights: StealWeights,
}

impl Default for StealSettings {
    fn default() -> Self {
        Self {
            thresholds: TierTable::filled(0.6),
            auto_steal: AutoStealSettings::default(),
            weights: StealWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeWeights {
    pub av: f64,
    pub award: f64,
    pub usage: f64,
    pub starter: f64,
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self {
            av: 0.70,
            award: 0.10,
            usage: 0.12,
            starter: 0.08,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradeSettings {
    pub weights: GradeWeights,
}

/// Points credited per award.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwardPoints {
    pub mvp: f64,
    pub dpoy: f64,
    pub opoy: f64,
    pub first_team_all_pro: f64,
    pub second_team_all_pro: f64,
    pub pro_bowl: f64,
    pub oroy: f64,
    pub droy: f64,
}

impl Default for AwardPoints {
    fn default() -> Self {
        Self {
            mvp: 80.0,
            dpoy: 50.0,
            opoy: 50.0,
            first_team_all_pro: 35.0,
            second_team_all_pro: 20.0,
            pro_bowl: 12.0,
            oroy: 20.0,
            droy: 20.0,
        }
    }
}

pub const DEFAULT_AWARD_NORM: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AwardSettings {
    pub points: AwardPoints,
    /// Points that make a full award score for each tier. Always positive.
    pub norms: TierTable<f64>,
    /// Voting-bias correction for late-round and undrafted players.
    pub late_round_multiplier: f64,
}

impl Default for AwardSettings {
    fn default() -> Self {
        Self {
            points: AwardPoints::default(),
            norms: TierTable::filled(DEFAULT_AWARD_NORM),
            late_round_multiplier: 1.5,
        }
    }
}

/// Complete scoring configuration, shared by all calculators.
///
/// Every value is resolved at load time; calculators never look for
/// missing keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub expectations: TierTable<TierExpectations>,
    pub early_round_tiers: TierSet,
    pub late_round_tiers: TierSet,
    pub awards: AwardSettings,
    /// Games played before a starter ratio counts at all.
    pub starter_min_games: u32,
    pub bust: BustSettings,
    pub steal: StealSettings,
    pub grade: GradeSettings,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            expectations: TierTable::filled(TierExpectations::default()),
            early_round_tiers: TierSet::from([Tier::A, Tier::B, Tier::C, Tier::D, Tier::E, Tier::F]),
            late_round_tiers: TierSet::from([Tier::L, Tier::M, Tier::N, Tier::O]),
            awards: AwardSettings::default(),
            starter_min_games: 16,
            bust: BustSettings::default(),
            steal: StealSettings::default(),
            grade: GradeSettings::default(),
        }
    }
}
