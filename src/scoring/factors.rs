//! Sub-scores shared by the bust, steal and grade calculators.

use super::config::{AwardPoints, AwardSettings, TierExpectations};
use crate::player::{Awards, FirstStint};
use crate::tier::{Tier, TierSet};

/// Smallest divisor used for count and percentage expectations.
pub const COUNT_FLOOR: f64 = 1.0;
/// Smallest expected-seasons divisor in the bust calculator.
pub const BUST_SEASONS_FLOOR: f64 = 0.1;
/// Smallest expected-seasons divisor in the steal and grade calculators.
pub const SEASONS_FLOOR: f64 = 1.0;

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// `min(cap, actual / expected)` with `expected` floored at `floor`.
pub fn ratio_to(actual: f64, expected: f64, floor: f64, cap: f64) -> f64 {
    (actual / expected.max(floor)).min(cap)
}

/// Round to four decimal places, half away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The four usage ratios, each capped at 1.0 against the tier baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageRatios {
    pub reg_snaps: f64,
    pub reg_pct: f64,
    pub st_snaps: f64,
    pub st_pct: f64,
}

impl UsageRatios {
    pub fn from_stint(stint: &FirstStint, expected: &TierExpectations) -> Self {
        Self {
            reg_snaps: ratio_to(stint.reg_snaps as f64, expected.reg_snaps, COUNT_FLOOR, 1.0),
            reg_pct: ratio_to(stint.reg_snap_pct, expected.reg_pct, COUNT_FLOOR, 1.0),
            st_snaps: ratio_to(stint.st_snaps as f64, expected.st_snaps, COUNT_FLOOR, 1.0),
            st_pct: ratio_to(stint.st_snap_pct, expected.st_pct, COUNT_FLOOR, 1.0),
        }
    }
}

/// Usage weighting scheme, picked by the tier's round grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageBucket {
    Early,
    Mid,
    Late,
}

impl UsageBucket {
    /// Early-round membership wins if a tier is listed in both sets.
    pub fn for_tier(tier: Tier, early: TierSet, late: TierSet) -> Self {
        if early.contains(tier) {
            UsageBucket::Early
        } else if late.contains(tier) {
            UsageBucket::Late
        } else {
            UsageBucket::Mid
        }
    }

    /// Weights on (reg snaps, reg pct, st snaps, st pct).
    pub fn weights(self) -> [f64; 4] {
        match self {
            UsageBucket::Early => [0.60, 0.30, 0.05, 0.05],
            UsageBucket::Late => [0.25, 0.25, 0.25, 0.25],
            UsageBucket::Mid => [0.45, 0.25, 0.15, 0.15],
        }
    }
}

pub fn usage_score(ratios: &UsageRatios, bucket: UsageBucket) -> f64 {
    let [reg_snaps, reg_pct, st_snaps, st_pct] = bucket.weights();
    clamp_unit(
        reg_snaps * ratios.reg_snaps
            + reg_pct * ratios.reg_pct
            + st_snaps * ratios.st_snaps
            + st_pct * ratios.st_pct,
    )
}

pub fn award_points(awards: &Awards, points: &AwardPoints) -> f64 {
    let flag = |won: bool, value: f64| if won { value } else { 0.0 };

    awards.mvps as f64 * points.mvp
        + awards.dpoys as f64 * points.dpoy
        + awards.opoys as f64 * points.opoy
        + awards.first_team_all_pros as f64 * points.first_team_all_pro
        + awards.second_team_all_pros as f64 * points.second_team_all_pro
        + awards.pro_bowls as f64 * points.pro_bowl
        + flag(awards.oroy, points.oroy)
        + flag(awards.droy, points.droy)
}

/// Normalised award score in [0,1]; no awards is exactly zero.
pub fn award_score(awards: &Awards, tier: Tier, settings: &AwardSettings, late_round_tiers: TierSet) -> f64 {
    let points = award_points(awards, &settings.points);
    if points <= 0.0 {
        return 0.0;
    }

    let mut score = points / settings.norms.get(tier);
    if late_round_tiers.contains(tier) || tier == Tier::Udfa {
        score *= settings.late_round_multiplier;
    }
    clamp_unit(score)
}

/// Share of games started, once enough games have been played to count.
pub fn starter_score(stint: &FirstStint, min_games: u32) -> f64 {
    if stint.games_played == 0 || stint.games_played < min_games {
        return 0.0;
    }
    clamp_unit(stint.games_started as f64 / stint.games_played as f64)
}

/// 1.0 at or past the expected career length, otherwise `0.5 + 0.5 * ratio`.
pub fn longevity_factor(seasons_played: f64, expected_seasons: f64) -> f64 {
    if seasons_played >= expected_seasons {
        1.0
    } else {
        0.5 + 0.5 * (seasons_played / expected_seasons)
    }
}
