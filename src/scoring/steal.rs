use super::config::{AutoStealSettings, ScoringConfig};
use super::engine::{Calculator, CalculatorKind, CalculatorResult, Verdict};
use super::factors::{
    award_score, clamp_unit, longevity_factor, ratio_to, round4, starter_score, usage_score,
    UsageBucket, UsageRatios, COUNT_FLOOR, SEASONS_FLOOR,
};
use crate::player::PlayerStats;
use crate::tier::TierResolver;

/// Cap on AV-over-expectation; 4x expected AV is a full score.
const AV_RATIO_CAP: f64 = 4.0;
/// Usage base that counts as merely meeting expectations.
const USAGE_EXPECTATION: f64 = 0.5;

/// Scores how far a player outperformed the draft capital spent on them.
pub struct StealCalculator<'a> {
    resolver: &'a TierResolver,
    config: &'a ScoringConfig,
}

impl<'a> StealCalculator<'a> {
    pub fn new(resolver: &'a TierResolver, config: &'a ScoringConfig) -> Self {
        Self { resolver, config }
    }
}

/// Late-round pick with elite award accumulation.
fn is_auto_steal(player: &PlayerStats, rules: &AutoStealSettings) -> bool {
    let Some(round) = player.draft.round() else {
        return false;
    };
    let awards = &player.first_stint.awards;
    round >= rules.min_round
        && (awards.first_team_all_pros >= rules.min_first_team_all_pros
            || awards.pro_bowls >= rules.min_pro_bowls)
}

/// Maps an AV ratio in [1,4] onto [0,1]; at or below expectation scores 0.
fn av_over_score(ratio: f64) -> f64 {
    let ratio = ratio.min(AV_RATIO_CAP);
    if ratio <= 1.0 {
        return 0.0;
    }
    clamp_unit((ratio - 1.0) / (AV_RATIO_CAP - 1.0))
}

/// Maps a usage base in [0.5,1] onto [0,1].
fn usage_over_score(usage: f64) -> f64 {
    if usage <= USAGE_EXPECTATION {
        return 0.0;
    }
    clamp_unit((usage - USAGE_EXPECTATION) * 2.0)
}

impl Calculator for StealCalculator<'_> {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Steal
    }

    fn calculate(&self, player: &PlayerStats) -> CalculatorResult {
        let tier = self.resolver.resolve_slot(player.draft);
        let config = self.config;
        let steal = &config.steal;
        let not_steal = Verdict::Steal {
            is_steal: false,
            auto_steal: false,
        };

        // The first overall pick carries the most capital there is.
        if player.draft.pick() == Some(1) {
            return CalculatorResult::new(player, tier, 0.0, not_steal);
        }
        if player.first_stint.games_played == 0 {
            return CalculatorResult::new(player, tier, 0.0, not_steal);
        }
        if is_auto_steal(player, &steal.auto_steal) {
            let verdict = Verdict::Steal {
                is_steal: true,
                auto_steal: true,
            };
            return CalculatorResult::new(player, tier, 1.0, verdict);
        }

        let stint = &player.first_stint;
        let expected = config.expectations.get(tier);

        let av_ratio = ratio_to(stint.av as f64, expected.av, COUNT_FLOOR, AV_RATIO_CAP);
        let av_over = av_over_score(av_ratio);

        let bucket = UsageBucket::for_tier(tier, config.early_round_tiers, config.late_round_tiers);
        let usage = usage_score(&UsageRatios::from_stint(stint, &expected), bucket);
        let usage_over = usage_over_score(usage);

        let award = award_score(&stint.awards, tier, &config.awards, config.late_round_tiers);
        let starter = starter_score(stint, config.starter_min_games);

        let weights = &steal.weights;
        let raw = weights.av_over * av_over
            + weights.award * award
            + weights.usage_over * usage_over
            + weights.starter * starter;

        let expected_seasons = expected.seasons.max(SEASONS_FLOOR);
        let score = clamp_unit(raw * longevity_factor(stint.seasons_played as f64, expected_seasons));

        let is_steal = score >= steal.thresholds.get(tier);
        let verdict = Verdict::Steal {
            is_steal,
            auto_steal: false,
        };
        CalculatorResult::new(player, tier, round4(score), verdict)
    }
}
