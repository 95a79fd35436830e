use super::config::ScoringConfig;
use super::engine::{Calculator, CalculatorKind, CalculatorResult, Verdict};
use super::factors::{
    award_score, clamp_unit, longevity_factor, ratio_to, round4, starter_score, usage_score,
    UsageBucket, UsageRatios, COUNT_FLOOR, SEASONS_FLOOR,
};
use crate::player::PlayerStats;
use crate::tier::TierResolver;

const AV_RATIO_CAP: f64 = 4.0;

/// AV curve: 0.9 at expectation, 1.0 at double, up to 1.1 at four times.
///
/// Values above 1.0 survive until the final clamp so extreme producers
/// without awards can still reach the top grade.
pub fn av_grade(ratio: f64) -> f64 {
    let ratio = ratio.min(AV_RATIO_CAP);
    if ratio <= 1.0 {
        0.9 * ratio
    } else if ratio <= 2.0 {
        0.9 + (ratio - 1.0) * 0.1
    } else {
        1.0 + (ratio - 2.0).min(2.0) * 0.05
    }
}

/// Continuous performance grade relative to draft slot.
pub struct GradeCalculator<'a> {
    resolver: &'a TierResolver,
    config: &'a ScoringConfig,
}

impl<'a> GradeCalculator<'a> {
    pub fn new(resolver: &'a TierResolver, config: &'a ScoringConfig) -> Self {
        Self { resolver, config }
    }
}

impl Calculator for GradeCalculator<'_> {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Grade
    }

    fn calculate(&self, player: &PlayerStats) -> CalculatorResult {
        let tier = self.resolver.resolve_slot(player.draft);
        let stint = &player.first_stint;

        if stint.games_played == 0 {
            return CalculatorResult::new(player, tier, 0.0, Verdict::Grade);
        }

        let config = self.config;
        let expected = config.expectations.get(tier);

        let av = av_grade(ratio_to(stint.av as f64, expected.av, COUNT_FLOOR, AV_RATIO_CAP));

        let bucket = UsageBucket::for_tier(tier, config.early_round_tiers, config.late_round_tiers);
        let usage = usage_score(&UsageRatios::from_stint(stint, &expected), bucket);
        let award = award_score(&stint.awards, tier, &config.awards, config.late_round_tiers);
        let starter = starter_score(stint, config.starter_min_games);

        let weights = &config.grade.weights;
        let raw = weights.av * av + weights.award * award + weights.usage * usage + weights.starter * starter;

        let expected_seasons = expected.seasons.max(SEASONS_FLOOR);
        let grade = clamp_unit(raw * longevity_factor(stint.seasons_played as f64, expected_seasons));

        CalculatorResult::new(player, tier, round4(grade), Verdict::Grade)
    }
}
