use super::config::{ScoringConfig, SuccessWeights};
use crate::tier::{TierConfig, TierTable};

fn check_positive(errors: &mut Vec<String>, path: &str, value: f64) {
    if value.is_nan() || value <= 0.0 {
        errors.push(format!("{}: must be positive (got {})", path, value));
    }
}

fn check_non_negative(errors: &mut Vec<String>, path: &str, value: f64) {
    if value.is_nan() || value < 0.0 {
        errors.push(format!("{}: must be non-negative (got {})", path, value));
    }
}

fn check_unit(errors: &mut Vec<String>, path: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{}: must be between 0 and 1 (got {})", path, value));
    }
}

fn check_unit_table(errors: &mut Vec<String>, path: &str, table: &TierTable<f64>) {
    for (tier, value) in table.iter() {
        check_unit(errors, &format!("{}.{}", path, tier), value);
    }
}

fn check_success_weights(errors: &mut Vec<String>, path: &str, weights: &SuccessWeights) {
    check_non_negative(errors, &format!("{}.avWeight", path), weights.av);
    check_non_negative(errors, &format!("{}.usageWeight", path), weights.usage);
}

fn validate_tiers(config: &TierConfig, errors: &mut Vec<String>) {
    let mut previous_max: Option<u32> = None;
    for (i, range) in config.pick_ranges.iter().enumerate() {
        if range.min_pick == 0 {
            errors.push(format!("tiers.pickRanges[{}].minPick: must be at least 1", i));
        }
        if range.min_pick > range.max_pick {
            errors.push(format!(
                "tiers.pickRanges[{}]: minPick {} is greater than maxPick {}",
                i, range.min_pick, range.max_pick
            ));
        }
        if let Some(max) = previous_max {
            if range.min_pick <= max {
                errors.push(format!(
                    "tiers.pickRanges[{}]: starts at pick {} but the previous range ends at {}",
                    i, range.min_pick, max
                ));
            }
        }
        previous_max = Some(previous_max.map_or(range.max_pick, |max| max.max(range.max_pick)));
    }

    if config.round3_cutoff == 0 {
        errors.push("tiers.round3Cutoff: must be at least 1".to_string());
    }
}

fn validate_scoring(config: &ScoringConfig, errors: &mut Vec<String>) {
    // Zero is allowed: the calculators floor every expectation before dividing.
    for (tier, expected) in config.expectations.iter() {
        check_non_negative(errors, &format!("scoring.expectedAv.{}", tier), expected.av);
        check_non_negative(errors, &format!("scoring.expectedRegSnaps.{}", tier), expected.reg_snaps);
        check_non_negative(errors, &format!("scoring.expectedStSnaps.{}", tier), expected.st_snaps);
        check_non_negative(errors, &format!("scoring.expectedRegPct.{}", tier), expected.reg_pct);
        check_non_negative(errors, &format!("scoring.expectedStPct.{}", tier), expected.st_pct);
        check_non_negative(errors, &format!("scoring.expectedSeasons.{}", tier), expected.seasons);
    }

    let bust = &config.bust;
    check_unit_table(errors, "scoring.bustThreshold", &bust.thresholds);
    check_success_weights(errors, "scoring.weights", &bust.weights);
    check_success_weights(errors, "scoring.qb.weights", &bust.qb.weights);
    check_success_weights(errors, "scoring.specialist.weights", &bust.specialist.weights);
    check_positive(errors, "scoring.qb.expectedAvMultiplier", bust.qb.expected_av_multiplier);
    check_positive(
        errors,
        "scoring.specialist.expectedAvMultiplier",
        bust.specialist.expected_av_multiplier,
    );
    check_non_negative(errors, "scoring.specialTeamsRescue.minStPct", bust.rescue.min_st_pct);
    check_unit_table(errors, "scoring.specialTeamsRescue.floors", &bust.rescue.floors);

    let steal = &config.steal;
    check_unit_table(errors, "scoring.steal.threshold", &steal.thresholds);
    check_non_negative(errors, "scoring.steal.avOverWeight", steal.weights.av_over);
    check_non_negative(errors, "scoring.steal.awardWeight", steal.weights.award);
    check_non_negative(errors, "scoring.steal.usageOverWeight", steal.weights.usage_over);
    check_non_negative(errors, "scoring.steal.starterWeight", steal.weights.starter);

    let awards = &config.awards;
    let points = [
        ("mvp", awards.points.mvp),
        ("dpoy", awards.points.dpoy),
        ("opoy", awards.points.opoy),
        ("ap1", awards.points.first_team_all_pro),
        ("ap2", awards.points.second_team_all_pro),
        ("pb", awards.points.pro_bowl),
        ("oroy", awards.points.oroy),
        ("droy", awards.points.droy),
    ];
    for (key, value) in points {
        check_non_negative(errors, &format!("scoring.steal.awardPoints.{}", key), value);
    }
    check_positive(
        errors,
        "scoring.steal.lateRoundAwardMultiplier",
        awards.late_round_multiplier,
    );

    let grade = &config.grade.weights;
    check_non_negative(errors, "scoring.grade.avWeight", grade.av);
    check_non_negative(errors, "scoring.grade.awardWeight", grade.award);
    check_non_negative(errors, "scoring.grade.usageWeight", grade.usage);
    check_non_negative(errors, "scoring.grade.starterWeight", grade.starter);
}

/// Validate both configuration documents before any player is scored.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(tiers: &TierConfig, scoring: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_tiers(tiers, &mut errors);
    validate_scoring(scoring, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
