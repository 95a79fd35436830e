//! On-disk shapes of the two configuration documents.
//!
//! Every field is optional; conversion into the typed configs fills in
//! defaults so nothing downstream checks for missing keys.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::scoring::{
    CareerLengthCurve, ScoringConfig, SuccessWeights, TierExpectations, DEFAULT_AWARD_NORM,
};
use crate::tier::{PickRange, Tier, TierConfig, TierSet, TierTable};

/// Tier-keyed numbers, e.g. `{"A": 45, "B": 38}`.
pub type TierValues = BTreeMap<String, f64>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierMappingsFile {
    pub pick_ranges: Option<Vec<PickRange>>,
    /// Keys: `"2"`, `"3_early"`, `"3_late"`, `"4"` .. `"7"`.
    pub round_fallbacks: Option<BTreeMap<String, String>>,
    pub round3_cutoff: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeightsFile {
    pub av_weight: Option<f64>,
    pub usage_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QbFile {
    pub early_tiers: Option<Vec<String>>,
    pub expected_av_multiplier: Option<f64>,
    pub weights: Option<WeightsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecialistFile {
    pub high_capital_max_round: Option<u32>,
    pub expected_av_multiplier: Option<f64>,
    pub weights: Option<WeightsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RescueFile {
    pub min_games: Option<u32>,
    pub min_st_pct: Option<f64>,
    pub floors: Option<TierValues>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoStealFile {
    pub min_round: Option<u32>,
    pub min_ap1: Option<u32>,
    pub min_pb: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AwardPointsFile {
    pub mvp: Option<f64>,
    pub dpoy: Option<f64>,
    pub opoy: Option<f64>,
    pub ap1: Option<f64>,
    pub ap2: Option<f64>,
    pub pb: Option<f64>,
    pub oroy: Option<f64>,
    pub droy: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StealFile {
    pub auto_steal: Option<AutoStealFile>,
    pub threshold: Option<TierValues>,
    pub min_games_for_starter_credit: Option<u32>,
    pub award_points: Option<AwardPointsFile>,
    pub award_norm: Option<TierValues>,
    pub late_round_award_multiplier: Option<f64>,
    pub av_over_weight: Option<f64>,
    pub award_weight: Option<f64>,
    pub usage_over_weight: Option<f64>,
    pub starter_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradeFile {
    pub av_weight: Option<f64>,
    pub award_weight: Option<f64>,
    pub usage_weight: Option<f64>,
    pub starter_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringFile {
    pub expected_av: Option<TierValues>,
    pub expected_reg_snaps: Option<TierValues>,
    pub expected_st_snaps: Option<TierValues>,
    pub expected_reg_pct: Option<TierValues>,
    pub expected_st_pct: Option<TierValues>,
    pub expected_seasons: Option<TierValues>,
    pub bust_threshold: Option<TierValues>,
    pub early_round_tiers: Option<Vec<String>>,
    pub late_round_tiers: Option<Vec<String>>,
    pub career_length_curve: Option<CareerLengthCurve>,
    pub weights: Option<WeightsFile>,
    pub qb: Option<QbFile>,
    pub specialist: Option<SpecialistFile>,
    pub special_teams_rescue: Option<RescueFile>,
    pub steal: Option<StealFile>,
    pub grade: Option<GradeFile>,
}

fn parse_tier(label: &str, field: &str) -> Result<Tier> {
    Tier::from_str(label).with_context(|| format!("Invalid tier in {}", field))
}

fn tier_values(values: Option<&TierValues>, field: &str) -> Result<BTreeMap<Tier, f64>> {
    let mut parsed = BTreeMap::new();
    for (label, value) in values.into_iter().flatten() {
        parsed.insert(parse_tier(label, field)?, *value);
    }
    Ok(parsed)
}

fn tier_table(values: Option<&TierValues>, field: &str, default: f64) -> Result<TierTable<f64>> {
    Ok(TierTable::with_overrides(default, &tier_values(values, field)?))
}

fn tier_set(labels: Option<&Vec<String>>, field: &str, default: TierSet) -> Result<TierSet> {
    match labels {
        None => Ok(default),
        Some(labels) => labels.iter().map(|label| parse_tier(label, field)).collect(),
    }
}

fn success_weights(file: Option<&WeightsFile>, default: SuccessWeights) -> SuccessWeights {
    match file {
        None => default,
        Some(file) => SuccessWeights {
            av: file.av_weight.unwrap_or(default.av),
            usage: file.usage_weight.unwrap_or(default.usage),
        },
    }
}

impl TryFrom<TierMappingsFile> for TierConfig {
    type Error = anyhow::Error;

    fn try_from(file: TierMappingsFile) -> Result<Self> {
        let defaults = TierConfig::default();
        let mut fallbacks = defaults.round_fallbacks;

        for (key, label) in file.round_fallbacks.iter().flatten() {
            let field = format!("roundFallbacks.{}", key);
            let tier = parse_tier(label, &field)?;
            let slot = match key.as_str() {
                "2" => &mut fallbacks.round2,
                "3_early" => &mut fallbacks.round3_early,
                "3_late" => &mut fallbacks.round3_late,
                "4" => &mut fallbacks.round4,
                "5" => &mut fallbacks.round5,
                "6" => &mut fallbacks.round6,
                "7" => &mut fallbacks.round7,
                other => anyhow::bail!("Unknown round fallback key '{}' in roundFallbacks", other),
            };
            *slot = tier;
        }

        Ok(TierConfig {
            pick_ranges: file.pick_ranges.unwrap_or_default(),
            round_fallbacks: fallbacks,
            round3_cutoff: file.round3_cutoff.unwrap_or(defaults.round3_cutoff),
        })
    }
}

impl TryFrom<ScoringFile> for ScoringConfig {
    type Error = anyhow::Error;

    fn try_from(file: ScoringFile) -> Result<Self> {
        let mut config = ScoringConfig::default();

        let base = TierExpectations::default();
        let av = tier_table(file.expected_av.as_ref(), "expectedAv", base.av)?;
        let reg_snaps = tier_table(file.expected_reg_snaps.as_ref(), "expectedRegSnaps", base.reg_snaps)?;
        let st_snaps = tier_table(file.expected_st_snaps.as_ref(), "expectedStSnaps", base.st_snaps)?;
        let reg_pct = tier_table(file.expected_reg_pct.as_ref(), "expectedRegPct", base.reg_pct)?;
        let st_pct = tier_table(file.expected_st_pct.as_ref(), "expectedStPct", base.st_pct)?;
        let seasons = tier_table(file.expected_seasons.as_ref(), "expectedSeasons", base.seasons)?;
        for tier in Tier::ALL {
            config.expectations.set(
                tier,
                TierExpectations {
                    av: av.get(tier),
                    reg_snaps: reg_snaps.get(tier),
                    st_snaps: st_snaps.get(tier),
                    reg_pct: reg_pct.get(tier),
                    st_pct: st_pct.get(tier),
                    seasons: seasons.get(tier),
                },
            );
        }

        config.early_round_tiers = tier_set(
            file.early_round_tiers.as_ref(),
            "earlyRoundTiers",
            config.early_round_tiers,
        )?;
        config.late_round_tiers = tier_set(
            file.late_round_tiers.as_ref(),
            "lateRoundTiers",
            config.late_round_tiers,
        )?;

        let bust = &mut config.bust;
        bust.thresholds = tier_table(file.bust_threshold.as_ref(), "bustThreshold", 0.7)?;
        bust.weights = success_weights(file.weights.as_ref(), bust.weights);
        if let Some(curve) = file.career_length_curve {
            bust.career_length = curve;
        }

        if let Some(qb) = &file.qb {
            bust.qb.early_tiers = tier_set(qb.early_tiers.as_ref(), "qb.earlyTiers", bust.qb.early_tiers)?;
            if let Some(multiplier) = qb.expected_av_multiplier {
                bust.qb.expected_av_multiplier = multiplier;
            }
            bust.qb.weights = success_weights(qb.weights.as_ref(), bust.qb.weights);
        }

        if let Some(specialist) = &file.specialist {
            if let Some(round) = specialist.high_capital_max_round {
                bust.specialist.high_capital_max_round = round;
            }
            if let Some(multiplier) = specialist.expected_av_multiplier {
                bust.specialist.expected_av_multiplier = multiplier;
            }
            bust.specialist.weights = success_weights(specialist.weights.as_ref(), bust.specialist.weights);
        }

        if let Some(rescue) = &file.special_teams_rescue {
            if let Some(games) = rescue.min_games {
                bust.rescue.min_games = games;
            }
            if let Some(pct) = rescue.min_st_pct {
                bust.rescue.min_st_pct = pct;
            }
            for (tier, floor) in tier_values(rescue.floors.as_ref(), "specialTeamsRescue.floors")? {
                bust.rescue.floors.set(tier, floor);
            }
        }

        if let Some(steal) = &file.steal {
            apply_steal_section(&mut config, steal)?;
        }

        if let Some(grade) = &file.grade {
            let weights = &mut config.grade.weights;
            weights.av = grade.av_weight.unwrap_or(weights.av);
            weights.award = grade.award_weight.unwrap_or(weights.award);
            weights.usage = grade.usage_weight.unwrap_or(weights.usage);
            weights.starter = grade.starter_weight.unwrap_or(weights.starter);
        }

        Ok(config)
    }
}

/// The `steal` section also carries the award and starter settings the
/// grade calculator shares.
fn apply_steal_section(config: &mut ScoringConfig, steal: &StealFile) -> Result<()> {
    if let Some(auto) = &steal.auto_steal {
        let rules = &mut config.steal.auto_steal;
        rules.min_round = auto.min_round.unwrap_or(rules.min_round);
        rules.min_first_team_all_pros = auto.min_ap1.unwrap_or(rules.min_first_team_all_pros);
        rules.min_pro_bowls = auto.min_pb.unwrap_or(rules.min_pro_bowls);
    }

    config.steal.thresholds = tier_table(steal.threshold.as_ref(), "steal.threshold", 0.6)?;

    if let Some(games) = steal.min_games_for_starter_credit {
        config.starter_min_games = games;
    }

    if let Some(points) = &steal.award_points {
        let target = &mut config.awards.points;
        target.mvp = points.mvp.unwrap_or(target.mvp);
        target.dpoy = points.dpoy.unwrap_or(target.dpoy);
        target.opoy = points.opoy.unwrap_or(target.opoy);
        target.first_team_all_pro = points.ap1.unwrap_or(target.first_team_all_pro);
        target.second_team_all_pro = points.ap2.unwrap_or(target.second_team_all_pro);
        target.pro_bowl = points.pb.unwrap_or(target.pro_bowl);
        target.oroy = points.oroy.unwrap_or(target.oroy);
        target.droy = points.droy.unwrap_or(target.droy);
    }

    // Non-positive normalizers fall back to the default.
    for (tier, norm) in tier_values(steal.award_norm.as_ref(), "steal.awardNorm")? {
        let norm = if norm > 0.0 { norm } else { DEFAULT_AWARD_NORM };
        config.awards.norms.set(tier, norm);
    }

    if let Some(multiplier) = steal.late_round_award_multiplier {
        config.awards.late_round_multiplier = multiplier;
    }

    let weights = &mut config.steal.weights;
    weights.av_over = steal.av_over_weight.unwrap_or(weights.av_over);
    weights.award = steal.award_weight.unwrap_or(weights.award);
    weights.usage_over = steal.usage_over_weight.unwrap_or(weights.usage_over);
    weights.starter = steal.starter_weight.unwrap_or(weights.starter);

    Ok(())
}
