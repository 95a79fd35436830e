use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

use super::bust::BustCalculator;
use super::config::ScoringConfig;
use super::grade::GradeCalculator;
use super::steal::StealCalculator;
use crate::player::PlayerStats;
use crate::tier::{Tier, TierResolver};

/// Which verdict a calculator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    Bust,
    Steal,
    Grade,
}

impl CalculatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CalculatorKind::Bust => "bust",
            CalculatorKind::Steal => "steal",
            CalculatorKind::Grade => "grade",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculator-specific outcome carried alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Verdict {
    Bust { is_bust: bool },
    Steal { is_steal: bool, auto_steal: bool },
    Grade,
}

impl Verdict {
    /// The boolean verdict, if this calculator has one.
    pub fn flagged(&self) -> Option<bool> {
        match self {
            Verdict::Bust { is_bust } => Some(*is_bust),
            Verdict::Steal { is_steal, .. } => Some(*is_steal),
            Verdict::Grade => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult {
    pub player_id: i64,
    pub player_name: String,
    pub tier: Tier,
    /// In [0,1], rounded to four decimals.
    pub score: f64,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl CalculatorResult {
    pub fn new(player: &PlayerStats, tier: Tier, score: f64, verdict: Verdict) -> Self {
        Self {
            player_id: player.id,
            player_name: player.name.clone(),
            tier,
            score,
            verdict,
        }
    }
}

/// A pure scoring function over one player.
///
/// Implementations hold only shared, read-only configuration, so the same
/// calculator can score many players concurrently.
pub trait Calculator: Send + Sync {
    fn kind(&self) -> CalculatorKind;

    fn calculate(&self, player: &PlayerStats) -> CalculatorResult;
}

/// Build the calculator for `kind` over the given configuration.
pub fn build_calculator<'a>(
    kind: CalculatorKind,
    resolver: &'a TierResolver,
    config: &'a ScoringConfig,
) -> Box<dyn Calculator + 'a> {
    match kind {
        CalculatorKind::Bust => Box::new(BustCalculator::new(resolver, config)),
        CalculatorKind::Steal => Box::new(StealCalculator::new(resolver, config)),
        CalculatorKind::Grade => Box::new(GradeCalculator::new(resolver, config)),
    }
}

/// Score every player in parallel. Output order matches input order.
pub fn score_roster<C>(calculator: &C, players: &[PlayerStats]) -> Vec<CalculatorResult>
where
    C: Calculator + ?Sized,
{
    players
        .par_iter()
        .map(|player| calculator.calculate(player))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::DraftSlot;
    use crate::tier::TierConfig;

    fn roster() -> Vec<PlayerStats> {
        (1..=40)
            .map(|i| {
                let mut player = PlayerStats::new(
                    i,
                    format!("Player {}", i),
                    "WR",
                    DraftSlot::Drafted {
                        round: 1 + (i as u32 * 7) / 40,
                        pick: i as u32 * 6,
                    },
                );
                player.first_stint.games_played = (i as u32 * 3) % 70;
                player.first_stint.games_started = (i as u32 * 2) % 50;
                player.first_stint.av = (i * 2) as i32;
                player.first_stint.seasons_played = (i as u32) % 6;
                player
            })
            .collect()
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(CalculatorKind::Bust.to_string(), "bust");
        assert_eq!(CalculatorKind::Steal.as_str(), "steal");
        assert_eq!(CalculatorKind::Grade.as_str(), "grade");
    }

    #[test]
    fn test_verdict_flagged() {
        assert_eq!(Verdict::Bust { is_bust: true }.flagged(), Some(true));
        assert_eq!(
            Verdict::Steal {
                is_steal: false,
                auto_steal: false
            }
            .flagged(),
            Some(false)
        );
        assert_eq!(Verdict::Grade.flagged(), None);
    }

    #[test]
    fn test_result_serializes_flat() {
        let player = PlayerStats::new(5, "Json Player", "TE", DraftSlot::Undrafted);
        let result = CalculatorResult::new(
            &player,
            Tier::Udfa,
            0.25,
            Verdict::Steal {
                is_steal: false,
                auto_steal: false,
            },
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["player_id"], 5);
        assert_eq!(value["tier"], "UDFA");
        assert_eq!(value["kind"], "steal");
        assert_eq!(value["is_steal"], false);
        assert_eq!(value["auto_steal"], false);
    }

    #[test]
    fn test_build_calculator_matches_kind() {
        let resolver = TierResolver::new(TierConfig::standard());
        let config = ScoringConfig::default();
        for kind in [CalculatorKind::Bust, CalculatorKind::Steal, CalculatorKind::Grade] {
            assert_eq!(build_calculator(kind, &resolver, &config).kind(), kind);
        }
    }

    #[test]
    fn test_score_roster_preserves_order_and_matches_sequential() {
        let resolver = TierResolver::new(TierConfig::standard());
        let config = ScoringConfig::default();
        let players = roster();

        for kind in [CalculatorKind::Bust, CalculatorKind::Steal, CalculatorKind::Grade] {
            let calculator = build_calculator(kind, &resolver, &config);
            let parallel = score_roster(calculator.as_ref(), &players);
            let sequential: Vec<_> = players.iter().map(|p| calculator.calculate(p)).collect();

            assert_eq!(parallel, sequential);
            for (result, player) in parallel.iter().zip(&players) {
                assert_eq!(result.player_id, player.id);
                assert!((0.0..=1.0).contains(&result.score));
            }
        }
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let resolver = TierResolver::new(TierConfig::standard());
        let config = ScoringConfig::default();
        let players = roster();

        for kind in [CalculatorKind::Bust, CalculatorKind::Steal, CalculatorKind::Grade] {
            let calculator = build_calculator(kind, &resolver, &config);
            for player in &players {
                let first = calculator.calculate(player);
                let second = calculator.calculate(player);
                assert_eq!(first.score.to_bits(), second.score.to_bits());
                assert_eq!(first, second);
            }
        }
    }
}
