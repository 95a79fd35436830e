use log::{debug, info};

use crate::config::Config;
use crate::provider::error::Result;
use crate::provider::{PlayerDataProvider, PlayerFilter, ScoreUpdates};
use crate::scoring::{build_calculator, score_roster, CalculatorKind, CalculatorResult};
use crate::tier::TierResolver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Write scores back through the provider. Off means a dry run.
    pub persist: bool,
    pub filter: PlayerFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub kind: CalculatorKind,
    pub dry_run: bool,
    /// In the order the provider returned the players.
    pub results: Vec<CalculatorResult>,
    pub statements_issued: usize,
}

impl RunReport {
    /// Players whose verdict came back true. Always zero for grades.
    pub fn flagged_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict.flagged() == Some(true))
            .count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        let sum: f64 = self.results.iter().map(|r| r.score).sum();
        Some(sum / self.results.len() as f64)
    }
}

/// Fetch the roster, score every player, and optionally persist.
///
/// Persisting sends a single bulk update covering the whole run.
pub async fn run_calculator<P>(
    provider: &P,
    config: &Config,
    kind: CalculatorKind,
    options: RunOptions,
) -> Result<RunReport>
where
    P: PlayerDataProvider,
{
    info!("Fetching players from {}", provider.name());
    let players = provider.fetch_players(&options.filter).await?;
    debug!("Scoring {} players with the {} calculator", players.len(), kind);

    // The rayon fan-out runs on the blocking pool, not a runtime worker.
    let tiers = config.tiers.clone();
    let scoring = config.scoring.clone();
    let results = tokio::task::spawn_blocking(move || {
        let resolver = TierResolver::new(tiers);
        let calculator = build_calculator(kind, &resolver, &scoring);
        score_roster(calculator.as_ref(), &players)
    })
    .await?;

    let statements_issued = if options.persist {
        let updates = ScoreUpdates::from_results(&results);
        let issued = provider.bulk_update(kind, &updates).await?;
        info!("Persisted {} {} scores in {} statements", updates.len(), kind, issued);
        issued
    } else {
        0
    };

    Ok(RunReport {
        kind,
        dry_run: !options.persist,
        results,
        statements_issued,
    })
}
