//! Where players come from and where scores go.

pub mod bulk;
pub mod d1;
pub mod error;
pub mod file;
pub mod query;

pub use bulk::{build_bulk_updates, Statement, BATCH_SIZE};
pub use d1::{D1Client, D1Credentials};
pub use error::ProviderError;
pub use file::FileProvider;
pub use query::{build_player_query, EXCLUDED_DRAFT_YEARS};

use std::collections::HashMap;

use crate::player::PlayerStats;
use crate::scoring::{CalculatorKind, CalculatorResult};

/// Narrows which players are fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    /// Drafting team.
    pub team_id: Option<i64>,
    /// Draft class. Without one, seasons with incomplete data are skipped.
    pub draft_year: Option<i32>,
}

impl PlayerFilter {
    /// In-memory version of the filter the player query applies.
    pub fn matches(&self, player: &PlayerStats) -> bool {
        let team_ok = self
            .team_id
            .map_or(true, |team| player.draft_team_id == Some(team));
        team_ok && self.includes_draft_year(player.draft_year)
    }

    /// An explicit year must match exactly, otherwise the excluded classes are dropped.
    /// Players with no recorded year only pass when no year was asked for.
    pub fn includes_draft_year(&self, year: Option<i32>) -> bool {
        match (self.draft_year, year) {
            (Some(wanted), year) => year == Some(wanted),
            (None, Some(year)) => !EXCLUDED_DRAFT_YEARS.contains(&year),
            (None, None) => true,
        }
    }
}

/// Value written back for one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    /// `None` for calculators without a boolean verdict.
    pub verdict: Option<bool>,
    pub score: f64,
}

impl ScoreUpdate {
    pub fn new(verdict: Option<bool>, score: f64) -> Self {
        Self { verdict, score }
    }
}

/// Player id to update, iterated in insertion order.
///
/// Inserting an id that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreUpdates {
    entries: Vec<(i64, ScoreUpdate)>,
    index: HashMap<i64, usize>,
}

impl ScoreUpdates {
    pub fn from_results(results: &[CalculatorResult]) -> Self {
        results
            .iter()
            .map(|result| {
                let update = ScoreUpdate::new(result.verdict.flagged(), result.score);
                (result.player_id, update)
            })
            .collect()
    }

    pub fn insert(&mut self, player_id: i64, update: ScoreUpdate) {
        match self.index.get(&player_id) {
            Some(&position) => self.entries[position].1 = update,
            None => {
                self.index.insert(player_id, self.entries.len());
                self.entries.push((player_id, update));
            }
        }
    }

    pub fn get(&self, player_id: i64) -> Option<&ScoreUpdate> {
        self.index.get(&player_id).map(|&position| &self.entries[position].1)
    }

    pub fn entries(&self) -> &[(i64, ScoreUpdate)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(i64, ScoreUpdate)> for ScoreUpdates {
    fn from_iter<I: IntoIterator<Item = (i64, ScoreUpdate)>>(iter: I) -> Self {
        let mut updates = ScoreUpdates::default();
        for (player_id, update) in iter {
            updates.insert(player_id, update);
        }
        updates
    }
}

/// Source of player statistics and sink for computed scores.
#[allow(async_fn_in_trait)]
pub trait PlayerDataProvider {
    /// Human-readable name for log lines.
    fn name(&self) -> String;

    async fn fetch_players(&self, filter: &PlayerFilter) -> error::Result<Vec<PlayerStats>>;

    /// Write scores for `kind`. Returns the number of statements issued.
    async fn bulk_update(&self, kind: CalculatorKind, updates: &ScoreUpdates) -> error::Result<usize>;
}
