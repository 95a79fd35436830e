//! Read-only provider backed by a JSON fixture on disk.

use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::{ProviderError, Result};
use super::{PlayerDataProvider, PlayerFilter, ScoreUpdates};
use crate::player::PlayerStats;
use crate::scoring::CalculatorKind;

/// Either a bare array of players or `{"players": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerDocument {
    List(Vec<PlayerStats>),
    Wrapped { players: Vec<PlayerStats> },
}

impl PlayerDocument {
    fn into_players(self) -> Vec<PlayerStats> {
        match self {
            PlayerDocument::List(players) => players,
            PlayerDocument::Wrapped { players } => players,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlayerDataProvider for FileProvider {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_players(&self, filter: &PlayerFilter) -> Result<Vec<PlayerStats>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProviderError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let document: PlayerDocument = serde_json::from_str(&contents)?;
        let players: Vec<PlayerStats> = document
            .into_players()
            .into_iter()
            .filter(|player| filter.matches(player))
            .collect();

        debug!("Loaded {} players from {}", players.len(), self.path.display());
        Ok(players)
    }

    async fn bulk_update(&self, _kind: CalculatorKind, updates: &ScoreUpdates) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }
        Err(ProviderError::ReadOnly(self.name()))
    }
}
