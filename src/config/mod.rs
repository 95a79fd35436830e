mod schema;

pub use schema::{ScoringFile, TierMappingsFile};

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::ScoringConfig;
use crate::tier::TierConfig;

pub const TIER_MAPPINGS_STEM: &str = "tier-mappings";
pub const SCORING_STEM: &str = "scoring";

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Both configuration documents, converted and ready to use.
#[derive(Debug, Clone)]
pub struct Config {
    pub dir: PathBuf,
    pub tiers: TierConfig,
    pub scoring: ScoringConfig,
}

/// Get the per-user config directory (~/.config/draft-signal/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("draft-signal"))
}

/// Pick the config directory: an explicit path, else `./config` when it
/// exists, else the per-user directory.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let local = PathBuf::from("config");
    if local.is_dir() {
        return Ok(local);
    }
    get_config_dir()
}

/// Find `<stem>.json`, `<stem>.yaml` or `<stem>.yml` in `dir`, in that order.
fn find_document(dir: &Path, stem: &str) -> Result<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
        .with_context(|| {
            format!(
                "Config file not found: {}",
                dir.join(format!("{}.json", stem)).display()
            )
        })
}

fn parse_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    if is_yaml {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: invalid JSON in {}", path.display()))
    }
}

/// Load the tier mapping document from `dir`.
pub fn load_tier_config(dir: &Path) -> Result<TierConfig> {
    let path = find_document(dir, TIER_MAPPINGS_STEM)?;
    debug!("Loading tier mappings from {}", path.display());
    let file: TierMappingsFile = parse_document(&path)?;
    TierConfig::try_from(file).with_context(|| format!("Invalid tier mappings in {}", path.display()))
}

/// Load the scoring document from `dir`.
pub fn load_scoring_config(dir: &Path) -> Result<ScoringConfig> {
    let path = find_document(dir, SCORING_STEM)?;
    debug!("Loading scoring config from {}", path.display());
    let file: ScoringFile = parse_document(&path)?;
    ScoringConfig::try_from(file).with_context(|| format!("Invalid scoring config in {}", path.display()))
}

/// Load configuration from a directory
///
/// # Arguments
///
/// * `dir` - Optional config directory. If None, uses `./config` or ~/.config/draft-signal/
///
/// # Errors
///
/// Returns an error if:
/// - Either document does not exist
/// - A document cannot be read
/// - A document is not valid JSON/YAML, or names an unknown tier
pub fn load_config(dir: Option<PathBuf>) -> Result<Config> {
    let dir = resolve_config_dir(dir)?;

    let tiers = load_tier_config(&dir)?;
    let scoring = load_scoring_config(&dir)?;

    Ok(Config { dir, tiers, scoring })
}
