//! Cloudflare D1 (SQL over HTTP) provider.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, RetryIf};

use super::bulk::{build_bulk_updates, Statement};
use super::error::{ProviderError, Result};
use super::query::build_player_query;
use super::{PlayerDataProvider, PlayerFilter, ScoreUpdates};
use crate::player::PlayerStats;
use crate::scoring::CalculatorKind;

pub const ACCOUNT_ID_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const DATABASE_ID_VAR: &str = "CLOUDFLARE_DATABASE_ID";
pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Retries after the first attempt, for connection failures only.
pub const DEFAULT_MAX_RETRIES: usize = 1;
const RETRY_DELAY_MS: u64 = 1000;

const API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Clone, PartialEq, Eq)]
pub struct D1Credentials {
    pub account_id: String,
    pub database_id: String,
    api_token: String,
}

impl D1Credentials {
    /// All three values are required; blanks count as missing.
    pub fn new(
        account_id: impl Into<String>,
        database_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            account_id: account_id.into(),
            database_id: database_id.into(),
            api_token: api_token.into(),
        };

        let missing: Vec<&str> = [
            (ACCOUNT_ID_VAR, &credentials.account_id),
            (DATABASE_ID_VAR, &credentials.database_id),
            (API_TOKEN_VAR, &credentials.api_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ProviderError::MissingCredentials(missing.join(", ")));
        }
        Ok(credentials)
    }

    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self::new(var(ACCOUNT_ID_VAR), var(DATABASE_ID_VAR), var(API_TOKEN_VAR))
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/accounts/{}/d1/database/{}/query",
            API_BASE, self.account_id, self.database_id
        )
    }
}

impl fmt::Debug for D1Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("D1Credentials")
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResult {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    result: Vec<QueryResult>,
}

/// Rows from `result[0].results`, or the API's own error messages.
fn parse_envelope(body: &str) -> Result<Vec<Value>> {
    let envelope: QueryEnvelope = serde_json::from_str(body)?;

    if envelope.success == Some(false) {
        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect();
        let detail = if messages.is_empty() {
            "API reported failure".to_string()
        } else {
            messages.join("; ")
        };
        return Err(ProviderError::Api(detail));
    }

    Ok(envelope
        .result
        .into_iter()
        .next()
        .map(|first| first.results)
        .unwrap_or_default())
}

pub struct D1Client {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
    max_retries: usize,
}

impl D1Client {
    pub fn new(credentials: D1Credentials, timeout: Duration, max_retries: usize) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("draft-signal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: credentials.endpoint(),
            api_token: credentials.api_token,
            max_retries,
        })
    }

    /// Point the client at a different query URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, statement: &Statement) -> Result<Vec<Value>> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(statement)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_envelope(&body)
    }

    /// Run one statement, retrying only when the connection itself fails.
    pub async fn execute(&self, statement: &Statement) -> Result<Vec<Value>> {
        let strategy = FixedInterval::from_millis(RETRY_DELAY_MS).take(self.max_retries);

        let result = RetryIf::start(
            strategy,
            || self.send_once(statement),
            |err: &ProviderError| {
                let retry = err.is_connect();
                if retry {
                    warn!("Database connection failed, retrying: {}", err);
                }
                retry
            },
        )
        .await;

        result.map_err(|err| match err {
            ProviderError::Request(source) if source.is_connect() => ProviderError::Connect {
                attempts: self.max_retries + 1,
                source,
            },
            other => other,
        })
    }
}

impl PlayerDataProvider for D1Client {
    fn name(&self) -> String {
        "Cloudflare D1".to_string()
    }

    async fn fetch_players(&self, filter: &PlayerFilter) -> Result<Vec<PlayerStats>> {
        let statement = build_player_query(filter);
        debug!("Fetching players with {:?}", filter);

        let rows = self.execute(&statement).await?;
        debug!("Query returned {} rows", rows.len());

        rows.into_iter()
            .map(|row| serde_json::from_value::<PlayerStats>(row).map_err(ProviderError::from))
            .collect()
    }

    async fn bulk_update(&self, kind: CalculatorKind, updates: &ScoreUpdates) -> Result<usize> {
        let statements = build_bulk_updates(kind, updates);
        for (i, statement) in statements.iter().enumerate() {
            debug!(
                "Writing {} batch {}/{} ({} players)",
                kind,
                i + 1,
                statements.len(),
                statement.params.len()
            );
            self.execute(statement).await?;
        }
        Ok(statements.len())
    }
}
