//! Error types for the data provider layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// One or more credential variables are unset or empty
    #[error("Missing required Cloudflare environment variables ({0})")]
    MissingCredentials(String),

    /// Could not reach the API, even after retrying
    #[error("Database connection failed after {attempts} attempts: {source}")]
    Connect {
        attempts: usize,
        #[source]
        source: reqwest::Error,
    },

    /// Request failed for a reason other than connecting (timeout, TLS, body)
    #[error("Database query failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Database query failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The API answered but reported the query as failed
    #[error("Database query failed: {0}")]
    Api(String),

    #[error("Unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read player file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Updates sent to a provider that cannot write
    #[error("{0} is read-only; re-run without --persist")]
    ReadOnly(String),

    /// The blocking scoring task panicked or was cancelled
    #[error("Scoring task failed: {0}")]
    Scoring(#[from] tokio::task::JoinError),
}

impl ProviderError {
    /// Failures worth retrying: the request never reached the server.
    pub fn is_connect(&self) -> bool {
        match self {
            ProviderError::Request(err) => err.is_connect(),
            _ => false,
        }
    }

    pub fn is_credentials(&self) -> bool {
        matches!(self, ProviderError::MissingCredentials(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_message() {
        let err = ProviderError::MissingCredentials("CLOUDFLARE_API_TOKEN".to_string());
        assert!(err
            .to_string()
            .starts_with("Missing required Cloudflare environment variables"));
        assert!(err.is_credentials());
        assert!(!err.is_connect());
    }

    #[test]
    fn test_status_message() {
        let err = ProviderError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "Database query failed with HTTP 403: forbidden");
        assert!(!err.is_credentials());
    }

    #[test]
    fn test_read_only_message() {
        let err = ProviderError::ReadOnly("players.json".to_string());
        assert!(err.to_string().contains("--persist"));
    }
}
