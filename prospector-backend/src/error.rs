use prospector_common::ParameterError;
use thiserror::Error;

/// Startup configuration rejected before any cycle runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation parameters: {0}")]
    Simulation(#[from] ParameterError),

    #[error("polling interval must be between 1 and {max} seconds, got {got}")]
    IntervalOutOfRange { got: u64, max: u64 },

    #[error("catalog timeout must be between 1 and {max} seconds, got {got}")]
    TimeoutOutOfRange { got: u64, max: u64 },

    #[error("catalog retry delay must be at most {max} seconds, got {got}")]
    RetryDelayOutOfRange { got: u64, max: u64 },

    #[error("catalog base URL is empty")]
    EmptyBaseUrl,

    #[error("catalog max_retries must be at least 1")]
    ZeroRetries,

    #[error("no asteroid_id configured and candidate_ids is empty")]
    NoAsteroidCandidates,
}

/// A catalog fetch that did not produce a record
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {asset_id} failed: {source}")]
    Transport {
        asset_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {asset_id}")]
    Status {
        asset_id: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed catalog response for {asset_id}: {source}")]
    Decode {
        asset_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("bootstrap fetch for {asset_id} failed: {source}")]
    Bootstrap {
        asset_id: String,
        #[source]
        source: FetchError,
    },

    #[error("scheduler task ended abnormally: {0}")]
    Join(#[from] tokio::task::JoinError),
}
