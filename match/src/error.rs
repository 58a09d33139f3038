//! Error types shared by the engine, the run layer and the service edge.

use crate::engine::entry::RunStatus;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("Canceled runs cannot be executed")]
    Canceled,
    #[error("Run cannot be canceled in its current state ({0:?})")]
    NotCancelable(RunStatus),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to decode request: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("command {0} requires a {1} payload")]
    MissingPayload(&'static str, &'static str),
    #[error("{count} participants exceeds the limit of {limit}")]
    TooManyParticipants { count: usize, limit: usize },
    #[error(transparent)]
    Run(#[from] RunError),
}

impl EngineError {
    /// True when the caller sent something malformed, as opposed to a request
    /// that conflicts with the current run state
    pub fn is_bad_request(&self) -> bool {
        !matches!(
            self,
            EngineError::Run(RunError::Canceled) | EngineError::Run(RunError::NotCancelable(_))
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid listen address {0}")]
    Addr(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: hyper::Error,
    },
}
