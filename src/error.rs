//! Error types for variable access and the in-process host.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`Host`](crate::host::Host).
#[derive(Debug, Error)]
pub enum HostError {
    /// The request could not be delivered or its response could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),

    /// The host raised an error while evaluating the expression or command.
    #[error("{0}")]
    Evaluation(String),

    /// A request parameter could not be encoded.
    #[error("failed to encode request parameter: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned by the variable accessors.
#[derive(Debug, Error)]
pub enum VarError {
    /// Passed through from the host untouched.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The property cannot be spelled as part of a variable name.
    #[error("illegal variable name: {0:?}")]
    InvalidName(String),

    /// A default or value could not be serialized.
    #[error("failed to serialize value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from loading or running rhai scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("script parse error: {0}")]
    Parse(String),

    #[error("script error: {0}")]
    Runtime(String),
}

/// Result type for host requests.
pub type HostResult<T> = Result<T, HostError>;

/// Result type for variable accessors.
pub type VarResult<T> = Result<T, VarError>;
