use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single suggestion lookup.
///
/// The controller never surfaces these to the user; a failed lookup renders as
/// "no suggestions".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no lookup endpoint configured")]
    MissingEndpoint,
    #[error("lookup cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("lookup endpoint {url} answered with status {code}")]
    Status { code: u16, url: String },
    #[error("malformed suggestion response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("i/o error while reading response: {0}")]
    Io(#[from] io::Error),
}

impl LookupError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid json config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension for {0} (expected .yaml, .yml or .json)")]
    UnsupportedExtension(PathBuf),
}
