use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistError {
    // Network errors
    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Redirect limit of {limit} exceeded for {url}")]
    RedirectLimit { url: String, limit: u32 },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    // Archive errors
    #[error("Corrupt archive {path}: {reason}")]
    ArchiveCorrupt { path: PathBuf, reason: String },

    // JSON errors
    #[error("Failed to parse {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DistError>;
