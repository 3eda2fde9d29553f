//! Error types for catalog loading, submission and persistence.

use thiserror::Error;

/// Failure to fetch or decode the static catalog.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Malformed catalog data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog location: {0}")]
    Location(String),
}

/// A single problem with a user submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Website URL is required")]
    WebsiteRequired,

    #[error("Invalid website URL: {0}")]
    InvalidUrl(String),
}

/// The website has no domain a favicon can be derived from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No domain in website URL: {0}")]
pub struct IconResolutionError(pub String);

/// Failure reading or writing the key-value store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode value for key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage rejected write for key {0}")]
    Rejected(String),
}

/// Why adding an entry did not go through.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid submission: {0:?}")]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
