use crate::model::BatchProgress;
use thiserror::Error;

/// Errors that can occur during recipe import operations.
///
/// Nothing here is fatal to the host process: every failure is either
/// caught-and-degraded (malformed metadata blocks, malformed archive
/// entries, unparsable quantities) or surfaced to the caller as one of
/// these variants.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The HTTP response fetching a URL was not successful.
    #[error("Failed to fetch URL: HTTP status {status}")]
    Fetch { status: u16 },

    /// Network-level failure reaching a URL.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The archive container could not be opened at all.
    #[error("Malformed archive container: {0}")]
    MalformedContainer(String),

    /// The multipart body could not be decoded.
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),

    /// An external capability (text structuring, semantic matching) failed.
    #[error("Capability error: {0}")]
    Capability(String),

    /// Error parsing HTTP headers.
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Error from the persistence collaborator.
#[derive(Error, Debug)]
#[error("persistence error: {0}")]
pub struct StoreError(pub String);

/// A batch import failed at one item. Items before `progress.current` are
/// persisted and stay persisted; the failing item and everything after it
/// were not attempted.
#[derive(Error, Debug)]
#[error("batch import failed at item {}/{}: {source}", .progress.current + 1, .progress.total)]
pub struct BatchImportError {
    /// Progress frozen at the last successful item.
    pub progress: BatchProgress,
    #[source]
    pub source: StoreError,
}
