//! Error types for samsara_db

use thiserror::Error;

/// Result type alias for samsara_db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in samsara_db operations
///
/// Expected lookup outcomes (missing key, type mismatch, no-op remove) are
/// reported as `None`/unchanged versions, never as errors. This enum covers
/// the fallible accessors only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("version {requested} out of range (latest is {latest})")]
    VersionOutOfRange { requested: usize, latest: usize },
}
