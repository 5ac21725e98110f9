//! Error types for input feeds and ephemerides

use std::path::PathBuf;
use thiserror::Error;

/// Failures reading the tracked-body feed or the star catalog
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("cannot read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read catalog {path:?}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} is empty or has no header")]
    Empty { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Failed to load SPK file: {0}")]
    SpkLoadError(String),
    #[error("Body not found: {0}")]
    BodyNotFound(String),
    #[error("ephemeris source '{0}' is not available in this build")]
    Unavailable(String),
}
