//! Crate error type
//!
//! The simulation itself never fails; everything here comes from file I/O,
//! record validation or thread setup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = AtriumError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AtriumError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("no {kind} with id {id}")]
    UnknownRecord { kind: &'static str, id: u64 },

    #[error("failed to start arcade scheduler: {0}")]
    Spawn(#[source] io::Error),
}

impl AtriumError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
