//! Error types for reading browser bookmark sources.
//!
//! Every variant carries the path of the source it came from so that the
//! import report can say which browser file misbehaved.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be read (permissions, removed after the
    /// existence check, ...).
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a Chromium bookmark tree.
    #[error("could not parse bookmark JSON in {path:?}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not open firefox database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not query firefox bookmarks in {path:?}: {source}")]
    Query {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A single row could not be decoded. Always recoverable; the reader
    /// skips the row.
    #[error("skipping undecodable bookmark row in {path:?}: {source}")]
    RowDecode {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

pub type ImportResult<T> = std::result::Result<T, ImportError>;
