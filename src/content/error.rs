//! Collection errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::FrontMatterError;

/// Failure to collect a content directory. Any single failing file aborts
/// the whole collection.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse front-matter in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: FrontMatterError) -> Self {
        CollectError::Parse {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            CollectError::Io { path, .. } | CollectError::Parse { path, .. } => path,
        }
    }
}
