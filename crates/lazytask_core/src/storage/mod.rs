//! Flat-file persistence for the task list.
//!
//! # Responsibility
//! - Encode/decode tasks to the pipe-delimited line format.
//! - Load and atomically overwrite the save file.
//!
//! # Invariants
//! - Decoding never fails as a whole; malformed lines are skipped.
//! - Saving replaces the whole file, never appends.
//!
//! # See also
//! - `codec` for the line format.

pub mod codec;
mod file;

pub use file::TaskFile;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StorageResult<T> = Result<T, StorageError>;

/// I/O failure while reading or writing the save file.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}
