use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::MAX_LOADED_ID;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access catalog file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt record on line {line}: {field} `{value}` is not an integer")]
    Corrupt {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("corrupt record on line {line}: id {id} is larger than {max}", max = MAX_LOADED_ID)]
    IdOutOfRange { line: usize, id: i64 },
    #[error("corrupt record on line {line}: text is not valid UTF-8")]
    Encoding { line: usize },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
