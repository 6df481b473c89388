//! Error kinds for Bare Library I/O (spec.md §7).

use eaglecooler_utils::error::FileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl LibraryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
