//! Top-level error composing every component's own error enum, the way
//! the teacher crate's `XCheckerError` composes its sub-errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Library(#[from] eaglecooler_library::LibraryError),

    #[error(transparent)]
    Config(#[from] eaglecooler_config::ConfigError),
}
