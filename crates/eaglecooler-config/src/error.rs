//! Error kinds for the Scoped Config Store (spec.md §7).

use eaglecooler_utils::error::FileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    File(#[from] FileError),

    #[error("init_plugin_context must be called before any scoped config operation")]
    PluginContextNotInitialized,

    #[error("this scope descriptor requires a library identity but none was supplied")]
    LibraryContextRequired,
}
