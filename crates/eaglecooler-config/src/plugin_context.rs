//! Process-wide plugin identity, established exactly once (spec.md §4.D,
//! §9 "exactly one call ... before any config or HTTP operation").

use crate::error::ConfigError;
use eaglecooler_host::PluginManifest;
use once_cell::sync::OnceCell;

static PLUGIN_ID: OnceCell<String> = OnceCell::new();

/// Establish the process-wide plugin id from the host's on-create
/// manifest. Subsequent calls after the first are no-ops — the id is
/// fixed for the life of the process.
pub fn init_plugin_context(manifest: &PluginManifest) {
    let _ = PLUGIN_ID.set(manifest.plugin_id());
}

/// The plugin id established by [`init_plugin_context`]. Any scope whose
/// section key depends on plugin identity (`thisPluginOnly`, or plugin
/// storage) calls this before deriving its key.
pub fn plugin_id() -> Result<&'static str, ConfigError> {
    PLUGIN_ID
        .get()
        .map(String::as_str)
        .ok_or(ConfigError::PluginContextNotInitialized)
}
