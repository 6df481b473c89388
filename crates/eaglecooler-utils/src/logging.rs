//! Structured logging setup, shared by every crate in the workspace.
//!
//! The core itself never calls this — it is a library, not a process
//! entry point — but it ships the initializer for the embedding
//! application to call once at startup, the same way the teacher crate
//! exposes `init_tracing` from its own `xchecker-utils`.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize a process-wide `tracing` subscriber.
///
/// `verbose` selects `debug` vs `info` as the default level when
/// `RUST_LOG` is unset. Safe to call more than once per process only the
/// first time; subsequent calls are no-ops (`try_init` swallows the
/// already-set error).
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_color())
                .compact(),
        )
        .try_init();
}
