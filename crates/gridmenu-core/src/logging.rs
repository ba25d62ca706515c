#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! `trace!` and `trace_span!` forward to `tracing` with the `tracing` feature
//! and expand to nothing without it, so dependent crates log without
//! depending on `tracing` themselves.
//!
//! With `tracing-json`, [`init`] installs a global subscriber filtered by the
//! `GRIDMENU_LOG` environment variable (default `info`).

#[cfg(feature = "tracing")]
pub use tracing::{trace, trace_span};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "GRIDMENU_LOG";

/// Install a global subscriber.
///
/// `json` selects newline-delimited JSON output instead of the human format.
/// Returns `false` when a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init(json: bool) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

// Without the `tracing` feature the macros compile to nothing.
#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Discards its arguments.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Evaluates to an inert [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span stand-in returned by `trace_span!` without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `tracing::Span::entered`.
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::entered`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
