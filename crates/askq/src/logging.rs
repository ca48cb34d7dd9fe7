//! Tracing subscriber initialization
//!
//! Logs go to stderr so stdout carries only the JSON document.
//!
//! # Priority (highest to lowest)
//!
//! 1. `ASKQ_LOG` env var (directives, e.g. `askq_core=debug`)
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` → debug, `-q` → error)
//! 4. Default level: `warn`

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Verbosity level derived from CLI flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet`: only errors
    Quiet,
    /// Default: warnings and above
    Normal,
    /// `--verbose`: debug-level output
    Verbose,
}

impl Verbosity {
    /// Determine verbosity from the parsed CLI flags; verbose wins over quiet
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Map to a default `tracing::Level`
    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Initialize the global tracing subscriber
///
/// Call once, early in `main()`. A second call is ignored.
pub fn init_subscriber(verbosity: Verbosity) {
    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt_layer)
        .try_init();
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    if let Ok(directives) = std::env::var("ASKQ_LOG") {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(verbosity.default_level().to_string().to_lowercase())
}
