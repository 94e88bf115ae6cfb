//! Logging bootstrap for host binaries.
//!
//! Library crates in this workspace only emit `tracing` events. A host that
//! wants them on stderr calls one of the installers below once at startup.
//! Both honor `RUST_LOG` when it is set and fall back to the given directive.
//!
//! ```rust,ignore
//! splitgrid_core::logging::init_logging("splitgrid_layout=debug")?;
//! ```

#[cfg(feature = "tracing-json")]
use tracing_subscriber::EnvFilter;

/// Default filter directive when neither `RUST_LOG` nor the caller gives one.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Failure to install a global subscriber.
#[derive(Debug)]
pub enum LoggingInitError {
    /// The filter directive did not parse.
    #[cfg(feature = "tracing-json")]
    Filter(tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    AlreadyInstalled(String),
}

impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "tracing-json")]
            Self::Filter(e) => write!(f, "invalid log filter directive: {e}"),
            Self::AlreadyInstalled(detail) => {
                write!(f, "global tracing subscriber already installed: {detail}")
            }
        }
    }
}

impl std::error::Error for LoggingInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "tracing-json")]
            Self::Filter(e) => Some(e),
            Self::AlreadyInstalled(_) => None,
        }
    }
}

#[cfg(feature = "tracing-json")]
fn build_filter(directive: &str) -> Result<EnvFilter, LoggingInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = if directive.trim().is_empty() {
        DEFAULT_DIRECTIVE
    } else {
        directive
    };
    EnvFilter::try_new(directive).map_err(LoggingInitError::Filter)
}

/// Install a human-readable stderr subscriber.
#[cfg(feature = "tracing-json")]
pub fn init_logging(directive: &str) -> Result<(), LoggingInitError> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingInitError::AlreadyInstalled(e.to_string()))
}

/// Install a JSON-lines stderr subscriber for production log shipping.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(directive: &str) -> Result<(), LoggingInitError> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingInitError::AlreadyInstalled(e.to_string()))
}
