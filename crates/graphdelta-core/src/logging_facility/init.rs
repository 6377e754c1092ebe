//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Default filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "graphdelta=debug",
            Profile::Production => "graphdelta=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup; later calls are no-ops.
///
/// - **Development**: human-readable logs, debug level
/// - **Production**: JSON structured logs, info level
/// - **Test**: bare registry; use `init_test_capture()` to record events
///
/// ```
/// use graphdelta_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
        };
        // try_init: a host may already own the global subscriber
        match profile {
            Profile::Development => {
                let _ = tracing_subscriber::fmt().with_env_filter(filter()).try_init();
            }
            Profile::Production => {
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter())
                    .try_init();
            }
            Profile::Test => {
                let _ = tracing_subscriber::registry().try_init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Profile::Development.default_directive(), "graphdelta=debug");
        assert_eq!(Profile::Production.default_directive(), "graphdelta=info");
        assert_ne!(Profile::Development, Profile::Production);
    }
}
