//=========================================================================
// Logging
//
// Installs `env_logger` as the `log` sink.
//
// The filter comes from `RUST_LOG` when set, otherwise from the default
// passed in. Installing twice is harmless: the second call is ignored.
//
//=========================================================================

use env_logger::{Builder, Env};
use log::debug;

/// Filter used when neither `RUST_LOG` nor the caller names one.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the logger with the [`DEFAULT_FILTER`].
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// Installs the logger with `filter` as the fallback directive string
/// (e.g. `"debug"` or `"ember=trace,winit=warn"`).
///
/// Returns `false` if a logger was already installed.
pub fn init_with_filter(filter: &str) -> bool {
    let installed = Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        debug!(target: "application", "Logger installed (fallback filter '{}')", filter);
    }
    installed
}

//=========================================================================
// Unit Tests
//=========================================================================
