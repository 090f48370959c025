//! Logging bootstrap
//!
//! Engines only emit `tracing` events. Hosts that do not install their own
//! subscriber can call [`init_tracing`]; the filter comes from `RUST_LOG`
//! and defaults to `info`.

use tracing_subscriber::EnvFilter;

use clockity_core::{ClockError, ClockResult};

/// Output format of the fmt subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global fmt subscriber. Fails if one is already installed.
pub fn init_tracing(format: LogFormat) -> ClockResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ClockError::Logging(e.to_string()))
}
