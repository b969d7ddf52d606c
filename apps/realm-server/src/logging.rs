//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for the given verbosity, falling back to the configured level.
#[must_use]
pub fn effective_level(cfg: &LoggingConfig, verbose: u8) -> &str {
    match verbose {
        0 => cfg.level.as_str(),
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
///
/// # Errors
///
/// Returns an error if the directive is invalid or a subscriber is already installed.
pub fn init(cfg: &LoggingConfig, verbose: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(effective_level(cfg, verbose))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Text => registry.with(fmt::layer()).try_init()?,
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let cfg = LoggingConfig {
            level: "warn,realm_gateway=info".to_owned(),
            ..LoggingConfig::default()
        };

        assert_eq!(effective_level(&cfg, 0), "warn,realm_gateway=info");
        assert_eq!(effective_level(&cfg, 1), "debug");
        assert_eq!(effective_level(&cfg, 3), "trace");
    }
}
