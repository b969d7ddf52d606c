//! Server configuration.
//!
//! Layering, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. YAML file (`--config`)
//! 3. Environment variables prefixed with `REALM_SERVER__`, nested keys
//!    separated by `__` (e.g. `REALM_SERVER__SERVER__BIND_ADDR`)

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use realm_gateway::config::RealmGatewayConfig;
use realm_gateway_sdk::properties::{
    BACKEND_ADDRESS_PROPERTY, CONTEXT_NAME_PROPERTY, DISPLAY_NAME_PROPERTY,
};
use serde::{Deserialize, Serialize};
use static_realm_plugin::config::StaticRealmPluginConfig;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "REALM_SERVER__";

/// Placeholder printed for realm property values that may be delegate secrets.
pub const REDACTED: &str = "<redacted>";

/// Realm properties whose values are printed as-is.
const PRINTABLE_PROPERTIES: [&str; 3] = [
    CONTEXT_NAME_PROPERTY,
    DISPLAY_NAME_PROPERTY,
    BACKEND_ADDRESS_PROPERTY,
];

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_owned()
}

fn default_body_limit_bytes() -> usize {
    64 * 1024
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Realm gateway wiring and realm properties.
    pub realm: RealmGatewayConfig,
    /// Users served by the built-in static delegate.
    pub static_delegate: StaticRealmPluginConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Request body size limit in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load the configuration from defaults, an optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path
            && !path.is_file()
        {
            anyhow::bail!("configuration file not found: {}", path.display());
        }
        Self::from_figment(&Self::figment(path))
    }

    /// The configuration as JSON, safe to print.
    ///
    /// User passwords are never serialized. Realm properties other than the
    /// recognized names and address are delegate options and may carry
    /// credentials, so their values are replaced with [`REDACTED`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_printable_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(properties) = value
            .pointer_mut("/realm/properties")
            .and_then(serde_json::Value::as_object_mut)
        {
            for (key, slot) in properties.iter_mut() {
                if !PRINTABLE_PROPERTIES.contains(&key.as_str()) {
                    *slot = serde_json::Value::String(REDACTED.to_owned());
                }
            }
        }
        Ok(value)
    }

    /// Extract the configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong shape or an unknown key is present.
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        figment
            .extract()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))
    }
}
