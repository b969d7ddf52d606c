//! Configuration for the static realm delegate plugin.

use std::collections::BTreeMap;

use realm_gateway_sdk::properties::DEFAULT_BACKEND_ADDRESS;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticRealmPluginConfig {
    /// Directory address the plugin binds itself under.
    pub address: String,

    /// Known users.
    pub users: Vec<StaticUser>,
}

impl Default for StaticRealmPluginConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_BACKEND_ADDRESS.to_owned(),
            users: Vec::new(),
        }
    }
}

/// A user known to the static delegate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StaticUser {
    pub username: String,

    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub password: SecretString,

    #[serde(default)]
    pub groups: Vec<String>,

    /// Attributes attached to the returned identity.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    /// Whether a successful login returns an identity (`false`: none).
    #[serde(default = "default_identity")]
    pub identity: bool,
}

fn default_identity() -> bool {
    true
}
