//! Configuration for the realm gateway.

use realm_gateway_sdk::RealmProperties;
use realm_gateway_sdk::properties::DEFAULT_CONTEXT_NAME;
use serde::{Deserialize, Serialize};

/// Configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RealmGatewayConfig {
    /// Login context the host routes to this gateway's login module.
    ///
    /// Must equal the realm's `context-name` property, otherwise every login
    /// fails as misconfigured.
    pub login_context: String,

    /// Realm properties passed verbatim to the delegate.
    ///
    /// Recognized keys: `context-name`, `display-name`, `backend-address`.
    pub properties: RealmProperties,
}

impl Default for RealmGatewayConfig {
    fn default() -> Self {
        Self {
            login_context: DEFAULT_CONTEXT_NAME.to_owned(),
            properties: RealmProperties::default(),
        }
    }
}
