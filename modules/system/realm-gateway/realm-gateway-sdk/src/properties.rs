//! Realm properties shared by the gateway and its delegate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Login context routing key used by hosts to reach this realm.
pub const CONTEXT_NAME_PROPERTY: &str = "context-name";
/// Human-readable name of the realm.
pub const DISPLAY_NAME_PROPERTY: &str = "display-name";
/// Directory address of the delegate implementation.
pub const BACKEND_ADDRESS_PROPERTY: &str = "backend-address";

pub const DEFAULT_CONTEXT_NAME: &str = "RealmGatewayContext";
pub const DEFAULT_DISPLAY_NAME: &str = "RealmGateway";
pub const DEFAULT_BACKEND_ADDRESS: &str = "local://realm-ref/delegate";

/// Immutable option map supplied once at startup.
///
/// The gateway reads [`CONTEXT_NAME_PROPERTY`], [`DISPLAY_NAME_PROPERTY`] and
/// [`BACKEND_ADDRESS_PROPERTY`]; every other key is left for the delegate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RealmProperties(BTreeMap<String, String>);

impl RealmProperties {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    #[must_use]
    pub fn context_name(&self) -> &str {
        self.get_or(CONTEXT_NAME_PROPERTY, DEFAULT_CONTEXT_NAME)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.get_or(DISPLAY_NAME_PROPERTY, DEFAULT_DISPLAY_NAME)
    }

    #[must_use]
    pub fn backend_address(&self) -> &str {
        self.get_or(BACKEND_ADDRESS_PROPERTY, DEFAULT_BACKEND_ADDRESS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RealmProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_keys_are_absent() {
        let props = RealmProperties::default();

        assert_eq!(props.context_name(), DEFAULT_CONTEXT_NAME);
        assert_eq!(props.display_name(), DEFAULT_DISPLAY_NAME);
        assert_eq!(props.backend_address(), DEFAULT_BACKEND_ADDRESS);
    }

    #[test]
    fn configured_keys_override_defaults() {
        let props: RealmProperties = [
            (CONTEXT_NAME_PROPERTY, "FileRealmContext"),
            (DISPLAY_NAME_PROPERTY, "File Realm"),
            (BACKEND_ADDRESS_PROPERTY, "mock://ok"),
        ]
        .into_iter()
        .collect();

        assert_eq!(props.context_name(), "FileRealmContext");
        assert_eq!(props.display_name(), "File Realm");
        assert_eq!(props.backend_address(), "mock://ok");
    }

    #[test]
    fn unknown_keys_are_kept_for_delegates() {
        let props: RealmProperties = [("ldap-url", "ldap://localhost")].into_iter().collect();

        assert_eq!(props.get("ldap-url"), Some("ldap://localhost"));
        assert_eq!(props.iter().count(), 1);
    }
}
