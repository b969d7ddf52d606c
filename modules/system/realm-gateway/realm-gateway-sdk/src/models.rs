//! Domain models for the realm gateway module.

use std::collections::{BTreeMap, BTreeSet};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Username/password pair presented by a caller.
///
/// The password is wrapped in `SecretString`, so `Debug` redacts it.
/// An empty password is a regular login attempt, not "no password".
#[derive(Debug, Clone)]
pub struct Credential {
    username: String,
    password: SecretString,
}

impl Credential {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Identity (principal) produced by a delegate after successful authentication.
///
/// The gateway attaches it to the subject as-is and imposes no meaning on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier chosen by the delegate.
    pub id: String,
    /// Additional delegate-defined attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Unordered set of group (role) names. Empty is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSet(BTreeSet<String>);

impl GroupSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.0.contains(group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for GroupSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for GroupSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The caller's security subject after a committed login.
///
/// Only built once authentication and group lookup both succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subject {
    principals: Vec<Identity>,
    groups: GroupSet,
}

impl Subject {
    /// Commit an optional identity and the resolved groups.
    #[must_use]
    pub fn commit(identity: Option<Identity>, groups: GroupSet) -> Self {
        Self {
            principals: identity.into_iter().collect(),
            groups,
        }
    }

    #[must_use]
    pub fn principals(&self) -> &[Identity] {
        &self.principals
    }

    #[must_use]
    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Identity>, GroupSet) {
        (self.principals, self.groups)
    }
}

/// Names under which a realm is known to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealmInfo {
    /// Login context routing key.
    pub context_name: String,
    /// Human-readable realm label.
    pub display_name: String,
}
