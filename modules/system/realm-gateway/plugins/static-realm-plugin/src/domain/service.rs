//! Service implementation for the static realm delegate plugin.

use std::sync::atomic::{AtomicBool, Ordering};

use realm_gateway_sdk::{GroupSet, Identity, RealmDelegateError, RealmProperties};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::config::{StaticRealmPluginConfig, StaticUser};

/// Realm property enabling ASCII case-insensitive username matching.
pub const CASE_INSENSITIVE_USERNAMES_PROPERTY: &str = "case-insensitive-usernames";

/// Compared against when the user is unknown, so both paths do the same work.
const UNKNOWN_USER_PASSWORD: &[u8] = b"\0static-realm-unknown-user";

/// Static realm delegate service.
///
/// Holds the configured users. Once retired (undeployed or replaced by a
/// redeployment) every call answers `Unavailable`.
pub struct Service {
    users: Vec<StaticUser>,
    retired: AtomicBool,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticRealmPluginConfig) -> Self {
        Self {
            users: cfg.users.clone(),
            retired: AtomicBool::new(false),
        }
    }

    /// Mark this instance as no longer deployed.
    pub fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` for users configured with `identity: false`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if this instance is retired
    /// - `Unauthorized` if the user is unknown or the password does not match
    pub fn authenticate(
        &self,
        properties: &RealmProperties,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, RealmDelegateError> {
        self.ensure_live()?;

        let user = self.find_user(properties, username);
        let expected = user.map_or(UNKNOWN_USER_PASSWORD, |u| {
            u.password.expose_secret().as_bytes()
        });
        let matches = passwords_match(expected, password.expose_secret().as_bytes());

        let user = user
            .filter(|_| matches)
            .ok_or_else(|| RealmDelegateError::Unauthorized("invalid credentials".to_owned()))?;

        if !user.identity {
            return Ok(None);
        }

        let identity = user
            .attributes
            .iter()
            .fold(Identity::new(&user.username), |identity, (k, v)| {
                identity.with_attribute(k, v)
            });
        Ok(Some(identity))
    }

    /// Return the groups of a user.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if this instance is retired
    /// - `NoSuchUser` if the user is unknown
    pub fn group_names(
        &self,
        properties: &RealmProperties,
        username: &str,
    ) -> Result<GroupSet, RealmDelegateError> {
        self.ensure_live()?;

        let user = self
            .find_user(properties, username)
            .ok_or_else(|| RealmDelegateError::NoSuchUser(username.to_owned()))?;
        Ok(user.groups.iter().cloned().collect())
    }

    fn ensure_live(&self) -> Result<(), RealmDelegateError> {
        if self.is_retired() {
            return Err(RealmDelegateError::Unavailable(
                "static realm delegate is no longer deployed".to_owned(),
            ));
        }
        Ok(())
    }

    fn find_user(&self, properties: &RealmProperties, username: &str) -> Option<&StaticUser> {
        let case_insensitive = properties
            .get(CASE_INSENSITIVE_USERNAMES_PROPERTY)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        self.users.iter().find(|user| {
            if case_insensitive {
                user.username.eq_ignore_ascii_case(username)
            } else {
                user.username == username
            }
        })
    }
}

fn passwords_match(expected: &[u8], supplied: &[u8]) -> bool {
    expected.ct_eq(supplied).into()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn user(username: &str, password: &str, groups: &[&str]) -> StaticUser {
        StaticUser {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
            groups: groups.iter().map(|g| (*g).to_owned()).collect(),
            attributes: std::collections::BTreeMap::new(),
            identity: true,
        }
    }

    fn service() -> Service {
        let mut alice = user("alice", "correct", &["admin", "users"]);
        alice.attributes.insert("tenant".to_owned(), "acme".to_owned());
        let mut kiosk = user("kiosk", "", &["kiosk"]);
        kiosk.identity = false;

        Service::from_config(&StaticRealmPluginConfig {
            users: vec![alice, kiosk, user("bob", "hunter2", &[])],
            ..StaticRealmPluginConfig::default()
        })
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn valid_credentials_return_identity_with_attributes() {
        let identity = service()
            .authenticate(&RealmProperties::default(), "alice", &secret("correct"))
            .unwrap()
            .unwrap();

        assert_eq!(identity, Identity::new("alice").with_attribute("tenant", "acme"));
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let result =
            service().authenticate(&RealmProperties::default(), "alice", &secret("wrong"));
        assert!(matches!(result, Err(RealmDelegateError::Unauthorized(_))));
    }

    #[test]
    fn unknown_user_is_unauthorized_on_authenticate() {
        let result =
            service().authenticate(&RealmProperties::default(), "mallory", &secret("x"));
        assert!(matches!(result, Err(RealmDelegateError::Unauthorized(_))));
    }

    #[test]
    fn unknown_user_is_rejected_even_with_placeholder_password() {
        let placeholder = String::from_utf8(UNKNOWN_USER_PASSWORD.to_vec()).unwrap();
        let result =
            service().authenticate(&RealmProperties::default(), "mallory", &secret(&placeholder));
        assert!(matches!(result, Err(RealmDelegateError::Unauthorized(_))));
    }

    #[test]
    fn unknown_user_and_wrong_password_answer_alike() {
        let service = service();
        let unknown = service
            .authenticate(&RealmProperties::default(), "mallory", &secret("x"))
            .unwrap_err();
        let wrong = service
            .authenticate(&RealmProperties::default(), "alice", &secret("x"))
            .unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn password_comparison_requires_exact_match() {
        assert!(passwords_match(b"correct", b"correct"));
        assert!(!passwords_match(b"correct", b"correcT"));
        assert!(!passwords_match(b"correct", b"correct-and-more"));
        assert!(!passwords_match(b"correct", b""));
        assert!(passwords_match(b"", b""));
    }

    #[test]
    fn identityless_user_authenticates_without_identity() {
        let result = service()
            .authenticate(&RealmProperties::default(), "kiosk", &secret(""))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn group_names_for_known_user() {
        let groups = service()
            .group_names(&RealmProperties::default(), "alice")
            .unwrap();
        assert!(groups.contains("admin"));
        assert!(groups.contains("users"));
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn user_without_groups_has_empty_set() {
        let groups = service()
            .group_names(&RealmProperties::default(), "bob")
            .unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn unknown_user_has_no_groups() {
        let result = service().group_names(&RealmProperties::default(), "mallory");
        assert!(matches!(result, Err(RealmDelegateError::NoSuchUser(u)) if u == "mallory"));
    }

    #[test]
    fn usernames_are_case_sensitive_by_default() {
        let result = service().group_names(&RealmProperties::default(), "ALICE");
        assert!(matches!(result, Err(RealmDelegateError::NoSuchUser(_))));
    }

    #[test]
    fn case_insensitive_property_relaxes_matching() {
        let properties: RealmProperties = [(CASE_INSENSITIVE_USERNAMES_PROPERTY, "true")]
            .into_iter()
            .collect();
        let service = service();

        assert!(
            service
                .authenticate(&properties, "ALICE", &secret("correct"))
                .unwrap()
                .is_some()
        );
        assert_eq!(service.group_names(&properties, "Alice").unwrap().len(), 2);
    }

    #[test]
    fn retired_service_is_unavailable() {
        let service = service();
        service.retire();

        assert!(service.is_retired());
        assert!(matches!(
            service.authenticate(&RealmProperties::default(), "alice", &secret("correct")),
            Err(RealmDelegateError::Unavailable(_))
        ));
        assert!(matches!(
            service.group_names(&RealmProperties::default(), "alice"),
            Err(RealmDelegateError::Unavailable(_))
        ));
    }
}
