//! Directory used to locate realm delegates.
//!
//! The gateway never holds a delegate directly; it asks a [`DelegateDirectory`]
//! for whatever is bound under the configured `backend-address`. Delegates
//! bind themselves on deployment and rebind on redeployment.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::DirectoryError;
use crate::plugin_api::RealmDelegateClient;

/// Lookup seam between the gateway and the delegate registry.
#[async_trait]
pub trait DelegateDirectory: Send + Sync {
    /// Return the delegate bound under `address`.
    ///
    /// # Errors
    ///
    /// - `NotBound` if nothing is bound under the address
    /// - `InvalidAddress` if the address is malformed
    async fn lookup(&self, address: &str) -> Result<Arc<dyn RealmDelegateClient>, DirectoryError>;
}

/// In-process directory keyed by address.
#[derive(Default)]
pub struct ClientDirectory {
    bindings: RwLock<HashMap<String, Arc<dyn RealmDelegateClient>>>,
}

impl ClientDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a delegate under `address`, returning the delegate it replaces.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` if the address is empty or contains whitespace.
    pub fn bind(
        &self,
        address: &str,
        client: Arc<dyn RealmDelegateClient>,
    ) -> Result<Option<Arc<dyn RealmDelegateClient>>, DirectoryError> {
        validate_address(address)?;
        let previous = self.bindings.write().insert(address.to_owned(), client);
        tracing::debug!(address, replaced = previous.is_some(), "Bound realm delegate");
        Ok(previous)
    }

    /// Remove the binding under `address`.
    pub fn unbind(&self, address: &str) -> Option<Arc<dyn RealmDelegateClient>> {
        let removed = self.bindings.write().remove(address);
        tracing::debug!(address, removed = removed.is_some(), "Unbound realm delegate");
        removed
    }

    #[must_use]
    pub fn is_bound(&self, address: &str) -> bool {
        self.bindings.read().contains_key(address)
    }
}

#[async_trait]
impl DelegateDirectory for ClientDirectory {
    async fn lookup(&self, address: &str) -> Result<Arc<dyn RealmDelegateClient>, DirectoryError> {
        validate_address(address)?;
        self.bindings
            .read()
            .get(address)
            .cloned()
            .ok_or_else(|| DirectoryError::NotBound {
                address: address.to_owned(),
            })
    }
}

fn validate_address(address: &str) -> Result<(), DirectoryError> {
    if address.is_empty() {
        return Err(DirectoryError::InvalidAddress {
            address: address.to_owned(),
            reason: "address is empty".to_owned(),
        });
    }
    if address.chars().any(char::is_whitespace) {
        return Err(DirectoryError::InvalidAddress {
            address: address.to_owned(),
            reason: "address contains whitespace".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::error::RealmDelegateError;
    use crate::models::{GroupSet, Identity};
    use crate::properties::RealmProperties;

    struct NamedDelegate(&'static str);

    #[async_trait]
    impl RealmDelegateClient for NamedDelegate {
        async fn authenticate(
            &self,
            _properties: &RealmProperties,
            _username: &str,
            _password: &SecretString,
        ) -> Result<Option<Identity>, RealmDelegateError> {
            Ok(Some(Identity::new(self.0)))
        }

        async fn group_names(
            &self,
            _properties: &RealmProperties,
            _username: &str,
        ) -> Result<GroupSet, RealmDelegateError> {
            Ok(GroupSet::new())
        }
    }

    async fn identity_of(directory: &ClientDirectory, address: &str) -> String {
        let client = directory.lookup(address).await.unwrap();
        client
            .authenticate(&RealmProperties::default(), "u", &SecretString::from(""))
            .await
            .unwrap()
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn lookup_returns_bound_delegate() {
        let directory = ClientDirectory::new();
        directory
            .bind("mock://ok", Arc::new(NamedDelegate("first")))
            .unwrap();

        assert!(directory.is_bound("mock://ok"));
        assert_eq!(identity_of(&directory, "mock://ok").await, "first");
    }

    #[tokio::test]
    async fn rebind_replaces_previous_delegate() {
        let directory = ClientDirectory::new();
        directory
            .bind("mock://ok", Arc::new(NamedDelegate("first")))
            .unwrap();
        let previous = directory
            .bind("mock://ok", Arc::new(NamedDelegate("second")))
            .unwrap();

        assert!(previous.is_some());
        assert_eq!(identity_of(&directory, "mock://ok").await, "second");
    }

    #[tokio::test]
    async fn lookup_of_unbound_address_fails() {
        let directory = ClientDirectory::new();
        directory
            .bind("mock://ok", Arc::new(NamedDelegate("first")))
            .unwrap();
        directory.unbind("mock://ok");

        match directory.lookup("mock://ok").await {
            Err(DirectoryError::NotBound { address }) => assert_eq!(address, "mock://ok"),
            Err(other) => panic!("Expected NotBound, got: {other:?}"),
            Ok(_) => panic!("Expected NotBound, got a delegate"),
        }
    }

    #[tokio::test]
    async fn malformed_addresses_are_rejected() {
        let directory = ClientDirectory::new();

        assert!(matches!(
            directory.bind("", Arc::new(NamedDelegate("x"))),
            Err(DirectoryError::InvalidAddress { .. })
        ));
        assert!(matches!(
            directory.lookup("mock:// ok").await,
            Err(DirectoryError::InvalidAddress { .. })
        ));
    }
}
