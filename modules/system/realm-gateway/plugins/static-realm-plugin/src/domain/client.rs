//! Client implementation for the static realm delegate plugin.
//!
//! Implements `RealmDelegateClient` using the domain service.

use async_trait::async_trait;
use realm_gateway_sdk::{GroupSet, Identity, RealmDelegateClient, RealmDelegateError, RealmProperties};
use secrecy::SecretString;

use super::service::Service;

#[async_trait]
impl RealmDelegateClient for Service {
    async fn authenticate(
        &self,
        properties: &RealmProperties,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, RealmDelegateError> {
        self.authenticate(properties, username, password)
    }

    async fn group_names(
        &self,
        properties: &RealmProperties,
        username: &str,
    ) -> Result<GroupSet, RealmDelegateError> {
        self.group_names(properties, username)
    }
}
