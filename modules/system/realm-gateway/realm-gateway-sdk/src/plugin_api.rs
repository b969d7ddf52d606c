//! Plugin API trait for realm delegate implementations.
//!
//! Delegates implement this trait to provide credential verification and
//! group lookup (database, LDAP, file, static configuration, ...).
//! The gateway locates the delegate through a [`DelegateDirectory`](crate::DelegateDirectory)
//! and forwards both calls to it.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::RealmDelegateError;
use crate::models::{GroupSet, Identity};
use crate::properties::RealmProperties;

/// Plugin API trait for realm delegates.
///
/// Both calls receive the complete realm properties, so a delegate can define
/// and read options of its own next to the ones the gateway recognizes.
///
/// A delegate that has been retired or redeployed must answer
/// [`RealmDelegateError::Unavailable`]: the gateway treats it as a stale
/// handle, re-resolves the delegate once and retries the call.
#[async_trait]
pub trait RealmDelegateClient: Send + Sync {
    /// Verify a username/password pair.
    ///
    /// Returns `Some(identity)` to attach an identity to the subject, or
    /// `None` when authentication succeeded without any identity payload.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential is rejected
    /// - `Unavailable` if this delegate instance is no longer serving
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        properties: &RealmProperties,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, RealmDelegateError>;

    /// Return the groups (roles) of the user.
    ///
    /// # Errors
    ///
    /// - `NoSuchUser` if the user is not known
    /// - `InvalidOperation` if the lookup cannot be performed
    /// - `Unavailable` if this delegate instance is no longer serving
    /// - `Internal` for unexpected errors
    async fn group_names(
        &self,
        properties: &RealmProperties,
        username: &str,
    ) -> Result<GroupSet, RealmDelegateError>;
}
