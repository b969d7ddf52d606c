//! Domain service for the realm gateway.

use std::future::Future;
use std::sync::Arc;

use realm_gateway_sdk::{
    DelegateDirectory, GroupSet, Identity, RealmDelegateClient, RealmDelegateError, RealmInfo,
    RealmProperties,
};
use secrecy::SecretString;
use tracing::{debug, error, warn};

use super::error::{AuthError, DomainError, GroupLookupError};
use super::locator::DelegateLocator;

/// Realm service: verifies credentials and resolves groups through the delegate.
///
/// Every delegate call goes through [`DelegateLocator`]. A call answered with
/// [`RealmDelegateError::Unavailable`] invalidates the handle, re-resolves it
/// once and retries once; the retry's outcome is final.
pub struct Realm {
    properties: RealmProperties,
    locator: DelegateLocator,
}

impl Realm {
    #[must_use]
    pub fn new(properties: RealmProperties, directory: Arc<dyn DelegateDirectory>) -> Self {
        let locator = DelegateLocator::new(directory, properties.backend_address());
        Self {
            properties,
            locator,
        }
    }

    #[must_use]
    pub fn context_name(&self) -> &str {
        self.properties.context_name()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.properties.display_name()
    }

    #[must_use]
    pub fn info(&self) -> RealmInfo {
        RealmInfo {
            context_name: self.context_name().to_owned(),
            display_name: self.display_name().to_owned(),
        }
    }

    #[must_use]
    pub fn locator(&self) -> &DelegateLocator {
        &self.locator
    }

    async fn call_delegate<T, F, Fut>(&self, operation: &'static str, call: F) -> Result<T, DomainError>
    where
        F: Fn(Arc<dyn RealmDelegateClient>) -> Fut,
        Fut: Future<Output = Result<T, RealmDelegateError>>,
    {
        let handle = self.locator.resolve().await?;

        match call(Arc::clone(handle.client())).await {
            Err(RealmDelegateError::Unavailable(reason)) => {
                warn!(
                    operation,
                    generation = handle.generation(),
                    reason = %reason,
                    "Realm delegate handle is stale, re-resolving once"
                );
                self.locator.invalidate(&handle).await;

                let fresh = self.locator.resolve().await?;
                let result = call(Arc::clone(fresh.client())).await;
                if let Err(RealmDelegateError::Unavailable(reason)) = &result {
                    warn!(
                        operation,
                        generation = fresh.generation(),
                        reason = %reason,
                        "Realm delegate still unavailable after re-resolution"
                    );
                    // Leave the slot empty for the next call; no further retry here
                    self.locator.invalidate(&fresh).await;
                }
                result.map_err(DomainError::from)
            }
            other => other.map_err(DomainError::from),
        }
    }

    /// Verify a credential through the delegate.
    ///
    /// # Errors
    ///
    /// Returns the opaque [`AuthError`] for any failure: rejection, unknown
    /// user, delegate lookup failure or internal delegate error.
    #[tracing::instrument(skip_all, fields(realm = %self.context_name()))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<Identity>, AuthError> {
        let properties = &self.properties;
        self.call_delegate("authenticate", move |client| async move {
            client.authenticate(properties, username, password).await
        })
        .await
        .map_err(|e| {
            log_authenticate_error(&e);
            AuthError
        })
    }

    /// Resolve the user's groups through the delegate.
    ///
    /// # Errors
    ///
    /// - `NoSuchUser` if the delegate does not know the user
    /// - `InvalidOperation` if the delegate reported an invalid operation,
    ///   and for every other failure (no detail retained)
    #[tracing::instrument(skip_all, fields(realm = %self.context_name()))]
    pub async fn group_names(&self, username: &str) -> Result<GroupSet, GroupLookupError> {
        let properties = &self.properties;
        self.call_delegate("group_names", move |client| async move {
            client.group_names(properties, username).await
        })
        .await
        .map_err(normalize_group_error)
    }
}

/// Log authentication errors at appropriate levels.
///
/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
fn log_authenticate_error(err: &DomainError) {
    match err {
        DomainError::Delegate(RealmDelegateError::Unauthorized(msg)) => {
            debug!(error = %msg, "Credential rejected by delegate");
        }
        // Already logged by the locator
        DomainError::Locator(_) => debug!("Authentication aborted: delegate not located"),
        DomainError::Delegate(RealmDelegateError::Internal(msg)) => {
            error!(error = %msg, "Delegate internal error during authentication");
        }
        DomainError::Delegate(other) => warn!(error = %other, "Delegate failed authentication"),
    }
}

fn normalize_group_error(err: DomainError) -> GroupLookupError {
    match err {
        DomainError::Delegate(RealmDelegateError::NoSuchUser(msg)) => {
            debug!(error = %msg, "Group lookup: no such user");
            GroupLookupError::NoSuchUser
        }
        DomainError::Delegate(RealmDelegateError::InvalidOperation(msg)) => {
            warn!(error = %msg, "Group lookup: invalid operation");
            GroupLookupError::InvalidOperation
        }
        other => {
            error!(error = %other, "Group lookup failed");
            GroupLookupError::InvalidOperation
        }
    }
}
