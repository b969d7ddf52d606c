//! Cached, invalidatable reference to the realm delegate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use realm_gateway_sdk::{DelegateDirectory, RealmDelegateClient};
use tokio::sync::Mutex;

use super::error::LocatorError;

/// A resolved delegate together with the generation it was resolved in.
///
/// Generations increase with every directory lookup, so a handle observed
/// stale can be told apart from one resolved after it.
#[derive(Clone)]
pub struct DelegateHandle {
    generation: u64,
    client: Arc<dyn RealmDelegateClient>,
}

impl DelegateHandle {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn RealmDelegateClient> {
        &self.client
    }
}

impl std::fmt::Debug for DelegateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegateHandle")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Single-slot cache in front of a [`DelegateDirectory`].
///
/// Uses a single-flight pattern: concurrent callers on an empty slot cause
/// exactly one directory lookup. Invalidation takes the same lock, so a
/// caller re-resolving after staleness never races another one doing the same.
pub struct DelegateLocator {
    directory: Arc<dyn DelegateDirectory>,
    address: String,
    /// Cached handle (sync lock for fast access).
    cached: RwLock<Option<DelegateHandle>>,
    /// Serializes resolution and invalidation.
    resolve_lock: Mutex<()>,
    resolutions: AtomicU64,
}

impl DelegateLocator {
    #[must_use]
    pub fn new(directory: Arc<dyn DelegateDirectory>, address: impl Into<String>) -> Self {
        Self {
            directory,
            address: address.into(),
            cached: RwLock::new(None),
            resolve_lock: Mutex::new(()),
            resolutions: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Number of directory lookups performed so far.
    #[must_use]
    pub fn resolutions(&self) -> u64 {
        self.resolutions.load(Ordering::Acquire)
    }

    fn cached(&self) -> Option<DelegateHandle> {
        self.cached.read().clone()
    }

    /// Returns the cached handle, or looks the delegate up in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError`] if the directory lookup fails. The directory
    /// error is logged here and not carried further.
    pub async fn resolve(&self) -> Result<DelegateHandle, LocatorError> {
        // Fast path: no await while the read lock is held
        if let Some(handle) = self.cached() {
            return Ok(handle);
        }

        let _resolve_guard = self.resolve_lock.lock().await;

        // Another caller may have resolved while we waited
        if let Some(handle) = self.cached() {
            return Ok(handle);
        }

        let generation = self.resolutions.fetch_add(1, Ordering::AcqRel) + 1;
        let client = self
            .directory
            .lookup(&self.address)
            .await
            .map_err(|e| {
                tracing::error!(
                    address = %self.address,
                    error = %e,
                    "Realm delegate lookup failed"
                );
                LocatorError
            })?;

        let handle = DelegateHandle { generation, client };
        *self.cached.write() = Some(handle.clone());
        tracing::info!(address = %self.address, generation, "Resolved realm delegate");

        Ok(handle)
    }

    /// Discards the cached handle if it is still the one observed stale.
    ///
    /// Returns `true` if the slot was cleared. A handle from an older
    /// generation leaves a newer cached handle in place.
    pub async fn invalidate(&self, stale: &DelegateHandle) -> bool {
        let _resolve_guard = self.resolve_lock.lock().await;
        let mut cached = self.cached.write();
        let is_current = cached
            .as_ref()
            .is_some_and(|current| current.generation == stale.generation);
        if is_current {
            *cached = None;
            tracing::debug!(generation = stale.generation, "Invalidated realm delegate handle");
        }
        is_current
    }
}
