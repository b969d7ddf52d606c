//! Static realm delegate plugin module.

use std::sync::Arc;

use parking_lot::Mutex;
use realm_gateway_sdk::{ClientDirectory, RealmDelegateClient};
use tracing::info;

use crate::config::StaticRealmPluginConfig;
use crate::domain::Service;

/// Static realm delegate plugin module.
///
/// **Deployment pattern:**
/// - `deploy` binds a fresh service instance under the configured address
/// - Deploying again is a redeployment: the new instance replaces the old
///   binding and the old instance is retired
/// - `undeploy` removes the binding and retires the current instance
///
/// A gateway still holding a retired instance gets `Unavailable` and
/// re-resolves through the directory.
#[derive(Default)]
pub struct StaticRealmPlugin {
    current: Mutex<Option<Deployment>>,
}

struct Deployment {
    address: String,
    service: Arc<Service>,
}

impl StaticRealmPlugin {
    /// Deploy (or redeploy) the plugin into `directory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is rejected by the directory.
    #[tracing::instrument(skip_all, fields(address = %cfg.address))]
    pub fn deploy(
        &self,
        cfg: &StaticRealmPluginConfig,
        directory: &ClientDirectory,
    ) -> anyhow::Result<Arc<Service>> {
        info!(user_count = cfg.users.len(), "Deploying static_realm_plugin");

        let service = Arc::new(Service::from_config(cfg));
        let api: Arc<dyn RealmDelegateClient> = service.clone();

        // Bind, record and retire under one lock so the bound instance is always the current one
        let mut current = self.current.lock();
        directory.bind(&cfg.address, api)?;
        let previous = current.replace(Deployment {
            address: cfg.address.clone(),
            service: service.clone(),
        });
        if let Some(previous) = previous {
            if previous.address != cfg.address {
                directory.unbind(&previous.address);
            }
            previous.service.retire();
            info!(previous_address = %previous.address, "Retired previous static_realm_plugin instance");
        }
        drop(current);

        info!("Static realm plugin deployed");
        Ok(service)
    }

    /// Remove the plugin from `directory`. Returns `false` if it was not deployed.
    pub fn undeploy(&self, directory: &ClientDirectory) -> bool {
        let mut slot = self.current.lock();
        let Some(current) = slot.take() else {
            return false;
        };
        directory.unbind(&current.address);
        current.service.retire();
        drop(slot);
        info!(address = %current.address, "Static realm plugin undeployed");
        true
    }

    /// The currently deployed instance, if any.
    #[must_use]
    pub fn service(&self) -> Option<Arc<Service>> {
        self.current.lock().as_ref().map(|d| d.service.clone())
    }
}
