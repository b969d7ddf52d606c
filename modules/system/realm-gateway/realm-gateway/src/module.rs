//! Realm gateway module.

use std::sync::{Arc, OnceLock};

use realm_gateway_sdk::{DelegateDirectory, RealmGatewayClient};
use tracing::info;

use crate::config::RealmGatewayConfig;
use crate::domain::{LoginModule, Realm, RealmGatewayLocalClient};

/// Realm gateway module.
///
/// This module:
/// 1. Builds the realm from its properties
/// 2. Binds a login module to the configured login context
/// 3. Hands out the `RealmGatewayClient` used by hosts
///
/// Delegate lookup is lazy: happens on the first login, so delegates may be
/// deployed after the gateway.
#[derive(Default)]
pub struct RealmGatewayModule {
    realm: OnceLock<Arc<Realm>>,
}

impl RealmGatewayModule {
    /// Initialize the module and return the client hosts should use.
    ///
    /// # Errors
    ///
    /// Returns an error if the module was already initialized.
    #[tracing::instrument(skip_all, fields(login_context = %cfg.login_context))]
    pub fn init(
        &self,
        cfg: RealmGatewayConfig,
        directory: Arc<dyn DelegateDirectory>,
    ) -> anyhow::Result<Arc<dyn RealmGatewayClient>> {
        let realm = Arc::new(Realm::new(cfg.properties, directory));
        info!(
            context_name = %realm.context_name(),
            display_name = %realm.display_name(),
            backend_address = %realm.locator().address(),
            "Initializing realm_gateway"
        );
        if realm.context_name() != cfg.login_context {
            tracing::warn!(
                context_name = %realm.context_name(),
                "Login context does not match the realm context name; every login will fail"
            );
        }

        self.realm
            .set(realm.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        let login_module = Arc::new(LoginModule::new(cfg.login_context, realm));
        let api: Arc<dyn RealmGatewayClient> =
            Arc::new(RealmGatewayLocalClient::new(login_module));

        info!("realm_gateway initialized");
        Ok(api)
    }

    /// The realm built by `init()`, if any.
    #[must_use]
    pub fn realm(&self) -> Option<&Arc<Realm>> {
        self.realm.get()
    }
}
