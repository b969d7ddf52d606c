//! Wiring of directory, delegate plugin, gateway and HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use realm_gateway::RealmGatewayModule;
use realm_gateway_sdk::{ClientDirectory, RealmGatewayClient};
use static_realm_plugin::StaticRealmPlugin;
use static_realm_plugin::config::StaticRealmPluginConfig;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// A fully wired realm server.
///
/// The static delegate is deployed before the gateway is initialized, but
/// the gateway only looks it up on the first login.
pub struct RealmServer {
    config: AppConfig,
    directory: Arc<ClientDirectory>,
    plugin: StaticRealmPlugin,
    gateway: Arc<dyn RealmGatewayClient>,
}

impl RealmServer {
    /// Deploy the static delegate and initialize the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the delegate address is invalid.
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let directory = Arc::new(ClientDirectory::new());

        let plugin = StaticRealmPlugin::default();
        plugin.deploy(&config.static_delegate, &directory)?;

        let gateway = RealmGatewayModule::default().init(config.realm.clone(), directory.clone())?;

        Ok(Self {
            config,
            directory,
            plugin,
            gateway,
        })
    }

    #[must_use]
    pub fn router(&self) -> Router {
        crate::api::router(self.gateway.clone(), &self.config.server)
    }

    /// Replace the deployed static delegate with one built from `cfg`.
    ///
    /// In-flight and later logins re-resolve the delegate on their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the new address is invalid; the old delegate stays deployed.
    pub fn redeploy_delegate(&self, cfg: &StaticRealmPluginConfig) -> anyhow::Result<()> {
        self.plugin.deploy(cfg, &self.directory)?;
        Ok(())
    }

    /// Bind and serve until `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is invalid or cannot be bound.
    pub async fn serve(&self, cancel: CancellationToken) -> anyhow::Result<()> {
        let addr: SocketAddr = self
            .config
            .server
            .bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind_addr '{}': {e}", self.config.server.bind_addr))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
