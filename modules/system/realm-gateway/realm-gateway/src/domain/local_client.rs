//! Local (in-process) client for the realm gateway.

use std::sync::Arc;

use async_trait::async_trait;
use realm_gateway_sdk::{Credential, LoginError, RealmGatewayClient, RealmInfo, Subject};

use super::error::LoginFailure;
use super::login::LoginModule;

/// Local client wrapping the login module.
///
/// Handed to hosts by the module during `init()`.
pub struct RealmGatewayLocalClient {
    login_module: Arc<LoginModule>,
}

impl RealmGatewayLocalClient {
    #[must_use]
    pub fn new(login_module: Arc<LoginModule>) -> Self {
        Self { login_module }
    }
}

fn log_and_convert(op: &str, e: LoginFailure) -> LoginError {
    match &e {
        LoginFailure::Wiring { .. } => {
            tracing::error!(operation = op, error = %e, "realm_gateway misconfigured");
        }
        LoginFailure::EmptyUsername
        | LoginFailure::Verification(_)
        | LoginFailure::GroupLookup(_) => {
            tracing::debug!(operation = op, error = %e, "realm_gateway login rejected");
        }
    }
    e.into()
}

#[async_trait]
impl RealmGatewayClient for RealmGatewayLocalClient {
    async fn login(&self, credential: &Credential) -> Result<Subject, LoginError> {
        self.login_module
            .login(credential)
            .await
            .map_err(|e| log_and_convert("login", e))
    }

    fn realm_info(&self) -> RealmInfo {
        self.login_module.realm().info()
    }
}
