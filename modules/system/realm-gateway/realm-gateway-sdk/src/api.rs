//! Public API trait for the realm gateway.
//!
//! This trait defines the interface that hosts use to log users in.
//! The gateway implements this trait and delegates credential checks
//! and group lookup to the delegate bound in the directory.

use async_trait::async_trait;

use crate::error::LoginError;
use crate::models::{Credential, RealmInfo, Subject};

/// Public API trait for the realm gateway.
///
/// Hosts (the HTTP server, tests) hold it as `Arc<dyn RealmGatewayClient>`:
///
/// ```ignore
/// let subject = gateway.login(&Credential::new("alice", "correct")).await?;
/// let identity = subject.principals().first();
/// ```
///
/// # Security
///
/// Failures are deliberately coarse: [`LoginError::Failed`] never tells the
/// caller whether the user exists, the password was wrong, the delegate was
/// down or the group lookup failed.
#[async_trait]
pub trait RealmGatewayClient: Send + Sync {
    /// Verify the credential, resolve the user's groups and return the committed subject.
    ///
    /// # Errors
    ///
    /// - `Failed` for any credential, delegate or group lookup failure
    /// - `Misconfigured` if the login context is not wired to this realm
    async fn login(&self, credential: &Credential) -> Result<Subject, LoginError>;

    /// Context and display names of the realm serving this gateway.
    fn realm_info(&self) -> RealmInfo;
}
