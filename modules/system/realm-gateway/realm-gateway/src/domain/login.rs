//! Login module: the single entry point hosts call to log a user in.

use std::fmt;
use std::sync::Arc;

use realm_gateway_sdk::{Credential, Subject};
use tracing::debug;

use super::error::LoginFailure;
use super::service::Realm;

/// Phases a login goes through. A failure in any phase ends the login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPhase {
    Start,
    Verified,
    GroupsResolved,
    Committed,
}

impl fmt::Display for LoginPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Verified => "verified",
            Self::GroupsResolved => "groups_resolved",
            Self::Committed => "committed",
        })
    }
}

/// Login module bound to one login context and one realm.
///
/// `Start → Verified → GroupsResolved → Committed`:
/// 1. the realm must serve the login context this module is bound to
/// 2. the credential is verified by the delegate
/// 3. the user's groups are resolved; a failure here fails the whole login
/// 4. identity and groups are committed into a fresh [`Subject`]
pub struct LoginModule {
    login_context: String,
    realm: Arc<Realm>,
}

impl LoginModule {
    #[must_use]
    pub fn new(login_context: impl Into<String>, realm: Arc<Realm>) -> Self {
        Self {
            login_context: login_context.into(),
            realm,
        }
    }

    #[must_use]
    pub fn realm(&self) -> &Arc<Realm> {
        &self.realm
    }

    /// Log a user in.
    ///
    /// # Errors
    ///
    /// - `Wiring` if the realm does not serve this module's login context
    /// - `EmptyUsername` if the username is empty (the delegate is not called)
    /// - `Verification` if the credential is not accepted
    /// - `GroupLookup` if groups cannot be resolved after successful verification
    #[tracing::instrument(skip_all, fields(login_context = %self.login_context, phase))]
    pub async fn login(&self, credential: &Credential) -> Result<Subject, LoginFailure> {
        self.check_wiring()?;
        if credential.username().is_empty() {
            return Err(LoginFailure::EmptyUsername);
        }

        let identity = self
            .realm
            .authenticate(credential.username(), credential.password())
            .await?;
        record_phase(LoginPhase::Verified);

        let groups = self.realm.group_names(credential.username()).await?;
        record_phase(LoginPhase::GroupsResolved);

        let subject = Subject::commit(identity, groups);
        record_phase(LoginPhase::Committed);
        debug!(
            principals = subject.principals().len(),
            groups = subject.groups().len(),
            "Login committed"
        );

        Ok(subject)
    }

    fn check_wiring(&self) -> Result<(), LoginFailure> {
        record_phase(LoginPhase::Start);
        if self.realm.context_name() == self.login_context {
            Ok(())
        } else {
            Err(LoginFailure::Wiring {
                expected: self.login_context.clone(),
                actual: self.realm.context_name().to_owned(),
            })
        }
    }
}

fn record_phase(phase: LoginPhase) {
    tracing::Span::current().record("phase", tracing::field::display(phase));
}
