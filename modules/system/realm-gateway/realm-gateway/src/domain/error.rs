//! Domain errors for the realm gateway.
//!
//! Everything except [`DomainError`] and [`LoginFailure`] is payload-free:
//! those two keep the internal cause for logging and never leave the crate
//! unconverted.

use realm_gateway_sdk::{LoginError, RealmDelegateError};

/// The delegate could not be located. Directory detail is logged, not kept.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("realm delegate lookup failed")]
pub struct LocatorError;

/// Credential verification failed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("authentication failed")]
pub struct AuthError;

/// Group lookup failed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLookupError {
    #[error("no such user")]
    NoSuchUser,

    #[error("invalid operation")]
    InvalidOperation,
}

/// Internal outcome of a delegate call, before normalization.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Delegate(#[from] RealmDelegateError),
}

/// Why a login failed. Converted to the opaque [`LoginError`] at the boundary.
#[derive(thiserror::Error, Debug)]
pub enum LoginFailure {
    #[error("login context '{expected}' is bound to realm context '{actual}'")]
    Wiring { expected: String, actual: String },

    #[error("empty username")]
    EmptyUsername,

    #[error("credential verification failed: {0}")]
    Verification(#[from] AuthError),

    #[error("group lookup failed after successful authentication: {0}")]
    GroupLookup(#[from] GroupLookupError),
}

impl From<LoginFailure> for LoginError {
    fn from(e: LoginFailure) -> Self {
        match e {
            LoginFailure::Wiring { expected, .. } => {
                Self::Misconfigured(format!("login context '{expected}' is not served by this realm"))
            }
            LoginFailure::EmptyUsername
            | LoginFailure::Verification(_)
            | LoginFailure::GroupLookup(_) => Self::Failed,
        }
    }
}
