//! Error types for the realm gateway module.

use thiserror::Error;

/// Errors returned to hosts by [`RealmGatewayClient`](crate::RealmGatewayClient).
///
/// This is the only error type that crosses the trust boundary. It carries
/// no delegate detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The login failed. Deliberately opaque.
    #[error("login failed")]
    Failed,

    /// The login context is not wired to the expected realm.
    #[error("login context misconfigured: {0}")]
    Misconfigured(String),
}

/// Errors reported by a [`RealmDelegateClient`](crate::RealmDelegateClient).
#[derive(Debug, Error)]
pub enum RealmDelegateError {
    /// The credential was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The user is not known to the delegate.
    #[error("no such user: {0}")]
    NoSuchUser(String),

    /// The operation could not be performed.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The delegate instance is no longer serving (retired, redeployed).
    #[error("delegate unavailable: {0}")]
    Unavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from a [`DelegateDirectory`](crate::DelegateDirectory) lookup.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Nothing is bound under the address.
    #[error("no delegate bound at '{address}'")]
    NotBound { address: String },

    /// The address is malformed.
    #[error("invalid directory address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
}
