#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Realm Gateway SDK
//!
//! This crate provides the public API for the `realm_gateway` module:
//!
//! - [`RealmGatewayClient`] - Public API trait for hosts (login entry point)
//! - [`RealmDelegateClient`] - Plugin API trait for delegate implementations
//! - [`DelegateDirectory`] / [`ClientDirectory`] - Directory used to locate delegates
//! - [`RealmProperties`] - Realm configuration shared with delegates
//! - [`Credential`], [`Identity`], [`GroupSet`], [`Subject`] - Models
//! - [`LoginError`], [`RealmDelegateError`], [`DirectoryError`] - Error types
//!
//! ## Usage
//!
//! Hosts hold the gateway behind the API trait:
//!
//! ```ignore
//! use realm_gateway_sdk::{Credential, RealmGatewayClient};
//!
//! let subject = gateway.login(&Credential::new("alice", "correct")).await?;
//! for group in subject.groups() {
//!     // ...
//! }
//! ```

pub mod api;
pub mod directory;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod properties;

// Re-export main types at crate root
pub use api::RealmGatewayClient;
pub use directory::{ClientDirectory, DelegateDirectory};
pub use error::{DirectoryError, LoginError, RealmDelegateError};
pub use models::{Credential, GroupSet, Identity, RealmInfo, Subject};
pub use plugin_api::RealmDelegateClient;
pub use properties::RealmProperties;
