#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Realm Delegate Plugin
//!
//! This plugin answers credential checks and group lookups from a static
//! user list for development and testing.
//!
//! ## Realm properties
//!
//! - **`case-insensitive-usernames`**: when `"true"`, usernames are matched
//!   ignoring ASCII case.
//!
//! ## Configuration
//!
//! ```yaml
//! static_delegate:
//!   address: "local://realm-ref/delegate"
//!   users:
//!     - username: "alice"
//!       password: "correct"
//!       groups: ["admin", "users"]
//!       attributes:
//!         tenant: "acme"
//!     - username: "kiosk"
//!       password: ""
//!       identity: false
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticRealmPlugin;
