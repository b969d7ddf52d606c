#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Realm Server
//!
//! HTTP host for the realm gateway. Serves:
//!
//! - `POST /v1/login` - username/password login, returns principals and groups
//! - `GET /v1/realm` - realm context and display names
//! - `GET /health` - liveness check
//!
//! The built-in static delegate can be redeployed at runtime (`SIGHUP`
//! reloads the `static_delegate` section of the configuration file).

pub mod api;
pub mod config;
pub mod logging;
pub mod server;

pub use config::AppConfig;
pub use server::RealmServer;
