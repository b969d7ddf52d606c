//! Realm Gateway Module
//!
//! This module locates the realm delegate through a directory lookup and
//! routes login calls to it: credential verification first, group lookup
//! second, commit last.
//!
//! Provides the `RealmGatewayClient` trait implementation consumed by hosts
//! (primarily the realm server).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::RealmGatewayModule;
