//! Domain layer for the realm gateway.

pub mod error;
pub mod local_client;
pub mod locator;
pub mod login;
pub mod service;

pub use error::{AuthError, DomainError, GroupLookupError, LocatorError, LoginFailure};
pub use local_client::RealmGatewayLocalClient;
pub use locator::{DelegateHandle, DelegateLocator};
pub use login::LoginModule;
pub use service::Realm;
