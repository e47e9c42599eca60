//! Client for the load-balancer management API
//!
//! - [`transport`]: signed JSON calls with one-shot re-authentication on 401
//! - [`auth`]: login and session restoration
//! - [`client`]: the [`lbctl_core::LoadBalancerApi`] implementation
//! - [`connector`]: the [`lbctl_core::SessionConnector`] implementation
//! - [`wire`] and [`mapping`]: provider JSON shapes and their domain mapping

pub mod auth;
pub mod client;
pub mod connector;
pub mod mapping;
pub mod transport;
pub mod wire;

pub use auth::AuthService;
pub use client::LbaasClient;
pub use connector::HttpSessionConnector;
pub use transport::{CallAuth, Host, Transport};
