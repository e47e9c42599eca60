//! # lbctl Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client
//! - The authenticated transport with one-shot re-authentication
//! - Login and session restoration
//! - The load-balancer service client and its wire format
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `lbctl-core`
//! - Contains all "impure" code (network, files, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{AuthService, HttpSessionConnector, LbaasClient, Transport};
pub use http::{HttpClient, HttpClientBuilder};
