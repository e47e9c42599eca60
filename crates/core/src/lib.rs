//! # lbctl Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) implemented by the HTTP client
//! - Parsing of pool fields given on the command line
//!
//! ## Architecture Principles
//! - Only depends on `lbctl-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod pool_fields;
pub mod ports;

pub use pool_fields::PoolFields;
pub use ports::{LoadBalancerApi, SessionConnector, SessionMaterial};
