//! # lbctl Domain
//!
//! Business domain types and models for the load-balancer client.
//!
//! This crate contains:
//! - Domain records (datacenters, load balancers, pools, health checks)
//! - Session credentials
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other lbctl crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
