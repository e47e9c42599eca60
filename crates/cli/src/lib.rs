//! # lbctl CLI
//!
//! Command-line front end for the load-balancer client.
//!
//! - [`cli`]: process arguments and the per-line shell grammar
//! - [`shell`]: session state, the interactive loop and command dispatch
//! - [`output`]: table and JSON rendering
//! - [`error`]: user-facing errors and exit codes

pub mod cli;
pub mod error;
pub mod output;
pub mod shell;

pub use error::CliError;
pub use shell::{Flow, Shell};
