//! Command-line argument parsing with clap
//!
//! [`Cli`] parses the process arguments. [`ShellLine`] parses one line typed
//! into the interactive shell, or the trailing words of a one-shot
//! invocation.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use lbctl_domain::Config;

/// Command-line client for the cloud load-balancer API
///
/// Without a command an interactive shell starts. With one, that single
/// command runs and the process exits.
#[derive(Parser, Debug, Clone)]
#[command(name = "lbctl", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML or JSON). Standard locations are probed
    /// when omitted.
    #[arg(long, env = "LBCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Dump HTTP requests and responses. Bearer tokens appear unredacted.
    #[arg(long)]
    pub debug_http: bool,

    /// Reuse connections instead of sending `Connection: close`
    #[arg(long)]
    pub keep_alive: bool,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub danger_accept_invalid_certs: bool,

    /// Command to run once, e.g. `LB list`
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON for scripting
    Json,
}

impl Cli {
    /// Apply flag overrides on top of loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if self.debug_http {
            config.http.debug_requests = true;
            config.http.debug_responses = true;
        }
        if self.keep_alive {
            config.http.close_connections = false;
        }
        if self.danger_accept_invalid_certs {
            config.http.danger_accept_invalid_certs = true;
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is not set
    pub fn log_directives(&self) -> String {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if self.debug_http {
            format!("{level},lbctl::http=debug")
        } else {
            level.to_string()
        }
    }
}

/// One shell command
#[derive(Parser, Debug)]
#[command(name = "lbctl", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Session management
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Datacenters
    #[command(name = "DC", alias = "dc")]
    Dc {
        #[command(subcommand)]
        command: DcCommand,
    },

    /// Load balancers
    #[command(name = "LB", alias = "lb")]
    Lb {
        #[command(subcommand)]
        command: LbCommand,
    },

    /// Pools of a load balancer
    Pool {
        #[command(subcommand)]
        command: PoolCommand,
    },

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// `auth` subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// Log in, replacing any current session
    Login { username: String, password: String },

    /// Restore a session from CLC_API_* environment variables
    Env,

    /// End the current session
    Logout,

    /// Show the current session
    Status,

    /// Print shell exports that let `auth env` restore this session
    Export,
}

/// `DC` subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DcCommand {
    /// List datacenters visible to the account
    List,
}

/// `LB` subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LbCommand {
    /// Request a new load balancer
    Create {
        #[arg(value_name = "DC")]
        datacenter: String,
        name: String,
        /// Remaining words form the description
        description: Vec<String>,
    },

    /// Delete a load balancer
    Delete {
        #[arg(value_name = "DC")]
        datacenter: String,
        #[arg(value_name = "LBID")]
        lb_id: String,
    },

    /// Show a load balancer and its pools
    Details {
        #[arg(value_name = "DC")]
        datacenter: String,
        #[arg(value_name = "LBID")]
        lb_id: String,
    },

    /// List load balancers in every datacenter
    List,
}

/// `pool` subcommands
///
/// Pool fields are `key=value` words: port, method, health, persistence,
/// timeout, mode, nodes, target.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PoolCommand {
    /// Create a pool
    Create {
        #[arg(value_name = "DC")]
        datacenter: String,
        #[arg(value_name = "LBID")]
        lb_id: String,
        #[arg(value_name = "FIELD")]
        fields: Vec<String>,
    },

    /// Replace a pool's settings
    Update {
        #[arg(value_name = "DC")]
        datacenter: String,
        #[arg(value_name = "LBID")]
        lb_id: String,
        #[arg(value_name = "POOLID")]
        pool_id: String,
        #[arg(value_name = "FIELD")]
        fields: Vec<String>,
    },

    /// Delete a pool
    Delete {
        #[arg(value_name = "DC")]
        datacenter: String,
        #[arg(value_name = "LBID")]
        lb_id: String,
        #[arg(value_name = "POOLID")]
        pool_id: String,
    },
}
