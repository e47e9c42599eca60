//! Output formatting for shell commands
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;

use lbctl_domain::{
    Datacenter, HealthCheck, LoadBalancer, LoadBalancerCreationInfo, LoadBalancerSummary, Pool,
};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Writes values as text or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a value in the selected format
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay + ?Sized,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => value.write_table(writer)?,
        }
        Ok(())
    }
}

/// Human-readable rendering
pub trait TableDisplay {
    /// # Errors
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// A one-line result such as `pool deleted`
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}

/// Current session as shown by `auth status` and after login
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub username: String,
    pub account_alias: String,
    pub location_alias: String,
}

impl TableDisplay for SessionStatus {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.logged_in {
            writeln!(
                writer,
                "logged in: user={}, accountAlias={}, location={}",
                self.username, self.account_alias, self.location_alias
            )?;
        } else {
            writeln!(writer, "no user is logged in")?;
        }
        Ok(())
    }
}

/// Session values in the form `auth env` reads back
#[derive(Debug, Clone, Serialize)]
pub struct ExportedSession {
    pub username: String,
    pub account_alias: String,
    pub location_alias: String,
    pub bearer_token: String,
}

impl TableDisplay for ExportedSession {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        use lbctl_domain::constants::{ENV_ACCOUNT, ENV_LOCATION, ENV_TOKEN, ENV_USERNAME};

        writeln!(writer, "export {ENV_USERNAME}={}", self.username)?;
        writeln!(writer, "export {ENV_ACCOUNT}={}", self.account_alias)?;
        writeln!(writer, "export {ENV_LOCATION}={}", self.location_alias)?;
        writeln!(writer, "export {ENV_TOKEN}={}", self.bearer_token)?;
        Ok(())
    }
}

impl TableDisplay for Vec<Datacenter> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "(no datacenters)")?;
        }
        for dc in self {
            writeln!(writer, "DC: id={}, name=\"{}\"", dc.id, dc.name)?;
        }
        Ok(())
    }
}

impl TableDisplay for Vec<LoadBalancerSummary> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.is_empty() {
            writeln!(writer, "(no load balancers)")?;
        }
        for lb in self {
            writeln!(
                writer,
                "LB: dc={}, lbid={}, name=\"{}\", desc=\"{}\",\n    ip={}",
                lb.datacenter, lb.id, lb.name, lb.description, lb.public_ip
            )?;
        }
        Ok(())
    }
}

impl TableDisplay for LoadBalancer {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "LB details: dc={}, lbid={}, status={}, IP={}",
            self.datacenter, self.id, self.status, self.public_ip
        )?;
        writeln!(writer, "  name={}, description={}", self.name, self.description)?;

        if self.pools.is_empty() {
            writeln!(writer, "  (no pools defined)")?;
        }
        for pool in &self.pools {
            write_pool(writer, pool, "  ")?;
        }
        Ok(())
    }
}

impl TableDisplay for Pool {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        write_pool(writer, self, "")
    }
}

impl TableDisplay for LoadBalancerCreationInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        match self.requested_at() {
            Some(at) => writeln!(
                writer,
                "load balancer requested: lbid={}, at={}",
                self.id,
                at.to_rfc3339()
            )?,
            None => writeln!(writer, "load balancer requested: lbid={}", self.id)?,
        }
        Ok(())
    }
}

fn write_pool<W: Write>(writer: &mut W, pool: &Pool, inset: &str) -> Result<(), CliError> {
    writeln!(writer, "{inset}pool: lbid={}, id={}", pool.lb_id, pool.id)?;
    writeln!(
        writer,
        "{inset}  port={}, method={}, persistence={}, timeout={}, mode={}",
        pool.incoming_port, pool.method, pool.persistence, pool.idle_timeout_ms, pool.mode
    )?;
    writeln!(writer, "{inset}  health: {}", describe_health(pool.health_check.as_ref()))?;

    let nodes: Vec<String> =
        pool.nodes.iter().map(|node| format!("{}:{}", node.target_ip, node.target_port)).collect();
    writeln!(writer, "{inset}  nodes: [{}]", nodes.join(" "))?;
    Ok(())
}

fn describe_health(health: Option<&HealthCheck>) -> String {
    match health {
        None => "unset".to_string(),
        Some(h) => format!(
            "unhealthy={}, healthy={}, interval={}s, port={}, mode={}",
            h.unhealthy_threshold, h.healthy_threshold, h.interval_seconds, h.target_port, h.mode
        ),
    }
}
