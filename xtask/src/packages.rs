use std::process::Command;

use anyhow::{Context, Result};

/// Workspace packages in dependency order
const PACKAGES: &[&str] = &["lbctl-domain", "lbctl-core", "lbctl-infra", "lbctl-cli"];

/// Check that every package compiles on its own, without features unified
/// from the rest of the workspace.
pub fn check_each_package() -> Result<()> {
    println!("Checking {} packages in isolation...", PACKAGES.len());

    for (index, package) in PACKAGES.iter().enumerate() {
        println!("\n[{}/{}] cargo check -p {package} --all-targets", index + 1, PACKAGES.len());

        let status = Command::new("cargo")
            .args(["check", "-p", package, "--all-targets"])
            .status()
            .with_context(|| format!("Failed to run cargo check for '{package}'"))?;

        if !status.success() {
            anyhow::bail!("Package '{package}' failed to compile on its own");
        }

        println!("✅ {package} compiles");
    }

    println!("\n✅ All {} packages compile in isolation", PACKAGES.len());

    Ok(())
}
