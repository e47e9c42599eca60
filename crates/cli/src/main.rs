//! `lbctl` binary entrypoint

use std::io;
use std::process::ExitCode;

use clap::Parser;
use lbctl_cli::cli::Cli;
use lbctl_cli::output::OutputFormat;
use lbctl_cli::{CliError, Shell};
use lbctl_domain::Config;
use lbctl_infra::HttpSessionConnector;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code());
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directives()));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = lbctl_infra::config::load(cli.config.clone()).map_err(CliError::Config)?;
    cli.apply_to(&mut config);
    Ok(config)
}

async fn run(cli: &Cli, config: Config) -> Result<(), CliError> {
    let connector = HttpSessionConnector::new(config);
    let mut shell = Shell::new(Box::new(connector), OutputFormat::new(cli.format));
    let mut stdout = io::stdout().lock();

    if cli.command.is_empty() {
        shell.run_interactive(io::stdin().lock(), &mut stdout).await
    } else {
        shell.run_once(cli.command.as_slice(), &mut stdout).await
    }
}
