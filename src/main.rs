//! fahctl entry point.
//!
//! Parses arguments, loads configuration and sends one state command.

use std::process::ExitCode;

use fahctl::cli::Cli;
use fahctl::config::CtlConfig;
use fahctl::error::CtlError;
use fahctl::{service, telemetry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(CtlError::Usage(err)) => err.exit(),
        Err(err) => return report(&err),
    };

    let config = match CtlConfig::from_env() {
        Ok(config) => config.with_overrides(&cli),
        Err(err) => return report(&err),
    };

    telemetry::init(config.log_format, cli.verbose);
    tracing::debug!(?config, "configuration loaded");

    match service::run(&config, cli.command()).await {
        Ok(dispatched) => {
            tracing::debug!(wire = %dispatched.wire, "done");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn report(err: &CtlError) -> ExitCode {
    eprintln!("fahctl: error: {err}");
    ExitCode::from(err.exit_code())
}
