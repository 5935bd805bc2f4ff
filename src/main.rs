//! Gong CLI entrypoint: reminds pending pull request reviewers.

mod cli;

use std::env;
use std::io;
use std::process::ExitCode;

use gong::{GongConfig, PingError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if cli::output::write_error(&mut io::stderr().lock(), &error).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PingError> {
    let args = cli::args::strip_subcommand(env::args_os())?;
    let config = GongConfig::load_from_args(args)?;
    cli::logging::init(config.verbose);

    let outcome = cli::ping::run(&config).await?;
    cli::output::log_outcome(&outcome);
    Ok(())
}
