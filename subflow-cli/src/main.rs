use crate::{config::log_config::LoggingConfig, error::error_chain};
use std::process::ExitCode;
use tracing::error;

mod cli;
mod config;
mod error;

fn main() -> ExitCode {
    match cli::cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // no-op when the run already installed its subscriber
            cli::init_logging(&LoggingConfig::default());
            error!(error = %error_chain(&err), "subflow failed");
            ExitCode::FAILURE
        }
    }
}
