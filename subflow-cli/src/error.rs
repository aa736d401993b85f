use config::ConfigError;
use std::error::Error;
use subflow::errors::GraphError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Failed to load configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to print configuration")]
    Json(#[from] serde_json::Error),
}

/// The error message followed by every underlying cause, joined with `: `.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
