use crate::{
    config::{
        app_config::{load_config, AppConfig, AppConfigBuilder},
        log_config::LoggingConfig,
    },
    error::CliError,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use subflow::{
    algorithms::trends::TrendPeriod,
    pipeline::{Pipeline, RunSummary},
};
use tracing::info;
use tracing_subscriber::{
    fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

#[derive(Parser, Debug)]
#[command(
    name = "subflow",
    about = "Extract community migrations and centrality metrics from a post log"
)]
struct Args {
    /// Config file layered under the command line options
    #[arg(long, env = "SUBFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Input file or directory
    #[arg(long, env = "SUBFLOW_INPUT")]
    input: Option<PathBuf>,

    #[arg(long, env = "SUBFLOW_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[arg(long, env = "SUBFLOW_LOG_LEVEL")]
    log_level: Option<String>,

    #[arg(long, env = "SUBFLOW_DELIMITER")]
    delimiter: Option<String>,

    /// Regex on file paths, used when the input is a directory
    #[arg(long, env = "SUBFLOW_FILE_PATTERN")]
    file_pattern: Option<String>,

    /// Treat the first row as data and name columns by position
    #[arg(long, env = "SUBFLOW_NO_HEADER")]
    no_header: bool,

    /// year or month
    #[arg(long, env = "SUBFLOW_TREND_PERIOD")]
    trend_period: Option<TrendPeriod>,

    #[arg(long, env = "SUBFLOW_EIGENVECTOR_MAX_ITER")]
    eigenvector_max_iter: Option<usize>,

    #[arg(long, env = "SUBFLOW_EIGENVECTOR_TOL")]
    eigenvector_tol: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    #[command(about = "Run every analysis stage and write the results (default)")]
    Run,
    #[command(about = "Print the effective configuration as JSON")]
    Config,
}

impl Args {
    /// Config file (or defaults) with every option given on the command line applied on top.
    fn app_config(&self) -> Result<AppConfig, CliError> {
        let mut builder = AppConfigBuilder::from(load_config(None, self.config.clone())?);
        if let Some(input) = &self.input {
            builder = builder.with_input_path(input.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            builder = builder.with_output_dir(output_dir.clone());
        }
        if let Some(log_level) = &self.log_level {
            builder = builder.with_log_level(log_level.clone());
        }
        if let Some(delimiter) = &self.delimiter {
            builder = builder.with_delimiter(delimiter.clone());
        }
        if self.file_pattern.is_some() {
            builder = builder.with_file_pattern(self.file_pattern.clone());
        }
        if self.no_header {
            builder = builder.with_has_header(false);
        }
        if let Some(trend_period) = self.trend_period {
            builder = builder.with_trend_period(trend_period);
        }
        if let Some(max_iter) = self.eigenvector_max_iter {
            builder = builder.with_eigenvector_max_iter(max_iter);
        }
        if let Some(tol) = self.eigenvector_tol {
            builder = builder.with_eigenvector_tol(tol);
        }
        Ok(builder.build())
    }
}

pub(crate) fn init_logging(config: &LoggingConfig) {
    let filter = config.get_log_env();
    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::NONE),
        )
        .try_init()
        .ok();
}

fn run(config: &AppConfig) -> Result<RunSummary, CliError> {
    let loader = config.input.loader()?;
    let summary = Pipeline::new(config.pipeline_config()).run_with_loader(&loader)?;
    info!(
        rows = summary.rows,
        users = summary.users,
        migrations = summary.migrations,
        flows = summary.flows,
        communities = summary.communities,
        projected_edges = summary.projected_edges,
        output_dir = %config.output.dir.display(),
        "all files saved"
    );
    Ok(summary)
}

pub(crate) fn cli() -> Result<(), CliError> {
    let args = Args::parse();
    let app_config = args.app_config()?;

    match args.command {
        Some(Commands::Config) => {
            println!("{}", serde_json::to_string_pretty(&app_config)?);
        }
        Some(Commands::Run) | None => {
            init_logging(&app_config.logging);
            run(&app_config)?;
        }
    }
    Ok(())
}
