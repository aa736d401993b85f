use crate::config::{
    analysis_config::AnalysisConfig, input_config::InputConfig, log_config::LoggingConfig,
    output_config::OutputConfig,
};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use subflow::{algorithms::trends::TrendPeriod, pipeline::PipelineConfig};

#[derive(Debug, Default, Deserialize, PartialEq, Clone, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            output_dir: self.output.dir.clone(),
            trend_period: self.analysis.trend_period,
            eigenvector: self.analysis.eigenvector(),
        }
    }
}

pub struct AppConfigBuilder {
    logging: LoggingConfig,
    input: InputConfig,
    output: OutputConfig,
    analysis: AnalysisConfig,
}

impl From<AppConfig> for AppConfigBuilder {
    fn from(config: AppConfig) -> Self {
        Self {
            logging: config.logging,
            input: config.input,
            output: config.output,
            analysis: config.analysis,
        }
    }
}

impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfig::default().into()
    }

    pub fn with_log_level(mut self, log_level: String) -> Self {
        self.logging.log_level = log_level;
        self
    }

    pub fn with_input_path(mut self, path: PathBuf) -> Self {
        self.input.path = path;
        self
    }

    pub fn with_delimiter(mut self, delimiter: String) -> Self {
        self.input.delimiter = delimiter;
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.input.has_header = has_header;
        self
    }

    pub fn with_file_pattern(mut self, file_pattern: Option<String>) -> Self {
        self.input.file_pattern = file_pattern;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output.dir = dir;
        self
    }

    pub fn with_trend_period(mut self, trend_period: TrendPeriod) -> Self {
        self.analysis.trend_period = trend_period;
        self
    }

    pub fn with_eigenvector_max_iter(mut self, max_iter: usize) -> Self {
        self.analysis.eigenvector_max_iter = max_iter;
        self
    }

    pub fn with_eigenvector_tol(mut self, tol: f64) -> Self {
        self.analysis.eigenvector_tol = tol;
        self
    }

    pub fn build(self) -> AppConfig {
        AppConfig {
            logging: self.logging,
            input: self.input,
            output: self.output,
            analysis: self.analysis,
        }
    }
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Layers `config_path` (TOML, JSON or YAML, by extension) over `app_config`, or over the
// defaults when no base is given. Command line values are applied on top by the caller,
// so the final precedence is args >> config file >> defaults.
pub fn load_config(
    app_config: Option<AppConfig>,
    config_path: Option<PathBuf>,
) -> Result<AppConfig, ConfigError> {
    let app_config = app_config.unwrap_or_default();
    let json =
        serde_json::to_string(&app_config).map_err(|err| ConfigError::Foreign(Box::new(err)))?;
    let mut builder = Config::builder().add_source(File::from_str(&json, FileFormat::Json));
    if let Some(config_path) = config_path {
        builder = builder.add_source(File::from(config_path));
    }
    builder.build()?.try_deserialize::<AppConfig>()
}
