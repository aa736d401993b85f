use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use subflow::{errors::GraphError, graph_loader::source::csv_loader::CsvLoader};

pub const DEFAULT_INPUT_PATH: &str = "combined_raw.csv";
pub const DEFAULT_DELIMITER: &str = ",";

/// Where the raw activity table lives and how to read it.
#[derive(Debug, Deserialize, PartialEq, Clone, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// A single file or a directory of files.
    pub path: PathBuf,
    pub delimiter: String,
    pub has_header: bool,
    /// Only files whose path matches this regex are read.
    pub file_pattern: Option<String>,
}

impl InputConfig {
    pub fn loader(&self) -> Result<CsvLoader, GraphError> {
        let mut loader = CsvLoader::new(&self.path)
            .set_header(self.has_header)
            .set_delimiter(&self.delimiter);
        if let Some(pattern) = &self.file_pattern {
            loader = loader.with_filter(Regex::new(pattern)?);
        }
        Ok(loader)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
            delimiter: DEFAULT_DELIMITER.to_string(),
            has_header: true,
            file_pattern: None,
        }
    }
}
