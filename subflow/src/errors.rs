use std::path::PathBuf;

/// Problems with the shape or content of the input table. These abort the run.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("{path}: missing required columns: {}", .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
    #[error("{path}: header does not match the header of the first input file")]
    HeaderMismatch { path: PathBuf },
    #[error("{path}:{line}: created_utc value '{value}' is not a numeric epoch")]
    InvalidTimestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },
    #[error("{path}:{line}: created_utc value '{value}' is outside the supported date range")]
    TimestampOutOfRange {
        path: PathBuf,
        line: u64,
        value: String,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("Invalid input format: {0}")]
    Format(#[from] FormatError),

    #[error("{metric} centrality failed to converge in {iterations} iterations")]
    Convergence {
        metric: &'static str,
        iterations: usize,
    },

    #[error("No input files found at {0}")]
    NoInputFiles(PathBuf),

    #[error("Invalid file name pattern")]
    InvalidPattern(#[from] regex::Error),

    #[error("CSV operation failed")]
    Csv(#[from] csv::Error),

    #[error("XML write failed")]
    Xml(#[from] quick_xml::Error),

    #[error("IO operation failed")]
    IOError {
        #[from]
        source: std::io::Error,
    },

    #[error("{stage} stage failed")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<GraphError>,
    },
}

impl GraphError {
    pub(crate) fn in_stage(self, stage: &'static str) -> Self {
        match self {
            err @ GraphError::Stage { .. } => err,
            err => GraphError::Stage {
                stage,
                source: Box::new(err),
            },
        }
    }

    /// Strips any stage context and returns the error that caused the failure.
    pub fn root(&self) -> &GraphError {
        match self {
            GraphError::Stage { source, .. } => source.root(),
            err => err,
        }
    }
}
