use serde::{Deserialize, Serialize};
use subflow::algorithms::{
    centrality::eigenvector::{EigenvectorConfig, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE},
    trends::TrendPeriod,
};

#[derive(Debug, Deserialize, PartialEq, Clone, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub trend_period: TrendPeriod,
    pub eigenvector_max_iter: usize,
    pub eigenvector_tol: f64,
}

impl AnalysisConfig {
    pub fn eigenvector(&self) -> EigenvectorConfig {
        EigenvectorConfig {
            max_iter: self.eigenvector_max_iter,
            tol: self.eigenvector_tol,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_period: TrendPeriod::default(),
            eigenvector_max_iter: DEFAULT_MAX_ITER,
            eigenvector_tol: DEFAULT_TOLERANCE,
        }
    }
}
