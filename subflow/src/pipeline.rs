//! The batch run: load, derive every table and graph, write them out.
//!
//! Stages run one after another and each output is written as soon as it is
//! produced, so a failure leaves the files of the earlier stages on disk.

use crate::{
    algorithms::{
        centrality::{
            centrality_table, eigenvector::EigenvectorConfig, CentralityEngine,
            StandardCentrality,
        },
        migration::{
            extract::extract_migrations, flow::FlowTable, network::migration_graph,
            timeline::build_timeline,
        },
        trends::{subreddit_trends, TrendPeriod},
    },
    core::EventTable,
    errors::GraphError,
    graph::BipartiteGraph,
    graph_loader::source::csv_loader::CsvLoader,
    io::{
        gexf::{AttrType, GexfExport},
        tables,
    },
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, info_span};

pub const USER_TIMELINE_FILE: &str = "user_timeline.csv";
pub const USER_MIGRATIONS_FILE: &str = "user_migrations.csv";
pub const MIGRATION_FLOW_FILE: &str = "migration_flow.csv";
pub const MIGRATION_NETWORK_FILE: &str = "migration_network.gexf";
pub const SUBREDDIT_TRENDS_FILE: &str = "subreddit_trends.csv";
pub const SUBREDDIT_NETWORK_FILE: &str = "subreddit_network.gexf";
pub const SUBREDDIT_METRICS_FILE: &str = "subreddit_metrics.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub trend_period: TrendPeriod,
    pub eigenvector: EigenvectorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            trend_period: TrendPeriod::default(),
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

/// Counts and output locations of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub users: usize,
    pub migrations: usize,
    pub flows: usize,
    pub communities: usize,
    pub projected_edges: usize,
    pub outputs: Vec<PathBuf>,
}

pub struct Pipeline<C = StandardCentrality> {
    config: PipelineConfig,
    engine: C,
}

impl Pipeline<StandardCentrality> {
    pub fn new(config: PipelineConfig) -> Self {
        let engine = StandardCentrality::new(config.eigenvector);
        Self { config, engine }
    }
}

impl<C: CentralityEngine> Pipeline<C> {
    /// Uses a different centrality implementation for the metrics table.
    pub fn with_engine(config: PipelineConfig, engine: C) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn output(&self, file: &str) -> PathBuf {
        self.config.output_dir.join(file)
    }

    /// Loads the input with `loader` and runs every stage on it.
    pub fn run_with_loader(&self, loader: &CsvLoader) -> Result<RunSummary, GraphError> {
        let table = {
            let _span = info_span!("stage", name = "load").entered();
            loader.load_events().map_err(|err| err.in_stage("load"))?
        };
        self.run(table)
    }

    pub fn run(&self, table: EventTable) -> Result<RunSummary, GraphError> {
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|err| GraphError::from(err).in_stage("setup"))?;
        let mut summary = RunSummary {
            rows: table.len(),
            ..RunSummary::default()
        };

        // built before the timeline reorders rows, so communities keep input order
        let bipartite = BipartiteGraph::from_events(&table);

        let timeline = stage("timeline", || {
            let timeline = build_timeline(table);
            let path = self.output(USER_TIMELINE_FILE);
            tables::write_timeline(&path, &timeline)?;
            info!(rows = timeline.len(), path = %path.display(), "saved user timeline");
            summary.outputs.push(path);
            Ok(timeline)
        })?;
        summary.users = timeline.users().count();

        let migrations = stage("migrations", || {
            let migrations = extract_migrations(&timeline);
            let path = self.output(USER_MIGRATIONS_FILE);
            tables::write_migrations(&path, &migrations)?;
            info!(
                migrations = migrations.len(),
                path = %path.display(),
                "saved user migrations"
            );
            summary.outputs.push(path);
            Ok(migrations)
        })?;
        summary.migrations = migrations.len();

        let flow = stage("flow", || {
            let flow = FlowTable::from_migrations(&migrations);
            let path = self.output(MIGRATION_FLOW_FILE);
            tables::write_flow(&path, &flow)?;
            info!(
                flows = flow.len(),
                total = flow.total(),
                path = %path.display(),
                "saved migration flow"
            );
            summary.outputs.push(path);
            Ok(flow)
        })?;
        summary.flows = flow.len();

        stage("migration_network", || {
            let graph = migration_graph(&flow);
            let path = self.output(MIGRATION_NETWORK_FILE);
            GexfExport::new(&graph).save(&path)?;
            info!(
                nodes = graph.count_nodes(),
                edges = graph.count_edges(),
                path = %path.display(),
                "saved migration network"
            );
            summary.outputs.push(path);
            Ok(())
        })?;

        stage("trends", || {
            let trends = subreddit_trends(timeline.events(), self.config.trend_period);
            let path = self.output(SUBREDDIT_TRENDS_FILE);
            tables::write_trends(&path, &trends, self.config.trend_period)?;
            info!(rows = trends.len(), path = %path.display(), "saved subreddit trends");
            summary.outputs.push(path);
            Ok(())
        })?;

        let projected = stage("projection", || {
            let projected = bipartite.weighted_projection();
            let users = projected
                .node_names()
                .map(|name| bipartite.community_size(name).unwrap_or_default().to_string())
                .collect();
            let path = self.output(SUBREDDIT_NETWORK_FILE);
            GexfExport::new(&projected)
                .with_node_attribute("users", AttrType::Integer, users)
                .save(&path)?;
            info!(
                communities = projected.count_nodes(),
                edges = projected.count_edges(),
                path = %path.display(),
                "saved subreddit network"
            );
            summary.outputs.push(path);
            Ok(projected)
        })?;
        summary.communities = projected.count_nodes();
        summary.projected_edges = projected.count_edges();

        stage("centrality", || {
            let metrics = centrality_table(&self.engine, &projected)?;
            let path = self.output(SUBREDDIT_METRICS_FILE);
            tables::write_metrics(&path, &metrics)?;
            info!(rows = metrics.len(), path = %path.display(), "saved subreddit metrics");
            summary.outputs.push(path);
            Ok(())
        })?;

        Ok(summary)
    }
}

/// Runs `f` inside a tracing span named after the stage and tags any error with it.
fn stage<T>(
    name: &'static str,
    f: impl FnOnce() -> Result<T, GraphError>,
) -> Result<T, GraphError> {
    let _span = info_span!("stage", name).entered();
    f().map_err(|err| err.in_stage(name))
}

/// Convenience wrapper: load `input` with default CSV settings and run with `config`.
pub fn run_path(input: &Path, config: PipelineConfig) -> Result<RunSummary, GraphError> {
    Pipeline::new(config).run_with_loader(&CsvLoader::new(input))
}
