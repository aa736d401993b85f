use crate::{
    algorithms::{
        centrality::CentralityRow,
        migration::{extract::MigrationEdge, flow::FlowTable, timeline::Timeline},
        trends::{TrendPeriod, TrendRow},
    },
    core::CREATED_UTC_COL,
    errors::GraphError,
};
use serde::Serialize;
use std::{fs::File, path::Path};

fn csv_writer(path: &Path) -> Result<csv::Writer<File>, GraphError> {
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?)
}

/// Writes `header` followed by one serialized row per element. The header is written
/// even when `rows` is empty.
fn write_rows<'a, T, I>(path: &Path, header: &[&str], rows: I) -> Result<(), GraphError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = csv_writer(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Every input column followed by `year` and `month`, rows in timeline order.
/// `created_utc` is written as a UTC datetime rather than the raw epoch.
pub fn write_timeline(path: &Path, timeline: &Timeline) -> Result<(), GraphError> {
    let time_column = timeline
        .columns()
        .iter()
        .position(|column| column == CREATED_UTC_COL);
    let mut writer = csv_writer(path)?;
    writer.write_record(
        timeline
            .columns()
            .iter()
            .map(String::as_str)
            .chain(["year", "month"]),
    )?;
    for event in timeline.events() {
        writer.write_record(
            event
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    if Some(i) == time_column {
                        event.time.to_utc_string()
                    } else {
                        field.clone()
                    }
                })
                .chain([event.year().to_string(), event.month().to_string()]),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_migrations(path: &Path, migrations: &[MigrationEdge]) -> Result<(), GraphError> {
    write_rows(path, &["from_sub", "to_sub"], migrations)
}

pub fn write_flow(path: &Path, flow: &FlowTable) -> Result<(), GraphError> {
    write_rows(path, &["from_sub", "to_sub", "count"], &flow.rows())
}

pub fn write_trends(
    path: &Path,
    trends: &[TrendRow],
    period: TrendPeriod,
) -> Result<(), GraphError> {
    let header: &[&str] = match period {
        TrendPeriod::Year => &["year", "subreddit", "posts"],
        TrendPeriod::Month => &["year", "month", "subreddit", "posts"],
    };
    write_rows(path, header, trends)
}

pub fn write_metrics(path: &Path, metrics: &[CentralityRow]) -> Result<(), GraphError> {
    write_rows(
        path,
        &[
            "subreddit",
            "degree_centrality",
            "betweenness_centrality",
            "eigenvector_centrality",
        ],
        metrics,
    )
}

#[cfg(test)]
mod tables_test {
    use super::{write_flow, write_metrics, write_migrations, write_timeline, write_trends};
    use crate::{
        algorithms::{
            centrality::CentralityRow,
            migration::{extract::MigrationEdge, flow::FlowTable, timeline::build_timeline},
            trends::{TrendPeriod, TrendRow},
        },
        core::EventTable,
    };
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn timeline_appends_year_and_month() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_timeline.csv");
        let table =
            EventTable::from_rows([("bob", "B", 1_700_000_000.0), ("alice", "A", 0.0)]).unwrap();
        write_timeline(&path, &build_timeline(table)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "author,subreddit,created_utc,year,month\n\
             alice,A,1970-01-01 00:00:00,1970,1\n\
             bob,B,2023-11-14 22:13:20,2023,11\n"
        );
    }

    #[test]
    fn empty_tables_still_have_headers() {
        let dir = tempfile::tempdir().unwrap();
        let migrations = dir.path().join("user_migrations.csv");
        let flow = dir.path().join("migration_flow.csv");
        write_migrations(&migrations, &[]).unwrap();
        write_flow(&flow, &FlowTable::default()).unwrap();
        assert_eq!(fs::read_to_string(migrations).unwrap(), "from_sub,to_sub\n");
        assert_eq!(fs::read_to_string(flow).unwrap(), "from_sub,to_sub,count\n");
    }

    #[test]
    fn flow_and_trend_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migration_flow.csv");
        let migrations = vec![MigrationEdge::new("A", "B"), MigrationEdge::new("A", "B")];
        write_flow(&path, &FlowTable::from_migrations(&migrations)).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "from_sub,to_sub,count\nA,B,2\n"
        );

        let path = dir.path().join("subreddit_trends.csv");
        let rows = vec![TrendRow {
            year: 2024,
            month: Some(2),
            subreddit: "A".to_string(),
            posts: 3,
        }];
        write_trends(&path, &rows, TrendPeriod::Month).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "year,month,subreddit,posts\n2024,2,A,3\n"
        );
    }

    #[test]
    fn metrics_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subreddit_metrics.csv");
        let rows = vec![CentralityRow {
            subreddit: "A".to_string(),
            degree_centrality: 1.0,
            betweenness_centrality: 0.0,
            eigenvector_centrality: 0.5,
        }];
        write_metrics(&path, &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("subreddit,degree_centrality,betweenness_centrality,eigenvector_centrality")
        );
        assert_eq!(lines.next(), Some("A,1.0,0.0,0.5"));
    }
}
