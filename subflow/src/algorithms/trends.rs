//! Post counts per community and period.

use crate::core::Event;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    #[default]
    Year,
    Month,
}

impl FromStr for TrendPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(TrendPeriod::Year),
            "month" => Ok(TrendPeriod::Month),
            other => Err(format!("'{other}' is not a trend period, expected year or month")),
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendPeriod::Year => write!(f, "year"),
            TrendPeriod::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRow {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub month: Option<u32>,
    pub subreddit: String,
    pub posts: usize,
}

/// Counts posts per `(period, subreddit)`. Rows come out sorted by period, then by
/// subreddit name.
pub fn subreddit_trends<'a, I>(events: I, period: TrendPeriod) -> Vec<TrendRow>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut counts: BTreeMap<(i32, Option<u32>, &str), usize> = BTreeMap::new();
    for event in events {
        let month = match period {
            TrendPeriod::Year => None,
            TrendPeriod::Month => Some(event.month()),
        };
        *counts
            .entry((event.year(), month, event.subreddit.as_str()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((year, month, subreddit), posts)| TrendRow {
            year,
            month,
            subreddit: subreddit.to_owned(),
            posts,
        })
        .collect()
}

#[cfg(test)]
mod trends_test {
    use super::{subreddit_trends, TrendPeriod, TrendRow};
    use crate::core::EventTable;
    use pretty_assertions::assert_eq;

    // 2022-01-15, 2022-03-01, 2023-06-10
    const JAN_2022: f64 = 1_642_204_800.0;
    const MAR_2022: f64 = 1_646_092_800.0;
    const JUN_2023: f64 = 1_686_355_200.0;

    fn row(year: i32, month: Option<u32>, subreddit: &str, posts: usize) -> TrendRow {
        TrendRow {
            year,
            month,
            subreddit: subreddit.to_string(),
            posts,
        }
    }

    fn table() -> EventTable {
        EventTable::from_rows([
            ("u1", "b", JAN_2022),
            ("u2", "a", MAR_2022),
            ("u1", "b", MAR_2022),
            ("u3", "a", JUN_2023),
            ("u3", "b", JAN_2022),
        ])
        .unwrap()
    }

    #[test]
    fn yearly_counts() {
        assert_eq!(
            subreddit_trends(&table(), TrendPeriod::Year),
            vec![
                row(2022, None, "a", 1),
                row(2022, None, "b", 3),
                row(2023, None, "a", 1),
            ]
        );
    }

    #[test]
    fn monthly_counts() {
        assert_eq!(
            subreddit_trends(&table(), TrendPeriod::Month),
            vec![
                row(2022, Some(1), "b", 2),
                row(2022, Some(3), "a", 1),
                row(2022, Some(3), "b", 1),
                row(2023, Some(6), "a", 1),
            ]
        );
    }

    #[test]
    fn parses_period_names() {
        assert_eq!("Month".parse::<TrendPeriod>(), Ok(TrendPeriod::Month));
        assert_eq!("year".parse::<TrendPeriod>(), Ok(TrendPeriod::Year));
        assert!("week".parse::<TrendPeriod>().is_err());
        assert_eq!(TrendPeriod::Month.to_string(), "month");
    }

    #[test]
    fn counts_sum_to_rows() {
        let total: usize = subreddit_trends(&table(), TrendPeriod::Year)
            .iter()
            .map(|row| row.posts)
            .sum();
        assert_eq!(total, 5);
    }
}
