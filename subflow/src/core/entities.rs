use crate::core::time::{EpochTime, ParseTimeError};

pub const AUTHOR_COL: &str = "author";
pub const SUBREDDIT_COL: &str = "subreddit";
pub const CREATED_UTC_COL: &str = "created_utc";

/// One post: who wrote it, in which community, and when.
///
/// The raw record the event was read from is kept alongside so that the timeline
/// table can be written back out with every input column intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub author: String,
    pub subreddit: String,
    pub time: EpochTime,
    fields: Vec<String>,
}

impl Event {
    pub fn new(
        author: impl Into<String>,
        subreddit: impl Into<String>,
        created_utc: f64,
    ) -> Result<Self, ParseTimeError> {
        let time = EpochTime::from_secs(created_utc)?;
        let author = author.into();
        let subreddit = subreddit.into();
        let fields = vec![author.clone(), subreddit.clone(), created_utc.to_string()];
        Ok(Self {
            author,
            subreddit,
            time,
            fields,
        })
    }

    pub fn with_fields(
        author: String,
        subreddit: String,
        time: EpochTime,
        fields: Vec<String>,
    ) -> Self {
        Self {
            author,
            subreddit,
            time,
            fields,
        }
    }

    /// The raw input fields, in the column order of the owning [`EventTable`].
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn year(&self) -> i32 {
        self.time.year()
    }

    pub fn month(&self) -> u32 {
        self.time.month()
    }
}

/// The raw activity table: column names plus one [`Event`] per input row, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    columns: Vec<String>,
    events: Vec<Event>,
}

impl EventTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            events: Vec::new(),
        }
    }

    /// Builds a table with only the three required columns.
    ///
    /// # Example
    ///
    /// ```
    /// use subflow::core::EventTable;
    ///
    /// let table = EventTable::from_rows([
    ///     ("alice", "MachineLearning", 100.0),
    ///     ("alice", "learnmachinelearning", 300.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_rows<A, S, I>(rows: I) -> Result<Self, ParseTimeError>
    where
        A: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = (A, S, f64)>,
    {
        let mut table = Self::new(vec![
            AUTHOR_COL.to_string(),
            SUBREDDIT_COL.to_string(),
            CREATED_UTC_COL.to_string(),
        ]);
        for (author, subreddit, created_utc) in rows {
            table.push(Event::new(author, subreddit, created_utc)?);
        }
        Ok(table)
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Event>) {
        (self.columns, self.events)
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
