use crate::core::{Event, EventTable};

/// All events sorted by `(author, created_utc)`. Ties keep input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    columns: Vec<String>,
    events: Vec<Event>,
}

/// The chronologically ordered events of a single user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserTimeline<'a> {
    pub author: &'a str,
    pub events: &'a [Event],
}

pub fn build_timeline(table: EventTable) -> Timeline {
    let (columns, mut events) = table.into_parts();
    // sort_by is stable
    events.sort_by(|a, b| a.author.cmp(&b.author).then_with(|| a.time.cmp(&b.time)));
    Timeline { columns, events }
}

impl Timeline {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// One [`UserTimeline`] per author, in ascending author order. Posts without an
    /// author stay in [`Timeline::events`] but belong to no user.
    pub fn users(&self) -> impl Iterator<Item = UserTimeline<'_>> + '_ {
        self.events
            .chunk_by(|a, b| a.author == b.author)
            .filter(|events| !events[0].author.is_empty())
            .map(|events| UserTimeline {
                author: events[0].author.as_str(),
                events,
            })
    }
}

#[cfg(test)]
mod timeline_test {
    use super::build_timeline;
    use crate::core::EventTable;

    #[test]
    fn sorts_by_author_then_time() {
        let table = EventTable::from_rows([
            ("bob", "B", 30.0),
            ("alice", "A", 20.0),
            ("bob", "A", 10.0),
            ("alice", "C", 5.0),
        ])
        .unwrap();
        let timeline = build_timeline(table);
        let order: Vec<_> = timeline
            .events()
            .iter()
            .map(|e| (e.author.as_str(), e.subreddit.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("alice", "C"), ("alice", "A"), ("bob", "A"), ("bob", "B")]
        );
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let table = EventTable::from_rows([
            ("alice", "first", 7.0),
            ("alice", "second", 7.0),
            ("alice", "third", 7.0),
        ])
        .unwrap();
        let timeline = build_timeline(table);
        let subs: Vec<_> = timeline
            .events()
            .iter()
            .map(|e| e.subreddit.as_str())
            .collect();
        assert_eq!(subs, vec!["first", "second", "third"]);
    }

    #[test]
    fn groups_events_per_user() {
        let table = EventTable::from_rows([
            ("carol", "X", 1.0),
            ("alice", "A", 2.0),
            ("carol", "Y", 3.0),
        ])
        .unwrap();
        let timeline = build_timeline(table);
        let users: Vec<_> = timeline
            .users()
            .map(|user| (user.author, user.events.len()))
            .collect();
        assert_eq!(users, vec![("alice", 1), ("carol", 2)]);
    }

    #[test]
    fn anonymous_posts_belong_to_no_user() {
        let table = EventTable::from_rows([
            ("", "A", 1.0),
            ("alice", "A", 2.0),
            ("", "B", 3.0),
        ])
        .unwrap();
        let timeline = build_timeline(table);
        assert_eq!(timeline.len(), 3);
        let users: Vec<_> = timeline.users().map(|user| user.author).collect();
        assert_eq!(users, vec!["alice"]);
    }

    #[test]
    fn empty_table_has_no_users() {
        let timeline = build_timeline(EventTable::default());
        assert!(timeline.is_empty());
        assert_eq!(timeline.users().count(), 0);
    }
}
