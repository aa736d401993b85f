//! Core data model: raw activity events and their timestamps.

pub mod entities;
pub mod time;

pub use entities::{Event, EventTable, AUTHOR_COL, CREATED_UTC_COL, SUBREDDIT_COL};
pub use time::{EpochTime, ParseTimeError};
