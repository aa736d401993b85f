//! Loaders that turn activity dumps on disk into an [`EventTable`](crate::core::EventTable).

pub mod source;
