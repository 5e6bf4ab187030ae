//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod bookmark;
mod connection;
mod helpers;

#[cfg(test)]
mod bookmark_test;

pub use bookmark::SqliteBookmarkRepository;
pub use connection::SqliteDatabase;
pub use helpers::{FilteredQuery, build_filtered_query};
