//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! the HTTP layer.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Bookmark, BookmarkFields, BookmarkStatus)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
