//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Each method is a single statement in its own auto-commit scope. A
//! get-then-update sequence is not atomic: concurrent updates of the same
//! bookmark resolve last-writer-wins.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Bookmark, BookmarkFields, ListResult},
};
use crate::normalize::FilterSpec;

/// Repository for Bookmark operations.
pub trait BookmarkRepository: Send + Sync {
    /// Insert a bookmark; storage assigns the id and both timestamps.
    fn create(&self, fields: &BookmarkFields) -> impl Future<Output = DbResult<Bookmark>> + Send;

    /// Get a bookmark by ID. Missing ids are `DbError::NotFound`.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Bookmark>> + Send;

    /// All bookmarks, newest first.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Bookmark>>> + Send;

    /// Filtered, sorted and paginated bookmarks plus the unpaginated total.
    fn list_filtered(
        &self,
        filter: &FilterSpec,
    ) -> impl Future<Output = DbResult<ListResult<Bookmark>>> + Send;

    /// Persist the bookmark's content under its id and refresh `updated_at`.
    /// Zero affected rows is `DbError::NoRowsAffected`.
    fn update(&self, bookmark: &Bookmark) -> impl Future<Output = DbResult<Bookmark>> + Send;

    /// Hard delete. Returns whether a row was removed.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Bookmarks<'a>: BookmarkRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the bookmark repository.
    fn bookmarks(&self) -> Self::Bookmarks<'_>;
}
