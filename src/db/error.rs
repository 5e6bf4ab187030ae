//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(bookmarks::db::not_found))]
    NotFound { entity_type: String, id: String },

    /// A statement expected to touch one row touched none. Callers decide
    /// whether that means the row is gone.
    #[error("No rows affected by {operation} of id '{id}'")]
    #[diagnostic(code(bookmarks::db::no_rows_affected))]
    NoRowsAffected { operation: &'static str, id: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(bookmarks::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(bookmarks::db::connection_error))]
    Connection { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(bookmarks::db::migration_error))]
    Migration { message: String },

    #[error("Corrupt row: {message}")]
    #[diagnostic(
        code(bookmarks::db::corrupt_row),
        help("A stored value no longer matches the schema; inspect the row directly")
    )]
    CorruptRow { message: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
