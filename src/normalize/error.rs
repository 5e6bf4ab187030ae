//! Validation error types.
//!
//! Raised synchronously by the normalization pipeline. These never originate
//! from storage and are never retried.

use miette::Diagnostic;
use thiserror::Error;

/// Input was malformed, empty, oversized or outside its enumeration.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL cannot be empty")]
    #[diagnostic(code(bookmarks::validation::empty_url))]
    EmptyUrl,

    #[error("Invalid URL: {message}")]
    #[diagnostic(
        code(bookmarks::validation::invalid_url),
        help("Use an absolute http:// or https:// URL with a host, e.g. https://example.com/page")
    )]
    InvalidUrl { message: String },

    #[error("Title cannot be empty")]
    #[diagnostic(code(bookmarks::validation::empty_title))]
    EmptyTitle,

    #[error("Title cannot exceed {max} characters (got {actual})")]
    #[diagnostic(code(bookmarks::validation::title_too_long))]
    TitleTooLong { max: usize, actual: usize },

    #[error("Tags cannot exceed {max} characters (got {actual})")]
    #[diagnostic(code(bookmarks::validation::tags_too_long))]
    TagsTooLong { max: usize, actual: usize },

    #[error("Notes cannot exceed {max} characters (got {actual})")]
    #[diagnostic(code(bookmarks::validation::notes_too_long))]
    NotesTooLong { max: usize, actual: usize },

    #[error("Status is required")]
    #[diagnostic(code(bookmarks::validation::status_required))]
    StatusRequired,

    #[error("Status must be INBOX or DONE, got: {value}")]
    #[diagnostic(code(bookmarks::validation::invalid_status))]
    InvalidStatus { value: String },

    #[error("Invalid parameter '{name}': {message}")]
    #[diagnostic(code(bookmarks::validation::invalid_parameter))]
    InvalidParameter { name: &'static str, message: String },
}
