//! Normalization pipeline.
//!
//! Turns raw, untrusted field values into canonical, bounded, storable forms,
//! and raw filter/sort/pagination parameters into a validated [`FilterSpec`].
//!
//! Every function here is pure: it either returns the canonical value or a
//! [`ValidationError`]. Re-applying a normalizer to its own output returns the
//! same value.
//!
//! # Layout
//!
//! - `error`: the [`ValidationError`] type
//! - `fields`: URL, title, tags and notes normalizers
//! - `filter`: pagination, sort field, sort order and [`FilterSpec`]

mod error;
mod fields;
mod filter;

#[cfg(test)]
mod filter_test;

pub use error::ValidationError;
pub use fields::{
    NOTES_MAX_LENGTH, TAGS_MAX_LENGTH, TITLE_MAX_LENGTH, normalize_notes, normalize_tags,
    normalize_title, normalize_url,
};
pub use filter::{
    DEFAULT_LIMIT, FilterParams, FilterSpec, MAX_LIMIT, Page, SortField, SortOrder,
    validate_pagination, validate_sort_field, validate_sort_order,
};
