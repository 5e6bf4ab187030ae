//! Domain models for the bookmark database.
//!
//! These models are storage-agnostic. `Bookmark` and `BookmarkFields` are
//! immutable once built; changes produce new values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::{
    ValidationError, normalize_notes, normalize_tags, normalize_title, normalize_url,
};

// =============================================================================
// Status
// =============================================================================

/// Workflow label of a bookmark. Any status may change to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookmarkStatus {
    #[default]
    Inbox,
    Done,
}

impl BookmarkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkStatus::Inbox => "INBOX",
            BookmarkStatus::Done => "DONE",
        }
    }
}

impl std::fmt::Display for BookmarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookmarkStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(Some(s))
    }
}

/// Parse a raw status value: trimmed, case-insensitive, `INBOX` or `DONE`.
///
/// Missing or blank input is [`ValidationError::StatusRequired`].
pub fn parse_status(raw: Option<&str>) -> Result<BookmarkStatus, ValidationError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Err(ValidationError::StatusRequired);
    };

    match value.to_ascii_uppercase().as_str() {
        "INBOX" => Ok(BookmarkStatus::Inbox),
        "DONE" => Ok(BookmarkStatus::Done),
        _ => Err(ValidationError::InvalidStatus {
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Bookmark
// =============================================================================

/// Raw, untrusted bookmark content as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct BookmarkInput {
    pub url: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
}

/// Validated, storable bookmark content.
///
/// Only obtainable through [`BookmarkFields::parse`], so every value that
/// reaches storage already satisfies its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFields {
    url: String,
    title: String,
    tags: String,
    notes: String,
    status: BookmarkStatus,
}

impl BookmarkFields {
    pub fn parse(input: &BookmarkInput, status: BookmarkStatus) -> Result<Self, ValidationError> {
        Ok(Self {
            url: normalize_url(input.url.as_deref())?,
            title: normalize_title(input.title.as_deref())?,
            tags: normalize_tags(input.tags.as_deref())?,
            notes: normalize_notes(input.notes.as_deref())?,
            status,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn status(&self) -> BookmarkStatus {
        self.status
    }

    pub fn with_status(&self, status: BookmarkStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Rebuild from values read back from storage.
    pub(crate) fn from_stored(
        url: String,
        title: String,
        tags: String,
        notes: String,
        status: BookmarkStatus,
    ) -> Self {
        Self {
            url,
            title,
            tags,
            notes,
            status,
        }
    }
}

/// A persisted bookmark.
///
/// `id` and `created_at` never change; every successful mutation produces a
/// new value with a refreshed `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    id: i64,
    fields: BookmarkFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Bookmark {
    pub(crate) fn from_parts(
        id: i64,
        fields: BookmarkFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn fields(&self) -> &BookmarkFields {
        &self.fields
    }

    pub fn url(&self) -> &str {
        self.fields.url()
    }

    pub fn title(&self) -> &str {
        self.fields.title()
    }

    pub fn tags(&self) -> &str {
        self.fields.tags()
    }

    pub fn notes(&self) -> &str {
        self.fields.notes()
    }

    pub fn status(&self) -> BookmarkStatus {
        self.fields.status()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy with replaced content; identity and timestamps are kept.
    pub fn with_fields(&self, fields: BookmarkFields) -> Self {
        Self {
            fields,
            ..self.clone()
        }
    }

    /// Copy with a different status.
    pub fn with_status(&self, status: BookmarkStatus) -> Self {
        self.with_fields(self.fields.with_status(status))
    }

    /// Copy stamped with a new `updated_at`, never earlier than `created_at`.
    pub(crate) fn touched(&self, at: DateTime<Utc>) -> Self {
        Self {
            updated_at: at.max(self.created_at),
            ..self.clone()
        }
    }
}

// =============================================================================
// Query results
// =============================================================================

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
    /// Limit that was applied.
    pub limit: u32,
    /// Offset that was applied.
    pub offset: i64,
}
