//! Filter, sort and pagination normalization.

use crate::db::{BookmarkStatus, parse_status};

use super::ValidationError;

pub const DEFAULT_LIMIT: u32 = 100;
pub const MAX_LIMIT: u32 = 1000;

/// Column a filtered listing is ordered by.
///
/// The column name emitted into SQL comes only from [`SortField::column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortField {
    /// Case-insensitive lookup of a sort token.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("created_at") {
            Some(SortField::CreatedAt)
        } else if token.eq_ignore_ascii_case("updated_at") {
            Some(SortField::UpdatedAt)
        } else if token.eq_ignore_ascii_case("title") {
            Some(SortField::Title)
        } else {
            None
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
        }
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive lookup of `asc` / `desc`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Effective limit and offset of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// Validate raw pagination values.
///
/// A present limit must be positive and is capped at [`MAX_LIMIT`]; a present
/// offset must be non-negative. Absent values fall back to
/// [`DEFAULT_LIMIT`] and 0.
pub fn validate_pagination(
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Page, ValidationError> {
    let limit = match limit {
        Some(l) if l <= 0 => {
            return Err(ValidationError::InvalidParameter {
                name: "limit",
                message: format!("must be positive, got: {}", l),
            });
        }
        Some(l) => l.min(i64::from(MAX_LIMIT)) as u32,
        None => DEFAULT_LIMIT,
    };

    let offset = match offset {
        Some(o) if o < 0 => {
            return Err(ValidationError::InvalidParameter {
                name: "offset",
                message: format!("must be non-negative, got: {}", o),
            });
        }
        Some(o) => o,
        None => 0,
    };

    Ok(Page { limit, offset })
}

/// Resolve a sort field. Unknown or absent values resolve to `created_at`.
pub fn validate_sort_field(raw: Option<&str>) -> SortField {
    raw.and_then(SortField::from_token).unwrap_or_default()
}

/// Resolve a sort direction. Only exactly `desc` (any case) is descending;
/// anything else, padded or malformed input included, is ascending.
pub fn validate_sort_order(raw: Option<&str>) -> SortOrder {
    match raw {
        Some(value) if value.eq_ignore_ascii_case("desc") => SortOrder::Desc,
        _ => SortOrder::Asc,
    }
}

/// Raw, optional filter parameters as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated, request-scoped description of a filtered listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    search: Option<String>,
    status: Option<BookmarkStatus>,
    tag: Option<String>,
    sort: SortField,
    order: SortOrder,
    page: Page,
}

/// Present-but-blank text counts as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl FilterSpec {
    /// Validate raw parameters.
    ///
    /// Unlike [`validate_sort_field`] and [`validate_sort_order`], this
    /// rejects unrecognized sort and order tokens.
    pub fn parse(params: &FilterParams) -> Result<Self, ValidationError> {
        let status = non_blank(params.status.as_deref())
            .map(|s| parse_status(Some(s)))
            .transpose()?;

        let sort = non_blank(params.sort.as_deref());
        if let Some(token) = sort
            && SortField::from_token(token).is_none()
        {
            return Err(ValidationError::InvalidParameter {
                name: "sort",
                message: format!("must be one of created_at, updated_at, title, got: {}", token),
            });
        }

        let order = non_blank(params.order.as_deref());
        if let Some(token) = order
            && SortOrder::from_token(token).is_none()
        {
            return Err(ValidationError::InvalidParameter {
                name: "order",
                message: format!("must be asc or desc, got: {}", token),
            });
        }

        Ok(Self {
            search: non_blank(params.q.as_deref()).map(str::to_string),
            status,
            tag: non_blank(params.tag.as_deref()).map(str::to_string),
            sort: validate_sort_field(sort),
            order: validate_sort_order(order),
            page: validate_pagination(params.limit, params.offset)?,
        })
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn status(&self) -> Option<BookmarkStatus> {
        self.status
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn sort(&self) -> SortField {
        self.sort
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn page(&self) -> Page {
        self.page
    }
}
