//! Bookmark management handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::api::{ApiJson, ApiPath, ApiQuery, AppState};
use crate::api::error::{ApiError, ErrorResponse};
use crate::db::utils::format_timestamp;
use crate::db::{
    Bookmark, BookmarkFields, BookmarkInput, BookmarkRepository, BookmarkStatus, Database,
    parse_status,
};
use crate::normalize::{FilterParams, FilterSpec, ValidationError};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct BookmarkResponse {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "https://example.com/a")]
    pub url: String,
    #[schema(example = "Example article")]
    pub title: String,
    #[schema(example = "rust web")]
    pub tags: String,
    #[schema(example = "Read later")]
    pub notes: String,
    #[schema(example = "INBOX")]
    pub status: String,
    #[schema(example = "2025-01-01T12:00:00.000000Z")]
    pub created_at: String,
    #[schema(example = "2025-01-01T12:00:00.000000Z")]
    pub updated_at: String,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id(),
            url: b.url().to_string(),
            title: b.title().to_string(),
            tags: b.tags().to_string(),
            notes: b.notes().to_string(),
            status: b.status().to_string(),
            created_at: format_timestamp(&b.created_at()),
            updated_at: format_timestamp(&b.updated_at()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookmarkRequest {
    #[schema(example = "example.com/a")]
    pub url: Option<String>,
    #[schema(example = "Example article")]
    pub title: Option<String>,
    #[schema(example = "rust web")]
    pub tags: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookmarkRequest {
    #[schema(example = "https://example.com/a")]
    pub url: Option<String>,
    #[schema(example = "Example article")]
    pub title: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
    /// New status; absent keeps the current one
    #[schema(example = "DONE")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "DONE")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBookmarksQuery {
    /// Substring matched against url, title, tags and notes
    #[param(example = "rust")]
    pub q: Option<String>,
    /// Filter by status (INBOX, DONE)
    #[param(example = "INBOX")]
    pub status: Option<String>,
    /// Substring matched against tags
    #[param(example = "web")]
    pub tag: Option<String>,
    /// Field to sort by (created_at, updated_at, title)
    #[param(example = "created_at")]
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    #[param(example = "desc")]
    pub order: Option<String>,
    /// Maximum number of items to return (1-1000)
    #[param(example = 20)]
    pub limit: Option<i64>,
    /// Number of items to skip
    #[param(example = 0)]
    pub offset: Option<i64>,
}

impl From<ListBookmarksQuery> for FilterParams {
    fn from(q: ListBookmarksQuery) -> Self {
        Self {
            q: q.q,
            status: q.status,
            tag: q.tag,
            sort: q.sort,
            order: q.order,
            limit: q.limit,
            offset: q.offset,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedBookmarks {
    pub items: Vec<BookmarkResponse>,
    pub total: usize,
    pub limit: u32,
    pub offset: i64,
}

fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidParameter {
            name: "id",
            message: format!("must be an integer, got: {}", raw),
        })
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/bookmarks",
    tag = "bookmarks",
    params(ListBookmarksQuery),
    responses(
        (status = 200, description = "Paginated list of bookmarks", body = PaginatedBookmarks),
        (status = 400, description = "Invalid filter parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_bookmarks<D: Database>(
    State(state): State<AppState<D>>,
    ApiQuery(query): ApiQuery<ListBookmarksQuery>,
) -> Result<Json<PaginatedBookmarks>, ApiError> {
    let filter = FilterSpec::parse(&FilterParams::from(query))?;
    let result = state.db().bookmarks().list_filtered(&filter).await?;

    Ok(Json(PaginatedBookmarks {
        items: result
            .items
            .into_iter()
            .map(BookmarkResponse::from)
            .collect(),
        total: result.total,
        limit: result.limit,
        offset: result.offset,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookmarks/{id}",
    tag = "bookmarks",
    params(("id" = i64, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "Bookmark found", body = BookmarkResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Bookmark not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_bookmark<D: Database>(
    State(state): State<AppState<D>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let id = parse_id(&id)?;
    let bookmark = state.db().bookmarks().get(id).await?;
    Ok(Json(BookmarkResponse::from(bookmark)))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookmarks",
    tag = "bookmarks",
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 400, description = "Invalid bookmark fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_bookmark<D: Database>(
    State(state): State<AppState<D>>,
    ApiJson(req): ApiJson<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), ApiError> {
    let input = BookmarkInput {
        url: req.url,
        title: req.title,
        tags: req.tags,
        notes: req.notes,
    };
    let fields = BookmarkFields::parse(&input, BookmarkStatus::Inbox)?;
    let created = state.db().bookmarks().create(&fields).await?;

    Ok((StatusCode::CREATED, Json(BookmarkResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookmarks/{id}",
    tag = "bookmarks",
    params(("id" = i64, Path, description = "Bookmark ID")),
    request_body = UpdateBookmarkRequest,
    responses(
        (status = 200, description = "Bookmark updated", body = BookmarkResponse),
        (status = 400, description = "Invalid bookmark fields", body = ErrorResponse),
        (status = 404, description = "Bookmark not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_bookmark<D: Database>(
    State(state): State<AppState<D>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateBookmarkRequest>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let id = parse_id(&id)?;
    let requested_status = match req.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(parse_status(Some(s))?),
        _ => None,
    };

    let repo = state.db().bookmarks();
    let existing = repo.get(id).await?;

    let input = BookmarkInput {
        url: req.url,
        title: req.title,
        tags: req.tags,
        notes: req.notes,
    };
    let fields = BookmarkFields::parse(&input, requested_status.unwrap_or(existing.status()))?;
    let updated = repo.update(&existing.with_fields(fields)).await?;

    Ok(Json(BookmarkResponse::from(updated)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookmarks/{id}/status",
    tag = "bookmarks",
    params(("id" = i64, Path, description = "Bookmark ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = BookmarkResponse),
        (status = 400, description = "Missing or unknown status", body = ErrorResponse),
        (status = 404, description = "Bookmark not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_bookmark_status<D: Database>(
    State(state): State<AppState<D>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let id = parse_id(&id)?;
    let status = parse_status(req.status.as_deref())?;

    let repo = state.db().bookmarks();
    let existing = repo.get(id).await?;
    let updated = repo.update(&existing.with_status(status)).await?;

    Ok(Json(BookmarkResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookmarks/{id}",
    tag = "bookmarks",
    params(("id" = i64, Path, description = "Bookmark ID")),
    responses(
        (status = 204, description = "Bookmark deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Bookmark not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_bookmark<D: Database>(
    State(state): State<AppState<D>>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if state.db().bookmarks().delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { id: id.to_string() })
    }
}
