use crate::cli::api_client::ApiClient;
use crate::cli::commands::PageParams;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub tags: String,
    pub notes: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBookmarkRequest {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields to change on an existing bookmark. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct BookmarkChanges {
    pub url: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

impl BookmarkChanges {
    fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.tags.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }

    /// Full replacement body built from the current bookmark plus changes.
    fn merge_into(self, current: Bookmark) -> UpdateBookmarkRequest {
        UpdateBookmarkRequest {
            url: self.url.unwrap_or(current.url),
            title: self.title.unwrap_or(current.title),
            tags: self.tags.unwrap_or(current.tags),
            notes: self.notes.unwrap_or(current.notes),
            status: self.status.unwrap_or(current.status),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateBookmarkRequest {
    url: String,
    title: String,
    tags: String,
    notes: String,
    status: String,
}

#[derive(Debug, Serialize)]
struct UpdateStatusRequest<'a> {
    status: &'a str,
}

/// Filters for the list command
#[derive(Debug, Default)]
pub struct ListFilter<'a> {
    pub q: Option<&'a str>,
    pub status: Option<&'a str>,
    pub tag: Option<&'a str>,
}

#[derive(Tabled)]
pub(crate) struct BookmarkDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "URL")]
    pub(crate) url: String,
    #[tabled(rename = "Tags")]
    pub(crate) tags: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
}

impl From<&Bookmark> for BookmarkDisplay {
    fn from(b: &Bookmark) -> Self {
        Self {
            id: b.id,
            title: truncate_with_ellipsis(&b.title, 50),
            url: truncate_with_ellipsis(&b.url, 60),
            tags: or_dash(&b.tags),
            status: b.status.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BookmarkListResponse {
    items: Vec<Bookmark>,
    total: usize,
    limit: u32,
    offset: i64,
}

fn bookmark_path(id: i64) -> String {
    format!("/api/v1/bookmarks/{}", id)
}

/// List bookmarks with optional filtering
pub async fn list_bookmarks(
    api_client: &ApiClient,
    filter: ListFilter<'_>,
    page: PageParams<'_>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/bookmarks");

    if let Some(q) = filter.q {
        request = request.query(&[("q", q)]);
    }
    if let Some(s) = filter.status {
        request = request.query(&[("status", s)]);
    }
    if let Some(t) = filter.tag {
        request = request.query(&[("tag", t)]);
    }
    if let Some(l) = page.limit {
        request = request.query(&[("limit", l.to_string())]);
    }
    if let Some(o) = page.offset {
        request = request.query(&[("offset", o.to_string())]);
    }
    if let Some(s) = page.sort {
        request = request.query(&[("sort", s)]);
    }
    if let Some(ord) = page.order {
        request = request.query(&[("order", ord)]);
    }

    let response: BookmarkListResponse =
        ApiClient::handle_response(request.send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&response)?),
        _ => {
            let mut output = format_table(&response.items);
            if !response.items.is_empty() {
                output.push_str(&format!(
                    "\nShowing {} of {} (offset {})",
                    response.items.len(),
                    response.total,
                    response.offset
                ));
            }
            Ok(output)
        }
    }
}

pub(crate) fn format_table(bookmarks: &[Bookmark]) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks found.".to_string();
    }

    let rows: Vec<BookmarkDisplay> = bookmarks.iter().map(|b| b.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

pub(crate) fn format_detail(bookmark: &Bookmark) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["ID", &bookmark.id.to_string()]);
    builder.push_record(["URL", &bookmark.url]);
    builder.push_record(["Title", &bookmark.title]);
    builder.push_record(["Tags", &or_dash(&bookmark.tags)]);
    builder.push_record(["Notes", &or_dash(&truncate_with_ellipsis(&bookmark.notes, 200))]);
    builder.push_record(["Status", &bookmark.status]);
    builder.push_record(["Created", &bookmark.created_at]);
    builder.push_record(["Updated", &bookmark.updated_at]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

async fn fetch_bookmark(api_client: &ApiClient, id: i64) -> CliResult<Bookmark> {
    let response = api_client.get(&bookmark_path(id)).send().await?;
    ApiClient::handle_response(response).await
}

/// Get a single bookmark by ID
pub async fn get_bookmark(api_client: &ApiClient, id: i64, format: &str) -> CliResult<String> {
    let bookmark = fetch_bookmark(api_client, id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&bookmark)?),
        _ => Ok(format_detail(&bookmark)),
    }
}

/// Create a new bookmark
pub async fn create_bookmark(
    api_client: &ApiClient,
    request: CreateBookmarkRequest,
) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/bookmarks")
        .json(&request)
        .send()
        .await?;

    let bookmark: Bookmark = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Created bookmark: {} ({})",
        bookmark.title, bookmark.id
    ))
}

/// Update a bookmark: fetch it, apply the changes, send the full record back.
///
/// The fetch and the write are separate requests; a concurrent writer in
/// between is overwritten.
pub async fn update_bookmark(
    api_client: &ApiClient,
    id: i64,
    changes: BookmarkChanges,
) -> CliResult<String> {
    if changes.is_empty() {
        return Err(CliError::InvalidArgument {
            message: "nothing to update; pass at least one of --url, --title, --tags, --notes, --status".to_string(),
        });
    }

    let current = fetch_bookmark(api_client, id).await?;
    let request = changes.merge_into(current);

    let response = api_client
        .put(&bookmark_path(id))
        .json(&request)
        .send()
        .await?;

    let bookmark: Bookmark = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Updated bookmark: {} ({})",
        bookmark.title, bookmark.id
    ))
}

/// Change only the status of a bookmark
pub async fn set_status(api_client: &ApiClient, id: i64, status: &str) -> CliResult<String> {
    let response = api_client
        .patch(&format!("{}/status", bookmark_path(id)))
        .json(&UpdateStatusRequest { status })
        .send()
        .await?;

    let bookmark: Bookmark = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Bookmark {} is now {}",
        bookmark.id, bookmark.status
    ))
}

/// Delete a bookmark
pub async fn delete_bookmark(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client.delete(&bookmark_path(id)).send().await?;

    // For delete, we expect no body on success
    ApiClient::handle_empty(response).await?;
    Ok(format!("✓ Deleted bookmark: {}", id))
}
