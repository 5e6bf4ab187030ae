//! SQLite BookmarkRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::helpers::{
    BOOKMARK_COLUMNS, build_filtered_query, corrupt_row, count_to_usize, database_error,
};
use crate::db::utils::{current_timestamp, format_timestamp, parse_timestamp};
use crate::db::{
    Bookmark, BookmarkFields, BookmarkRepository, BookmarkStatus, DbError, DbResult, ListResult,
};
use crate::normalize::FilterSpec;

/// SQLx-backed bookmark repository.
pub struct SqliteBookmarkRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_bookmark(row: &SqliteRow) -> DbResult<Bookmark> {
    let status: String = row.try_get("status").map_err(corrupt_row)?;
    let status: BookmarkStatus = status.parse().map_err(|_| DbError::CorruptRow {
        message: format!("invalid status '{}'", status),
    })?;

    let created_at: String = row.try_get("created_at").map_err(corrupt_row)?;
    let updated_at: String = row.try_get("updated_at").map_err(corrupt_row)?;

    let fields = BookmarkFields::from_stored(
        row.try_get("url").map_err(corrupt_row)?,
        row.try_get("title").map_err(corrupt_row)?,
        row.try_get("tags").map_err(corrupt_row)?,
        row.try_get("notes").map_err(corrupt_row)?,
        status,
    );

    Ok(Bookmark::from_parts(
        row.try_get("id").map_err(corrupt_row)?,
        fields,
        parse_timestamp(&created_at)?,
        parse_timestamp(&updated_at)?,
    ))
}

impl<'a> BookmarkRepository for SqliteBookmarkRepository<'a> {
    async fn create(&self, fields: &BookmarkFields) -> DbResult<Bookmark> {
        let now = current_timestamp();
        let stamp = format_timestamp(&now);

        let result = sqlx::query(
            r#"
            INSERT INTO bookmark (url, title, tags, notes, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(fields.url())
        .bind(fields.title())
        .bind(fields.tags())
        .bind(fields.notes())
        .bind(fields.status().as_str())
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::Database {
                message: "Creating bookmark failed, no rows affected".to_string(),
            });
        }

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(DbError::Database {
                message: "Creating bookmark failed, no id obtained".to_string(),
            });
        }

        info!(id, "Created bookmark");
        Ok(Bookmark::from_parts(id, fields.clone(), now, now))
    }

    async fn get(&self, id: i64) -> DbResult<Bookmark> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bookmark WHERE id = ?",
            BOOKMARK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => row_to_bookmark(&row),
            None => Err(DbError::NotFound {
                entity_type: "Bookmark".to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn list(&self) -> DbResult<Vec<Bookmark>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bookmark ORDER BY created_at DESC, id DESC",
            BOOKMARK_COLUMNS
        ))
        .fetch_all(self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_bookmark).collect()
    }

    async fn list_filtered(&self, filter: &FilterSpec) -> DbResult<ListResult<Bookmark>> {
        let plan = build_filtered_query(filter);
        debug!(sql = %plan.sql, binds = plan.binds.len(), "Filtered bookmark query");

        // Get paginated results - predicate values first, then limit/offset
        let mut query = sqlx::query(&plan.sql);
        for value in &plan.binds {
            query = query.bind(value);
        }
        let rows = query
            .bind(plan.limit)
            .bind(plan.offset)
            .fetch_all(self.pool)
            .await
            .map_err(database_error)?;

        let items = rows
            .iter()
            .map(row_to_bookmark)
            .collect::<DbResult<Vec<_>>>()?;

        // Get total count with the same predicate values
        let mut count_query = sqlx::query_scalar::<_, i64>(&plan.count_sql);
        for value in &plan.binds {
            count_query = count_query.bind(value);
        }
        let total = count_query
            .fetch_one(self.pool)
            .await
            .map_err(database_error)?;

        Ok(ListResult {
            items,
            total: count_to_usize(total)?,
            limit: filter.page().limit(),
            offset: filter.page().offset(),
        })
    }

    async fn update(&self, bookmark: &Bookmark) -> DbResult<Bookmark> {
        let updated = bookmark.touched(current_timestamp());

        let result = sqlx::query(
            r#"
            UPDATE bookmark
            SET url = ?, title = ?, tags = ?, notes = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(updated.url())
        .bind(updated.title())
        .bind(updated.tags())
        .bind(updated.notes())
        .bind(updated.status().as_str())
        .bind(format_timestamp(&updated.updated_at()))
        .bind(updated.id())
        .execute(self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NoRowsAffected {
                operation: "update",
                id: bookmark.id().to_string(),
            });
        }

        info!(id = updated.id(), "Updated bookmark");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM bookmark WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(database_error)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(id, "Deleted bookmark");
        }
        Ok(deleted)
    }
}
