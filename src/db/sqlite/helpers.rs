//! Query construction for filtered bookmark listings.
//!
//! Every user-supplied value becomes a `?` placeholder with a matching
//! text bind. Identifiers in ORDER BY come only from
//! [`SortField::column`] and [`SortOrder::keyword`].

use crate::db::{DbError, DbResult};
use crate::normalize::{FilterSpec, SortField, SortOrder};

/// Column list shared by every bookmark SELECT, in row-mapping order.
pub(crate) const BOOKMARK_COLUMNS: &str =
    "id, url, title, tags, notes, status, created_at, updated_at";

/// A parameterized filtered listing.
///
/// `binds` belong to the shared WHERE clause and apply to both statements;
/// `sql` additionally takes `limit` and `offset` as its last two parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredQuery {
    pub sql: String,
    pub count_sql: String,
    pub binds: Vec<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Escape LIKE metacharacters so the term matches literally under
/// `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Build the WHERE clause (empty when unfiltered) and its bind values.
///
/// Clauses are AND'd in a fixed order: search, status, tag.
pub fn build_where_clause(filter: &FilterSpec) -> (String, Vec<String>) {
    let mut conditions: Vec<&str> = vec![];
    let mut binds: Vec<String> = vec![];

    if let Some(term) = filter.search() {
        conditions.push(
            "(url LIKE ? ESCAPE '\\' OR title LIKE ? ESCAPE '\\' \
             OR tags LIKE ? ESCAPE '\\' OR notes LIKE ? ESCAPE '\\')",
        );
        let pattern = contains_pattern(term);
        binds.extend(std::iter::repeat_n(pattern, 4));
    }

    if let Some(status) = filter.status() {
        conditions.push("status = ?");
        binds.push(status.as_str().to_string());
    }

    if let Some(tag) = filter.tag() {
        conditions.push("tags LIKE ? ESCAPE '\\'");
        binds.push(contains_pattern(tag));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (clause, binds)
}

/// Build the ORDER BY clause. `id` follows the primary key in the same
/// direction so ties come back in a stable order.
pub fn build_order_clause(sort: SortField, order: SortOrder) -> String {
    let direction = order.keyword();
    format!("ORDER BY {} {}, id {}", sort.column(), direction, direction)
}

/// Assemble the filtered SELECT and its COUNT companion.
pub fn build_filtered_query(filter: &FilterSpec) -> FilteredQuery {
    let (where_clause, binds) = build_where_clause(filter);
    let order_clause = build_order_clause(filter.sort(), filter.order());

    let sql = format!(
        "SELECT {} FROM bookmark {} {} LIMIT ? OFFSET ?",
        BOOKMARK_COLUMNS, where_clause, order_clause
    );
    let count_sql = format!("SELECT COUNT(*) FROM bookmark {}", where_clause);

    FilteredQuery {
        sql,
        count_sql,
        binds,
        limit: i64::from(filter.page().limit()),
        offset: filter.page().offset(),
    }
}

pub(crate) fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

pub(crate) fn corrupt_row(e: sqlx::Error) -> DbError {
    DbError::CorruptRow {
        message: e.to_string(),
    }
}

/// Convert a stored count to `usize`, rejecting negatives.
pub(crate) fn count_to_usize(count: i64) -> DbResult<usize> {
    usize::try_from(count).map_err(|_| DbError::CorruptRow {
        message: format!("negative row count: {}", count),
    })
}
