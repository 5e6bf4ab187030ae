//! Tests for SqliteBookmarkRepository.

use std::time::Duration;

use crate::db::{
    BookmarkFields, BookmarkInput, BookmarkRepository, BookmarkStatus, Database, DbError,
    SqliteDatabase,
};
use crate::normalize::{FilterParams, FilterSpec};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_fields(url: &str, title: &str, tags: &str, notes: &str) -> BookmarkFields {
    let input = BookmarkInput {
        url: Some(url.to_string()),
        title: Some(title.to_string()),
        tags: Some(tags.to_string()),
        notes: Some(notes.to_string()),
    };
    BookmarkFields::parse(&input, BookmarkStatus::Inbox).expect("fields should be valid")
}

fn filter(params: FilterParams) -> FilterSpec {
    FilterSpec::parse(&params).expect("filter should be valid")
}

fn titles<'a>(items: impl IntoIterator<Item = &'a crate::db::Bookmark>) -> Vec<String> {
    items.into_iter().map(|b| b.title().to_string()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_create_and_get() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let fields = make_fields("example.com/a", "Example", "rust  web", "line one\nline two");
    let created = repo.create(&fields).await.expect("Create should succeed");

    assert!(created.id() > 0);
    assert_eq!(created.url(), "https://example.com/a");
    assert_eq!(created.tags(), "rust web");
    assert_eq!(created.status(), BookmarkStatus::Inbox);
    assert_eq!(created.created_at(), created.updated_at());

    let retrieved = repo.get(created.id()).await.expect("Get should succeed");
    assert_eq!(retrieved, created);
    assert_eq!(retrieved.notes(), "line one\nline two");
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_ids_are_sequential() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let first = repo
        .create(&make_fields("a.com", "A", "", ""))
        .await
        .unwrap();
    let second = repo
        .create(&make_fields("b.com", "B", "", ""))
        .await
        .unwrap();

    assert!(second.id() > first.id());
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_get_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.bookmarks().get(999).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_list_newest_first() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    assert!(repo.list().await.unwrap().is_empty());

    repo.create(&make_fields("a.com", "First", "", ""))
        .await
        .unwrap();
    repo.create(&make_fields("b.com", "Second", "", ""))
        .await
        .unwrap();

    let all = repo.list().await.expect("List should succeed");
    assert_eq!(titles(&all), vec!["Second", "First"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_update_refreshes_updated_at() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let created = repo
        .create(&make_fields("example.com", "Old", "", ""))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let changed = created.with_fields(make_fields("example.com/new", "New", "tag", ""));
    let updated = repo.update(&changed).await.expect("Update should succeed");

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() > created.updated_at());
    assert_eq!(updated.title(), "New");

    let stored = repo.get(created.id()).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_status_change_preserves_content() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let created = repo
        .create(&make_fields("example.com", "Keep", "a b", "n"))
        .await
        .unwrap();

    let done = repo
        .update(&created.with_status(BookmarkStatus::Done))
        .await
        .unwrap();
    assert_eq!(done.status(), BookmarkStatus::Done);
    assert_eq!(done.title(), "Keep");
    assert_eq!(done.tags(), "a b");

    let back = repo
        .update(&done.with_status(BookmarkStatus::Inbox))
        .await
        .unwrap();
    assert_eq!(back.status(), BookmarkStatus::Inbox);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_update_missing_reports_no_rows() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let created = repo
        .create(&make_fields("example.com", "Gone", "", ""))
        .await
        .unwrap();
    assert!(repo.delete(created.id()).await.unwrap());

    let result = repo.update(&created).await;
    assert!(matches!(
        result,
        Err(DbError::NoRowsAffected {
            operation: "update",
            ..
        })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_update_last_writer_wins() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let created = repo
        .create(&make_fields("example.com", "Original", "", ""))
        .await
        .unwrap();

    // Two callers read the same row, then write in turn.
    let first = repo.get(created.id()).await.unwrap();
    let second = repo.get(created.id()).await.unwrap();

    repo.update(&first.with_fields(make_fields("example.com", "Renamed", "", "")))
        .await
        .unwrap();
    repo.update(&second.with_status(BookmarkStatus::Done))
        .await
        .unwrap();

    let stored = repo.get(created.id()).await.unwrap();
    assert_eq!(stored.title(), "Original");
    assert_eq!(stored.status(), BookmarkStatus::Done);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_delete() {
    let db = setup_db().await;
    let repo = db.bookmarks();

    let created = repo
        .create(&make_fields("example.com", "Delete me", "", ""))
        .await
        .unwrap();

    assert!(repo.delete(created.id()).await.expect("Delete should succeed"));
    assert!(!repo.delete(created.id()).await.unwrap());
    assert!(matches!(
        repo.get(created.id()).await,
        Err(DbError::NotFound { .. })
    ));
}

async fn seed(db: &SqliteDatabase) {
    let repo = db.bookmarks();
    let rows = [
        ("rust-lang.org", "Rust", "lang rust", "", BookmarkStatus::Done),
        ("docs.rs", "Docs", "rust docs", "crate docs", BookmarkStatus::Inbox),
        ("example.com/foo", "Example", "misc", "", BookmarkStatus::Inbox),
        ("news.com", "News", "daily", "mentions foo", BookmarkStatus::Done),
        ("percent.com", "Half 50% off", "sale", "", BookmarkStatus::Inbox),
    ];
    for (url, title, tags, notes, status) in rows {
        let fields = make_fields(url, title, tags, notes).with_status(status);
        repo.create(&fields).await.unwrap();
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_list_filtered_defaults() {
    let db = setup_db().await;
    seed(&db).await;

    let result = db
        .bookmarks()
        .list_filtered(&FilterSpec::default())
        .await
        .expect("List should succeed");

    assert_eq!(result.total, 5);
    assert_eq!(result.limit, 100);
    assert_eq!(result.offset, 0);
    assert_eq!(
        titles(&result.items),
        vec!["Rust", "Docs", "Example", "News", "Half 50% off"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_search_matches_any_text_field() {
    let db = setup_db().await;
    seed(&db).await;

    let result = db
        .bookmarks()
        .list_filtered(&filter(FilterParams {
            q: Some("foo".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

    // url match and notes match
    assert_eq!(titles(&result.items), vec!["Example", "News"]);
    assert_eq!(result.total, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_filters_are_conjunctive() {
    let db = setup_db().await;
    seed(&db).await;
    let repo = db.bookmarks();

    let result = repo
        .list_filtered(&filter(FilterParams {
            q: Some("rust".to_string()),
            status: Some("inbox".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(titles(&result.items), vec!["Docs"]);

    let result = repo
        .list_filtered(&filter(FilterParams {
            status: Some("DONE".to_string()),
            tag: Some("lang".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(titles(&result.items), vec!["Rust"]);

    let result = repo
        .list_filtered(&filter(FilterParams {
            q: Some("foo".to_string()),
            tag: Some("rust".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_search_treats_wildcards_literally() {
    let db = setup_db().await;
    seed(&db).await;
    let repo = db.bookmarks();

    let result = repo
        .list_filtered(&filter(FilterParams {
            q: Some("50%".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(titles(&result.items), vec!["Half 50% off"]);

    let result = repo
        .list_filtered(&filter(FilterParams {
            q: Some("%".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(result.total, 1);

    let result = repo
        .list_filtered(&filter(FilterParams {
            q: Some("_".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_sort_and_paginate() {
    let db = setup_db().await;
    seed(&db).await;
    let repo = db.bookmarks();

    let result = repo
        .list_filtered(&filter(FilterParams {
            sort: Some("title".to_string()),
            order: Some("desc".to_string()),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(titles(&result.items), vec!["News", "Half 50% off"]);
    assert_eq!(result.total, 5);
    assert_eq!(result.limit, 2);
    assert_eq!(result.offset, 1);

    let result = repo
        .list_filtered(&filter(FilterParams {
            sort: Some("created_at".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(
        titles(&result.items),
        vec!["Half 50% off", "News", "Example", "Docs", "Rust"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_offset_past_end_keeps_total() {
    let db = setup_db().await;
    seed(&db).await;

    let result = db
        .bookmarks()
        .list_filtered(&filter(FilterParams {
            offset: Some(50),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn bookmark_sort_by_updated_at() {
    let db = setup_db().await;
    seed(&db).await;
    let repo = db.bookmarks();

    let oldest = repo.list().await.unwrap().pop().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    repo.update(&oldest.with_status(BookmarkStatus::Inbox))
        .await
        .unwrap();

    let result = repo
        .list_filtered(&filter(FilterParams {
            sort: Some("UPDATED_AT".to_string()),
            order: Some("DESC".to_string()),
            limit: Some(1),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert_eq!(titles(&result.items), vec![oldest.title().to_string()]);
}
