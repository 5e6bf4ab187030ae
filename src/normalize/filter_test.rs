//! Tests for filter, sort and pagination normalization.

use crate::db::BookmarkStatus;
use crate::normalize::*;

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn pagination_defaults_when_absent() {
    let page = validate_pagination(None, None).unwrap();
    assert_eq!(page.limit(), 100);
    assert_eq!(page.offset(), 0);
}

#[test]
fn pagination_rejects_non_positive_limit() {
    for limit in [0, -1, i64::MIN] {
        assert!(matches!(
            validate_pagination(Some(limit), None),
            Err(ValidationError::InvalidParameter { name: "limit", .. })
        ));
    }
}

#[test]
fn pagination_caps_limit() {
    assert_eq!(validate_pagination(Some(5000), None).unwrap().limit(), 1000);
    assert_eq!(validate_pagination(Some(1000), None).unwrap().limit(), 1000);
    assert_eq!(validate_pagination(Some(1), None).unwrap().limit(), 1);
}

#[test]
fn pagination_rejects_negative_offset() {
    assert!(matches!(
        validate_pagination(None, Some(-1)),
        Err(ValidationError::InvalidParameter { name: "offset", .. })
    ));
    assert_eq!(validate_pagination(None, Some(40)).unwrap().offset(), 40);
}

// =============================================================================
// Sort field and order (permissive)
// =============================================================================

#[test]
fn sort_field_matches_case_insensitively() {
    assert_eq!(validate_sort_field(Some("TITLE")), SortField::Title);
    assert_eq!(validate_sort_field(Some("Updated_At")), SortField::UpdatedAt);
    assert_eq!(validate_sort_field(Some("created_at")), SortField::CreatedAt);
}

#[test]
fn sort_field_falls_back_to_created_at() {
    assert_eq!(validate_sort_field(None), SortField::CreatedAt);
    assert_eq!(validate_sort_field(Some("url; DROP TABLE")), SortField::CreatedAt);
}

#[test]
fn sort_order_only_desc_is_descending() {
    assert_eq!(validate_sort_order(Some("DESC")), SortOrder::Desc);
    assert_eq!(validate_sort_order(Some("desc")), SortOrder::Desc);
    assert_eq!(validate_sort_order(Some("asc")), SortOrder::Asc);
    assert_eq!(validate_sort_order(Some("sideways")), SortOrder::Asc);
    assert_eq!(validate_sort_order(None), SortOrder::Asc);
}

#[test]
fn sort_tokens_match_exactly_without_trimming() {
    assert_eq!(validate_sort_order(Some(" desc ")), SortOrder::Asc);
    assert_eq!(validate_sort_field(Some(" title ")), SortField::CreatedAt);
}

#[test]
fn filter_spec_trims_sort_tokens_before_matching() {
    let spec = FilterSpec::parse(&FilterParams {
        sort: Some(" title ".to_string()),
        order: Some(" desc ".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(spec.sort(), SortField::Title);
    assert_eq!(spec.order(), SortOrder::Desc);
}

// =============================================================================
// FilterSpec (strict boundary)
// =============================================================================

#[test]
fn filter_spec_defaults() {
    let spec = FilterSpec::parse(&FilterParams::default()).unwrap();
    assert_eq!(spec.search(), None);
    assert_eq!(spec.status(), None);
    assert_eq!(spec.tag(), None);
    assert_eq!(spec.sort(), SortField::CreatedAt);
    assert_eq!(spec.order(), SortOrder::Asc);
    assert_eq!(spec.page().limit(), DEFAULT_LIMIT);
    assert_eq!(spec.page().offset(), 0);
    assert_eq!(spec, FilterSpec::default());
}

#[test]
fn filter_spec_treats_blank_text_as_absent() {
    let spec = FilterSpec::parse(&FilterParams {
        q: Some("  ".to_string()),
        status: Some("".to_string()),
        tag: Some(" ".to_string()),
        sort: Some("".to_string()),
        order: Some(" ".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(spec, FilterSpec::default());
}

#[test]
fn filter_spec_parses_all_fields() {
    let spec = FilterSpec::parse(&FilterParams {
        q: Some(" foo ".to_string()),
        status: Some("inbox".to_string()),
        tag: Some("x".to_string()),
        sort: Some("Title".to_string()),
        order: Some("DESC".to_string()),
        limit: Some(20),
        offset: Some(40),
    })
    .unwrap();
    assert_eq!(spec.search(), Some("foo"));
    assert_eq!(spec.status(), Some(BookmarkStatus::Inbox));
    assert_eq!(spec.tag(), Some("x"));
    assert_eq!(spec.sort(), SortField::Title);
    assert_eq!(spec.order(), SortOrder::Desc);
    assert_eq!(spec.page().limit(), 20);
    assert_eq!(spec.page().offset(), 40);
}

#[test]
fn filter_spec_rejects_unknown_status() {
    let err = FilterSpec::parse(&FilterParams {
        status: Some("archived".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidStatus { .. }));
}

#[test]
fn filter_spec_rejects_unknown_sort_and_order_tokens() {
    let err = FilterSpec::parse(&FilterParams {
        sort: Some("url".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidParameter { name: "sort", .. }
    ));

    let err = FilterSpec::parse(&FilterParams {
        order: Some("descending".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidParameter { name: "order", .. }
    ));
}

#[test]
fn filter_spec_propagates_pagination_errors() {
    assert!(
        FilterSpec::parse(&FilterParams {
            limit: Some(0),
            ..Default::default()
        })
        .is_err()
    );
    assert!(
        FilterSpec::parse(&FilterParams {
            offset: Some(-5),
            ..Default::default()
        })
        .is_err()
    );
}
