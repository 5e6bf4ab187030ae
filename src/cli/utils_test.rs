use crate::cli::utils::*;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    let result = truncate_with_ellipsis("hello", 10);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_exact_length() {
    let result = truncate_with_ellipsis("hello", 5);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("hello world this is a long string", 10);
    assert_eq!(result, "hello w...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    let result = truncate_with_ellipsis("hello 世界", 8);
    assert_eq!(result, "hello 世界");

    let result2 = truncate_with_ellipsis("hello 世界", 7);
    assert_eq!(result2, "hell...");
}

#[test]
fn test_truncate_with_tiny_max() {
    assert_eq!(truncate_with_ellipsis("abcdef", 2), "...");
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(""), "-");
    assert_eq!(or_dash("rust web"), "rust web");
}
