//! Per-field normalizers for bookmark content.

use url::Url;

use super::ValidationError;

pub const TITLE_MAX_LENGTH: usize = 120;
pub const TAGS_MAX_LENGTH: usize = 200;
pub const NOTES_MAX_LENGTH: usize = 2000;

/// Trim and collapse every internal whitespace run to a single space.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the value starts with `scheme://`, where the scheme is
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Host section of a `scheme://` value as written, without userinfo or port.
fn written_host(value: &str) -> &str {
    let rest = value.split_once("://").map_or("", |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if host_port.starts_with('[') {
        return host_port.find(']').map_or(host_port, |end| &host_port[..=end]);
    }
    host_port.split(':').next().unwrap_or_default()
}

/// Normalize a URL into its canonical stored form.
///
/// Values without a `scheme://` prefix get leading slashes stripped and
/// `https://` prepended. The result must parse, use `http` or `https`, and
/// carry a non-empty host.
pub fn normalize_url(raw: Option<&str>) -> Result<String, ValidationError> {
    let collapsed = collapse_whitespace(raw.unwrap_or_default());
    if collapsed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let candidate = if has_scheme(&collapsed) {
        collapsed
    } else {
        format!("https://{}", collapsed.trim_start_matches('/'))
    };

    // Url::parse percent-encodes spaces in paths; a URI may not contain them.
    if candidate.contains(' ') {
        return Err(ValidationError::InvalidUrl {
            message: "URL must not contain whitespace".to_string(),
        });
    }

    // Url::parse reads '\' as '/' and skips empty authorities; the stored
    // string itself must name the host.
    if candidate.contains('\\') {
        return Err(ValidationError::InvalidUrl {
            message: "URL must not contain backslashes".to_string(),
        });
    }
    if written_host(&candidate).is_empty() {
        return Err(ValidationError::InvalidUrl {
            message: "URL must contain a valid host".to_string(),
        });
    }

    let parsed = Url::parse(&candidate).map_err(|e| ValidationError::InvalidUrl {
        message: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl {
                message: format!("URL must use HTTP or HTTPS protocol, got: {}", other),
            });
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidUrl {
            message: "URL must contain a valid host".to_string(),
        });
    }

    Ok(candidate)
}

/// Normalize a title: trimmed, whitespace collapsed, 1 to 120 characters.
pub fn normalize_title(raw: Option<&str>) -> Result<String, ValidationError> {
    let normalized = collapse_whitespace(raw.unwrap_or_default());
    if normalized.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let actual = normalized.chars().count();
    if actual > TITLE_MAX_LENGTH {
        return Err(ValidationError::TitleTooLong {
            max: TITLE_MAX_LENGTH,
            actual,
        });
    }

    Ok(normalized)
}

/// Normalize the free-text tags string. Absent tags become an empty string.
pub fn normalize_tags(raw: Option<&str>) -> Result<String, ValidationError> {
    let Some(raw) = raw else {
        return Ok(String::new());
    };

    let normalized = collapse_whitespace(raw);
    let actual = normalized.chars().count();
    if actual > TAGS_MAX_LENGTH {
        return Err(ValidationError::TagsTooLong {
            max: TAGS_MAX_LENGTH,
            actual,
        });
    }

    Ok(normalized)
}

/// Normalize notes. Only the ends are trimmed; line breaks and inner spacing
/// are kept.
pub fn normalize_notes(raw: Option<&str>) -> Result<String, ValidationError> {
    let Some(raw) = raw else {
        return Ok(String::new());
    };

    let normalized = raw.trim();
    let actual = normalized.chars().count();
    if actual > NOTES_MAX_LENGTH {
        return Err(ValidationError::NotesTooLong {
            max: NOTES_MAX_LENGTH,
            actual,
        });
    }

    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t\n b  "), "a b");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("git+ssh://host/repo"));
        assert!(!has_scheme("example.com/a"));
        assert!(!has_scheme("1http://example.com"));
        assert!(!has_scheme("://example.com"));
    }

    #[test]
    fn test_written_host() {
        assert_eq!(written_host("https://example.com/a"), "example.com");
        assert_eq!(written_host("https://user:pw@example.com:8080/a"), "example.com");
        assert_eq!(written_host("http://[::1]:80/"), "[::1]");
        assert_eq!(written_host("https:///example.com/a"), "");
        assert_eq!(written_host("https://:443/a"), "");
        assert_eq!(written_host("https://?q=1"), "");
    }
}
