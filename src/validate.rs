//! Input validation.
//!
//! Only two rules exist: nothing may be empty, and URL-typed content must be an
//! absolute `http`/`https` URL. The Wi-Fi, e-mail and phone placeholders are
//! suggestions, not grammars, so anything non-empty passes for those types.

use url::Url;

use crate::content::ContentType;
use crate::error::{UrlIssue, ValidationError};

/// Checks `value` against the rules for `content_type`.
///
/// Whitespace-only input counts as empty. The URL check runs on the value as
/// typed; the caller trims it before encoding.
///
/// # Example
///
/// ```
/// use qrforma::{validate, ContentType, ValidationError};
///
/// assert!(validate("https://example.com", ContentType::Url).is_ok());
/// assert_eq!(validate("  ", ContentType::Text), Err(ValidationError::EmptyInput));
/// ```
pub fn validate(value: &str, content_type: ContentType) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if content_type.descriptor().requires_url {
        let url = Url::parse(value).map_err(|_| ValidationError::InvalidUrl(UrlIssue::Malformed))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::InvalidUrl(UrlIssue::UnsupportedScheme(
                    other.to_string(),
                )))
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected_for_every_type() {
        for t in ContentType::ALL {
            assert_eq!(validate("", t), Err(ValidationError::EmptyInput));
            assert_eq!(validate("   ", t), Err(ValidationError::EmptyInput));
            assert_eq!(validate("\n\t", t), Err(ValidationError::EmptyInput));
        }
    }

    #[test]
    fn test_non_url_types_accept_anything() {
        let samples = ["hello", "not a url", "ftp://example.com", "WIFI:;;", "x", "  padded  "];
        for t in ContentType::ALL.into_iter().filter(|t| *t != ContentType::Url) {
            for s in samples {
                assert_eq!(validate(s, t), Ok(()), "{t}: {s:?}");
            }
        }
    }

    #[test]
    fn test_url_accepts_http_and_https() {
        assert_eq!(validate("https://example.com", ContentType::Url), Ok(()));
        assert_eq!(validate("http://example.com/path?q=1#frag", ContentType::Url), Ok(()));
        assert_eq!(validate("HTTPS://EXAMPLE.COM", ContentType::Url), Ok(()));
    }

    #[test]
    fn test_url_rejects_other_schemes() {
        assert_eq!(
            validate("ftp://example.com", ContentType::Url),
            Err(ValidationError::InvalidUrl(UrlIssue::UnsupportedScheme("ftp".into())))
        );
        assert!(matches!(
            validate("mailto:someone@example.com", ContentType::Url),
            Err(ValidationError::InvalidUrl(UrlIssue::UnsupportedScheme(_)))
        ));
    }

    #[test]
    fn test_url_rejects_garbage() {
        assert_eq!(
            validate("not a url", ContentType::Url),
            Err(ValidationError::InvalidUrl(UrlIssue::Malformed))
        );
        assert_eq!(
            validate("example.com", ContentType::Url),
            Err(ValidationError::InvalidUrl(UrlIssue::Malformed))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "content cannot be empty");
        assert_eq!(
            validate("ftp://x", ContentType::Url).unwrap_err().to_string(),
            "URLs must start with http:// or https://"
        );
        assert!(validate("nope", ContentType::Url)
            .unwrap_err()
            .to_string()
            .starts_with("please enter a valid URL"));
    }
}
