//! Pre-compiled patterns for common string formats

use once_cell::sync::Lazy;
use regex::Regex;

/// Email pattern (RFC 5322 simplified) with `name` and `domain` groups
pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[a-zA-Z0-9._%+'-]+)@(?P<domain>[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})$").unwrap()
});

/// URL pattern (http/https/ftp with optional TLS)
pub(crate) static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:http|ftp)s?://(?P<host>[^\s/$.?#:]+(?:\.[^\s/$.?#:]+)*)(?::\d+)?(?:/?|[/?]\S+)$").unwrap()
});
