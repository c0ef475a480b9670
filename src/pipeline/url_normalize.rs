//! URL normalisation for candidate deduplication.
//!
//! Two candidates are the same article when their URLs agree on
//! scheme + host + path. Query strings, fragments, default ports, and
//! trailing slashes are ignored so that syndicated links compare equal.

use url::Url;

/// Normalise a URL for deduplication comparison.
///
/// 1. Lowercase scheme and host (via the parser).
/// 2. Remove the fragment.
/// 3. Drop the query string entirely — identity is query-insensitive.
/// 4. Remove default ports (`:80` for HTTP, `:443` for HTTPS).
/// 5. Remove the trailing slash from the path (unless path is `"/"`).
///
/// Unparseable input is returned with only the trailing slash trimmed,
/// so malformed URLs still dedup against byte-equal copies.
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.trim_end_matches('/').to_string();
    };

    parsed.set_fragment(None);
    parsed.set_query(None);
    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(&path[..path.len() - 1]);
    }

    parsed.to_string()
}

/// Returns `true` if the URL uses the default port for its scheme.
fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
