use crate::UrlError;
use url::Url;

/// Schemes the fetcher can retrieve
const FETCHABLE_SCHEMES: &[&str] = &["http", "https"];

/// Canonicalizes a possibly-relative reference against a base URL
///
/// # Canonicalization Steps
///
/// 1. Resolve `href` against `base` using standard reference resolution
///    (absolute references ignore the base)
/// 2. Require an HTTP(S) scheme
/// 3. Require a non-empty host (network location)
/// 4. Drop the fragment; it never addresses a different document
///
/// Nothing else is rewritten: case in the path, query order and trailing
/// slashes are significant to origin servers and are kept as-is.
///
/// # Returns
///
/// * `Ok(Url)` - The canonical absolute URL
/// * `Err(UrlError)` - The reference cannot enter the frontier or the store
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_harvest::url::canonicalize_url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let url = canonicalize_url("../about#team", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn canonicalize_url(href: &str, base: &Url) -> Result<Url, UrlError> {
    let url = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;
    finish(url)
}

/// Parses and canonicalizes an absolute URL, such as a seed
///
/// # Examples
///
/// ```
/// use sumi_harvest::url::parse_absolute_url;
///
/// assert!(parse_absolute_url("https://example.com").is_ok());
/// assert!(parse_absolute_url("not-a-url").is_err());
/// ```
pub fn parse_absolute_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;
    finish(url)
}

fn finish(mut url: Url) -> Result<Url, UrlError> {
    if !FETCHABLE_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingHost(url.to_string())),
    }

    url.set_fragment(None);
    Ok(url)
}
