//! HTML parser for extracting links to follow
//!
//! Only `<a href>` anchors are considered. Every href is resolved against
//! the page's final URL and canonicalized before it is returned, so the
//! crawler compares like with like when it checks the visited set.

use crate::url::canonicalize_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Prefixes of hrefs that never address a fetchable document
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, including nav, header
///   and footer (boilerplate is only excluded from *content*)
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - Empty hrefs and fragment-only hrefs (`#section`)
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Anything that does not canonicalize to an HTTP(S) URL with a host
///
/// **Note:** `rel="nofollow"` links ARE followed
///
/// Links come back in document order with duplicates removed; the first
/// occurrence wins. Malformed markup never fails, it just yields fewer
/// links.
///
/// # Example
///
/// ```
/// use sumi_harvest::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                if seen.insert(absolute_url.as_str().to_string()) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to a canonical absolute URL
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return None;
    }

    match canonicalize_url(href, base_url) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("Dropping link {:?}: {}", href, e);
            None
        }
    }
}
