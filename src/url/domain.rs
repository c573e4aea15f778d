use url::Url;

/// Extracts the network location (domain) from a URL
///
/// The network location is the lowercase host followed by `:port` when the
/// URL carries a non-default port. Two URLs belong to the same crawl scope
/// only when their network locations are equal, so `example.com` and
/// `example.com:8080` are different domains, as are `example.com` and
/// `www.example.com`.
///
/// # Returns
///
/// * `Some(String)` - The network location
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_harvest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://test.org:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("test.org:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }

    // `port()` is None when the port is the scheme default
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns true when both URLs share a network location
pub fn same_domain(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
