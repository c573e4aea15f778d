use crate::extract::text::{clean_text, collect_text, is_excluded};
use scraper::{Html, Selector};
use serde::Serialize;

/// Content-area selectors, highest priority first
pub const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".post",
    ".entry",
    ".main-content",
    "#content",
    "#main",
];

/// Title and readable text of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedContent {
    /// Cleaned `<title>` text, empty if absent
    pub title: String,

    /// Cleaned main-content text, empty if nothing readable was found
    pub content: String,
}

impl ExtractedContent {
    /// True when there is no content text worth storing
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Extracts the title and main text from an HTML document
///
/// # Extraction Rules
///
/// 1. `script`, `style`, `nav`, `footer`, `header`, `noscript` and
///    `template` subtrees are ignored everywhere
/// 2. The title is the first `<title>` element, cleaned
/// 3. The content is the text of the first element matched by
///    [`CONTENT_SELECTORS`], tried in order; the first selector with a
///    match wins
/// 4. If nothing matched, or the match holds only whitespace, the `<body>`
///    text is used, then the whole document's text
/// 5. Both fields pass through [`clean_text`]
///
/// Never fails. Garbage in gives an empty [`ExtractedContent`], which the
/// caller treats as "no content".
///
/// # Example
///
/// ```
/// use sumi_harvest::extract_content;
///
/// let html = r#"<html><head><title>Hi</title></head>
///     <body><nav>Menu</nav><main><p>Hello world</p></main></body></html>"#;
/// let extracted = extract_content(html);
/// assert_eq!(extracted.title, "Hi");
/// assert_eq!(extracted.content, "Hello world");
/// ```
pub fn extract_content(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = extract_title(&document);

    let mut raw = select_content_area(&document).unwrap_or_default();

    if raw.trim().is_empty() {
        raw = match Selector::parse("body")
            .ok()
            .and_then(|s| document.select(&s).next())
        {
            Some(body) => collect_text(body),
            None => collect_text(document.root_element()),
        };
    }

    ExtractedContent {
        title,
        content: clean_text(&raw),
    }
}

/// Extracts and cleans the first `<title>`
fn extract_title(document: &Html) -> String {
    let title_selector = match Selector::parse("title") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| clean_text(&element.text().collect::<String>()))
        .unwrap_or_default()
}

/// Text of the first content-area match, if any selector matches
fn select_content_area(document: &Html) -> Option<String> {
    for selector in CONTENT_SELECTORS {
        let parsed = match Selector::parse(selector) {
            Ok(s) => s,
            Err(_) => continue,
        };

        if let Some(element) = document.select(&parsed).find(|e| !is_excluded(e)) {
            tracing::trace!("Content area matched by {:?}", selector);
            return Some(collect_text(element));
        }
    }
    None
}
