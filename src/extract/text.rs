//! Text collection and cleanup

use scraper::ElementRef;

/// Elements whose text is never part of the content
pub(crate) const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "noscript", "template",
];

/// Punctuation that survives cleaning
const KEPT_PUNCTUATION: &[char] = &['.', ',', '!', '?', '-', ':'];

/// Returns true if this element or one of its ancestors is excluded
pub(crate) fn is_excluded(element: &ElementRef<'_>) -> bool {
    if EXCLUDED_TAGS.contains(&element.value().name()) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| EXCLUDED_TAGS.contains(&a.value().name()))
}

/// Elements that start a new run of text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "dl", "dt", "dd", "h1", "h2", "h3", "h4", "h5", "h6", "br",
    "hr", "table", "tr", "td", "th", "section", "article", "aside", "main", "blockquote", "pre",
    "figure", "figcaption",
];

/// Collects the text under `element`, skipping excluded subtrees
///
/// Text nodes are concatenated as they appear, so a word split by inline
/// markup (`<em>Un</em>believable`) stays whole. A space is inserted around
/// block elements and in place of excluded subtrees. Whitespace is left for
/// [`clean_text`] to collapse. Traversal uses an explicit stack so deeply
/// nested markup cannot overflow the call stack.
pub(crate) fn collect_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    // `None` marks the end of a block element
    let mut stack: Vec<Option<_>> = element.children().rev().map(Some).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            Some(node) => node,
            None => {
                text.push(' ');
                continue;
            }
        };

        if let Some(fragment) = node.value().as_text() {
            text.push_str(fragment);
        } else if let Some(child) = ElementRef::wrap(node) {
            let name = child.value().name();
            if EXCLUDED_TAGS.contains(&name) {
                text.push(' ');
                continue;
            }
            if BLOCK_TAGS.contains(&name) {
                text.push(' ');
                stack.push(None);
            }
            stack.extend(child.children().rev().map(Some));
        }
    }

    text
}

/// Normalizes extracted text
///
/// Drops every character that is not a word character, whitespace or one
/// of `. , ! ? - :`, then collapses whitespace runs to a single space and
/// trims. Lossy on purpose: quotes, brackets and symbols are removed.
///
/// # Example
///
/// ```
/// use sumi_harvest::extract::clean_text;
///
/// assert_eq!(clean_text("  Hello,   <world>!  "), "Hello, world!");
/// ```
pub fn clean_text(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || *c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(c)
        })
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
