use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Line-start "Clause|Section|Article <digits>" with an optional ':' or '.'
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^(?:clause|section|article)\s+\d+[:.]?").expect("heading pattern is valid")
});

/// A heading-delimited segment of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Matched heading text, e.g. `"Section 3:"`
    pub heading: String,
    /// Text between this heading and the next one, trimmed
    pub body: String,
    /// Byte range of the raw clause (heading included) in the source text
    pub span: Range<usize>,
}

/// Split `text` into clauses in document order.
///
/// Text before the first heading is dropped. No heading yields an empty vec,
/// which callers treat as "nothing to analyze" rather than an error.
pub fn split_clauses(text: &str) -> Vec<Clause> {
    let headings: Vec<_> = HEADING_RE.find_iter(text).collect();

    headings
        .iter()
        .enumerate()
        .map(|(idx, heading)| {
            let end = headings
                .get(idx + 1)
                .map(|next| next.start())
                .unwrap_or(text.len());

            Clause {
                heading: heading.as_str().to_string(),
                body: text[heading.end()..end].trim().to_string(),
                span: heading.start()..end,
            }
        })
        .collect()
}
