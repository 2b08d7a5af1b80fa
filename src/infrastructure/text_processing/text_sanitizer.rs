use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").expect("valid hyphenation pattern")
});

static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{200B}-\u{200D}\u{2060}\u{FEFF}\u{00AD}]").expect("valid invisible pattern")
});

/// Normalizes page text before it reaches the model.
///
/// NFKC-normalizes, drops zero-width characters, re-joins words hyphenated
/// across line breaks, collapses runs of whitespace inside lines and keeps
/// paragraph breaks as a single blank line.
pub fn sanitize_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let visible = INVISIBLE.replace_all(&normalized, "");
    let joined = HYPHEN_LINE_BREAK.replace_all(&visible, "$head$tail");

    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in joined.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(collapsed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
