//! Paragraph segmentation and final assembly.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(h[1-6]|ul|ol|blockquote|pre|hr)").expect("valid regex"));

/// Split the rewritten document on blank lines and wrap whatever is still
/// untagged in paragraph markup. Segments that open with or contain a
/// block element pass through untouched; empty segments vanish.
pub(crate) fn assemble(html: &str) -> String {
    html.split("\n\n")
        .map(segment)
        .collect::<Vec<_>>()
        .join("\n")
}

fn segment(block: &str) -> String {
    const BLOCK_STARTS: [&str; 6] = ["<h", "<ul", "<ol", "<blockquote", "<pre", "<hr"];
    if BLOCK_STARTS.iter().any(|tag| block.starts_with(tag)) {
        return block.to_string();
    }

    let trimmed = block.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if BLOCK_TAG.is_match(trimmed) {
        return trimmed.to_string();
    }

    // Single newlines inside one paragraph are soft breaks.
    format!(
        "<p class=\"paragraph\">{}</p>",
        trimmed.replace('\n', "<br />")
    )
}
