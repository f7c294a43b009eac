//! The ordered rewrite rules.
//!
//! Each pass rewrites the whole document string; line-anchored rules use
//! multi-line mode so structural markers are recognized anywhere in the
//! document, not only at its start.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([A-Za-z0-9_]+)?\n((?s:.*?))```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").expect("valid regex"));
static BOLD_ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid regex"));
static BOLD_ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"___(.+?)___").expect("valid regex"));
static BOLD_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static BOLD_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("valid regex"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid regex"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("valid regex"));
static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").expect("valid regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
// The escaper has already rewritten `>` by the time this rule runs, so the
// quote marker to look for is its entity form.
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^&gt;\s+(.+)$").expect("valid regex"));
static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---$").expect("valid regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[*\-]\s+(.+)$").expect("valid regex"));
static UNORDERED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:<li class="list-item">.*</li>\n?)+"#).expect("valid regex"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\s+(.+)$").expect("valid regex"));
static ORDERED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:<li class="list-item-ordered">.*</li>\n?)+"#).expect("valid regex")
});

/// Rendered code fragments, parked while the remaining passes run.
///
/// Code content must reach the output verbatim, so each matched code span
/// is swapped for an opaque token and its finished HTML is held here until
/// [`CodeStash::restore`] puts it back after the last rewrite pass.
pub(crate) struct CodeStash {
    fragments: Vec<String>,
}

impl CodeStash {
    pub(crate) fn new() -> Self {
        Self { fragments: Vec::new() }
    }

    fn park(&mut self, html: String) -> String {
        let token = format!("\u{0}code{}\u{0}", self.fragments.len());
        self.fragments.push(html);
        token
    }

    /// Swap every token back for its stashed fragment.
    pub(crate) fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (index, html) in self.fragments.iter().enumerate() {
            let token = format!("\u{0}code{}\u{0}", index);
            out = out.replace(&token, html);
        }
        out
    }
}

/// Fenced code blocks: ```lang ... ``` into a pre/code pair carrying the
/// language as a data attribute. The enclosed text is trimmed and parked.
pub(crate) fn fenced_code_blocks(text: &str, stash: &mut CodeStash) -> String {
    FENCED_CODE
        .replace_all(text, |caps: &Captures| {
            let lang = caps.get(1).map_or("", |m| m.as_str());
            let code = caps[2].trim();
            stash.park(format!(
                "<pre class=\"code-block\" data-lang=\"{lang}\"><code>{code}</code></pre>"
            ))
        })
        .into_owned()
}

/// Backtick-delimited single-line spans. Runs before the emphasis rules so
/// marker characters inside code are never treated as markdown.
pub(crate) fn inline_code(text: &str, stash: &mut CodeStash) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            stash.park(format!("<code class=\"inline-code\">{}</code>", &caps[1]))
        })
        .into_owned()
}

/// 1-6 leading `#` into the matching heading level. The quantifier is
/// greedy, so the longest marker run wins and `## x` can never come out as
/// an h1 with a leftover hash.
pub(crate) fn headings(text: &str) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level} class=\"heading h{level}\">{}</h{level}>", &caps[2])
        })
        .into_owned()
}

/// Emphasis tiers, strictly ordered: triple marker, then double, then
/// single, star before underscore within each tier, all non-greedy.
///
/// This is textual rewriting, not a nested parse: overlapping or mixed
/// marker runs resolve in this exact order, and the occasional odd result
/// for unusual input is the accepted behavior.
pub(crate) fn emphasis(text: &str) -> String {
    let text = BOLD_ITALIC_STAR.replace_all(text, "<strong><em>$1</em></strong>");
    let text = BOLD_ITALIC_UNDERSCORE.replace_all(&text, "<strong><em>$1</em></strong>");
    let text = BOLD_STAR.replace_all(&text, "<strong>$1</strong>");
    let text = BOLD_UNDERSCORE.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_STAR.replace_all(&text, "<em>$1</em>");
    ITALIC_UNDERSCORE.replace_all(&text, "<em>$1</em>").into_owned()
}

pub(crate) fn strikethrough(text: &str) -> String {
    STRIKETHROUGH.replace_all(text, "<del>$1</del>").into_owned()
}

pub(crate) fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, "<img src=\"$2\" alt=\"$1\" class=\"image\" />")
        .into_owned()
}

/// Links open in a new context with no-referrer/no-opener attributes.
pub(crate) fn links(text: &str) -> String {
    LINK.replace_all(
        text,
        "<a href=\"$2\" class=\"link\" target=\"_blank\" rel=\"noopener noreferrer\">$1</a>",
    )
    .into_owned()
}

/// Line-granular blockquotes: consecutive quote lines each get their own
/// blockquote element, they are not merged.
pub(crate) fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, "<blockquote class=\"blockquote\">$1</blockquote>")
        .into_owned()
}

pub(crate) fn horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE
        .replace_all(text, "<hr class=\"hr\" />")
        .into_owned()
}

/// List items, then a merge of consecutive item lines into one enclosing
/// list element. The merge patterns key on the two distinct item classes,
/// which keeps the unordered and ordered merges independent: alternating
/// marker styles never merge across the boundary.
pub(crate) fn lists(text: &str) -> String {
    let text = UNORDERED_ITEM.replace_all(text, "<li class=\"list-item\">$1</li>");
    let text = UNORDERED_RUN.replace_all(&text, |caps: &Captures| {
        format!("<ul class=\"unordered-list\">{}</ul>", &caps[0])
    });
    let text = ORDERED_ITEM.replace_all(&text, "<li class=\"list-item-ordered\">$1</li>");
    ORDERED_RUN
        .replace_all(&text, |caps: &Captures| {
            format!("<ol class=\"ordered-list\">{}</ol>", &caps[0])
        })
        .into_owned()
}
