//! Markdown-to-HTML rendering for note previews.
//!
//! A deliberately small engine: an ordered sequence of whole-document
//! rewrites rather than a recursive-descent parser. Every pass sees the
//! output of the passes before it as plain text, so the pass order is
//! part of the observable behavior and must not be rearranged.
//!
//! [`render`] is total: it never fails, for any input. Malformed syntax
//! (unterminated fences, unmatched emphasis markers, a link missing its
//! closing parenthesis) is left in the output as literal escaped text.

mod escape;
mod paragraph;
mod rules;

/// Render a note body to an HTML fragment.
///
/// The fragment is safe to insert into a container element: every `&`,
/// `<` and `>` from the input is entity-escaped before any markup is
/// introduced, so the only tags in the output are the ones this engine
/// emits itself.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut stash = rules::CodeStash::new();

    // Escaping runs exactly once, before everything else.
    let text = escape::escape_html(text);

    // Code is consumed first and stashed behind opaque tokens so that no
    // later pass can rewrite code content.
    let text = rules::fenced_code_blocks(&text, &mut stash);
    let text = rules::inline_code(&text, &mut stash);

    let text = rules::headings(&text);
    let text = rules::emphasis(&text);
    let text = rules::strikethrough(&text);

    // Images before links: the link pattern would otherwise consume the
    // bracketed part of `![alt](url)` and strand the leading `!`.
    let text = rules::images(&text);
    let text = rules::links(&text);

    let text = rules::blockquotes(&text);
    let text = rules::horizontal_rules(&text);
    let text = rules::lists(&text);

    let text = stash.restore(&text);
    paragraph::assemble(&text)
}
