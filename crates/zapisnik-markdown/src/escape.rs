//! HTML character escaping.

/// Escape the three HTML-significant characters.
///
/// `&` must be replaced first: doing it later would double-escape the
/// entities introduced for `<` and `>`.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
