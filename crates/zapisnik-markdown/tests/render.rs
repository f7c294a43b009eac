//! End-to-end rendering behavior.
//!
//! These tests pin exact output strings: the engine is an ordered rewrite
//! and its byte-for-byte output is the contract, including the resolution
//! of inputs a nested parser would handle differently.

use zapisnik_markdown::render;

#[test]
fn empty_in_empty_out() {
    assert_eq!(render(""), "");
}

#[test]
fn never_panics_on_awkward_input() {
    let inputs = [
        "```unterminated",
        "**unmatched",
        "[text](no-close",
        "![](())",
        "``",
        "######",
        "* * * *",
        "~~~~",
        "___",
        "<script>alert(1)</script>",
        "\n\n\n",
        "&&&&<<<>>>",
    ];
    for input in inputs {
        let _ = render(input);
    }
}

#[test]
fn html_significant_characters_are_escaped() {
    assert_eq!(
        render("a < b & c > d"),
        "<p class=\"paragraph\">a &lt; b &amp; c &gt; d</p>"
    );
}

#[test]
fn raw_markup_in_input_cannot_survive_as_tags() {
    let html = render("<script>alert(1)</script>");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn plain_text_becomes_one_trimmed_paragraph() {
    assert_eq!(
        render("  hello\nworld  "),
        "<p class=\"paragraph\">hello<br />world</p>"
    );
}

#[test]
fn heading_precedence_prefers_the_longest_marker() {
    assert_eq!(render("###### x"), "<h6 class=\"heading h6\">x</h6>");
    assert_eq!(render("## x"), "<h2 class=\"heading h2\">x</h2>");
}

#[test]
fn triple_marker_emphasis_nests_strong_around_em() {
    assert_eq!(
        render("***bold italic***"),
        "<p class=\"paragraph\"><strong><em>bold italic</em></strong></p>"
    );
}

#[test]
fn unordered_items_merge_into_one_list() {
    assert_eq!(
        render("- a\n- b\n- c"),
        "<ul class=\"unordered-list\"><li class=\"list-item\">a</li>\n\
         <li class=\"list-item\">b</li>\n\
         <li class=\"list-item\">c</li></ul>"
    );
}

#[test]
fn ordered_items_merge_into_one_list() {
    assert_eq!(
        render("1. a\n2. b"),
        "<ol class=\"ordered-list\"><li class=\"list-item-ordered\">a</li>\n\
         <li class=\"list-item-ordered\">b</li></ol>"
    );
}

#[test]
fn code_block_content_is_exempt_from_inline_transforms() {
    assert_eq!(
        render("```js\n**not bold**\n```"),
        "<pre class=\"code-block\" data-lang=\"js\"><code>**not bold**</code></pre>"
    );
}

#[test]
fn image_gets_src_and_alt() {
    assert_eq!(
        render("![alt](img.png)"),
        "<p class=\"paragraph\"><img src=\"img.png\" alt=\"alt\" class=\"image\" /></p>"
    );
}

#[test]
fn link_gets_href_and_safety_attributes() {
    assert_eq!(
        render("[text](url)"),
        "<p class=\"paragraph\"><a href=\"url\" class=\"link\" target=\"_blank\" \
         rel=\"noopener noreferrer\">text</a></p>"
    );
}

#[test]
fn image_and_link_patterns_stay_disjoint() {
    let html = render("![pic](a.png) and [site](b.html)");
    assert!(html.contains("<img src=\"a.png\" alt=\"pic\""));
    assert!(html.contains("<a href=\"b.html\""));
    // The image's bang must be consumed, not stranded in front of an anchor.
    assert!(!html.contains("!<a"));
}

#[test]
fn blockquote_line_is_wrapped() {
    assert_eq!(
        render("> quote"),
        "<blockquote class=\"blockquote\">quote</blockquote>"
    );
}

#[test]
fn horizontal_rule_line() {
    assert_eq!(render("---"), "<hr class=\"hr\" />");
}

#[test]
fn strikethrough_span() {
    assert_eq!(
        render("~~gone~~"),
        "<p class=\"paragraph\"><del>gone</del></p>"
    );
}

#[test]
fn inline_code_span() {
    assert_eq!(
        render("a `b` c"),
        "<p class=\"paragraph\">a <code class=\"inline-code\">b</code> c</p>"
    );
}

#[test]
fn heading_marker_mid_document_is_still_recognized() {
    assert_eq!(
        render("para\n# head\ntail"),
        "para\n<h1 class=\"heading h1\">head</h1>\ntail"
    );
}

#[test]
fn unmatched_delimiters_degrade_to_literal_text() {
    assert_eq!(render("**dangling"), "<p class=\"paragraph\">**dangling</p>");
    assert_eq!(
        render("[text](no-close"),
        "<p class=\"paragraph\">[text](no-close</p>"
    );
}

#[test]
fn unterminated_fence_stays_literal() {
    let html = render("```js\nlet x = 1;");
    assert!(html.contains("```js"));
    assert!(!html.contains("<pre"));
}

#[test]
fn rendering_twice_is_byte_identical() {
    let text = "# t\n\n> q\n\n- a\n- b\n\n```\ncode\n```\n\n*i* **b** `c` ~~s~~";
    assert_eq!(render(text), render(text));
}

#[test]
fn whole_document_composition() {
    let text = "# Title\n\nIntro with *emphasis* and a [link](https://example.com).\n\n\
                - first\n- second\n\n```rust\nfn main() {}\n```\n\n> a quote\n\n---";
    let html = render(text);
    assert!(html.contains("<h1 class=\"heading h1\">Title</h1>"));
    assert!(html.contains("<em>emphasis</em>"));
    assert!(html.contains("<a href=\"https://example.com\""));
    assert!(html.contains("<ul class=\"unordered-list\">"));
    assert!(html.contains("<pre class=\"code-block\" data-lang=\"rust\"><code>fn main() {}</code></pre>"));
    assert!(html.contains("<blockquote class=\"blockquote\">a quote</blockquote>"));
    assert!(html.contains("<hr class=\"hr\" />"));
}
