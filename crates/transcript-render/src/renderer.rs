//! The Markdown rendering pipeline.

use crate::block::{
    process_blockquotes, process_headings, process_lists, process_rules, process_tables,
};
use crate::breaks::convert_newlines;
use crate::escape::escape_remaining;
use crate::fence::{extract_code_blocks, render_code_block};
use crate::inline::{apply_emphasis, protect_images, protect_inline_code, protect_links};
use crate::vault::{Category, HR_SENTINEL, SENTINEL, Vault};

/// Markup the horizontal-rule sentinel expands to.
const HR_HTML: &str = r#"<hr class="md-hr">"#;

/// Render Markdown from a transcript message to an HTML fragment.
///
/// The result is safe to embed in a page: every character of `content` that
/// is not part of recognized Markdown syntax is escaped, and no generated
/// attribute carries a scriptable URL. Fenced code blocks and inline code are
/// rendered verbatim (escaped) with no Markdown applied inside.
///
/// # Example
///
/// ```
/// use transcript_render::render;
///
/// assert_eq!(render("# Title"), r#"<h1 class="md-h1">Title</h1>"#);
/// assert_eq!(
///     render("a <b> & **c**"),
///     "a &lt;b&gt; &amp; <strong>c</strong>"
/// );
/// assert_eq!(render(""), "");
/// ```
#[must_use]
pub fn render(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut vault = Vault::new();

    // Tokens are NUL-delimited, so input NULs must not survive.
    let sanitized = content.replace(SENTINEL, "\u{FFFD}");

    let text = protect_code_blocks(&sanitized, &mut vault);
    let text = protect_inline_code(&text, &mut vault);
    let text = protect_images(&text, &mut vault);
    let text = protect_links(&text, &mut vault);

    let text = process_tables(&text);
    let text = process_lists(&text);
    let text = process_blockquotes(&text);
    let text = process_rules(&text);
    let text = process_headings(&text);
    let text = apply_emphasis(&text);

    let text = escape_remaining(&text);
    let text = convert_newlines(&text);
    let text = text.replace(HR_SENTINEL, HR_HTML);

    tracing::trace!(
        code_blocks = vault.count(Category::CodeBlock),
        inline_code = vault.count(Category::InlineCode),
        images = vault.count(Category::Image),
        links = vault.count(Category::Link),
        "Restoring protected fragments"
    );

    vault.restore_all(text, &Category::RESTORE_ORDER)
}

/// Swap every fenced code block for a token holding its rendered HTML.
fn protect_code_blocks(content: &str, vault: &mut Vault) -> String {
    let blocks = extract_code_blocks(content);
    if blocks.is_empty() {
        return content.to_owned();
    }

    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for block in &blocks {
        out.push_str(&content[last..block.start]);
        let source = &content[block.start..block.end];
        out.push_str(&vault.protect(Category::CodeBlock, source, render_code_block(block)));
        last = block.end;
    }
    out.push_str(&content[last..]);

    tracing::debug!(count = blocks.len(), "Protected fenced code blocks");
    out
}
