//! User message formatting.
//!
//! User messages are shown as typed: no Markdown. The one structure picked out
//! is tool output wrapped in XML-like tags (`<bash-stdout>…</bash-stdout>`),
//! which is rendered as a labelled block.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;

/// `<name attrs?>body</name>`. Names are compared after matching since the
/// regex engine has no backreferences.
static TAG_BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<([a-z][a-z0-9\-]*)((?:\s+[^>]*)?)>(.*?)</([a-z][a-z0-9\-]*)>").unwrap()
});

/// Escape a user message, rendering tag-wrapped tool output as blocks.
///
/// Blocks whose body is empty or whitespace are dropped. A block whose
/// closing tag names a different element is left as escaped text.
///
/// # Example
///
/// ```
/// use transcript_render::format_user_content;
///
/// assert_eq!(
///     format_user_content("ran: <bash-stdout>ok</bash-stdout><bash-stderr></bash-stderr>"),
///     concat!(
///         r#"ran: <div class="xml-tag-block">&lt;bash-stdout&gt;"#,
///         r#"<div class="xml-tag-content">ok</div>&lt;/bash-stdout&gt;</div>"#,
///     )
/// );
/// ```
#[must_use]
pub fn format_user_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(content.len() + 64);
    let mut last = 0;
    let mut blocks = 0usize;

    for caps in TAG_BLOCK_PATTERN.captures_iter(content) {
        let (Some(full), Some(name), Some(body), Some(closing)) =
            (caps.get(0), caps.get(1), caps.get(3), caps.get(4))
        else {
            continue;
        };
        if name.as_str() != closing.as_str() {
            continue;
        }

        out.push_str(&escape_html(&content[last..full.start()]));
        last = full.end();

        if body.as_str().trim().is_empty() {
            continue;
        }

        let name = escape_html(name.as_str());
        write!(
            out,
            r#"<div class="xml-tag-block">&lt;{name}&gt;<div class="xml-tag-content">{}</div>&lt;/{name}&gt;</div>"#,
            escape_html(body.as_str())
        )
        .unwrap();
        blocks += 1;
    }
    out.push_str(&escape_html(&content[last..]));

    tracing::trace!(blocks, "Formatted user content");
    out
}
