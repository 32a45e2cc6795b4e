//! Blockquotes.

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::GeneratedTag;

static QUOTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^> (.+)$").unwrap());

/// Merge consecutive `> text` lines into one blockquote.
///
/// The quote markers are dropped and each quoted line is kept on its own line
/// between the opening and closing tags.
pub(crate) fn process_blockquotes(content: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_quote = false;

    for line in content.split('\n') {
        if let Some(text) = QUOTE_PATTERN.captures(line).and_then(|caps| caps.get(1)) {
            if !in_quote {
                out.push(GeneratedTag::BlockquoteOpen.as_str());
                in_quote = true;
            }
            out.push(text.as_str());
        } else {
            if in_quote {
                out.push(GeneratedTag::BlockquoteClose.as_str());
                in_quote = false;
            }
            out.push(line);
        }
    }
    if in_quote {
        out.push(GeneratedTag::BlockquoteClose.as_str());
    }

    out.join("\n")
}
