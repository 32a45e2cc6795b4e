//! Newline to `<br>` conversion.
//!
//! Runs after escaping, while horizontal rules and code blocks are still
//! sentinel tokens, so block detection here sees those tokens rather than
//! their HTML.

use crate::vault::{Category, HR_SENTINEL, SENTINEL};

/// Suffixes that end a block-level element.
const BLOCK_ENDINGS: &[&str] = &[
    "</h1>",
    "</h2>",
    "</h3>",
    "</h4>",
    "</h5>",
    "</h6>",
    "</ul>",
    "</ol>",
    "</li>",
    "</table>",
    "</tr>",
    "</blockquote>",
    "</div>",
    "</pre>",
    HR_SENTINEL,
];

/// Prefixes that start a block-level element.
const BLOCK_STARTS: &[&str] = &[
    "<h1",
    "<h2",
    "<h3",
    "<h4",
    "<h5",
    "<h6",
    "<ul",
    "<ol",
    "<li",
    "</ul>",
    "</ol>",
    "<table",
    "<blockquote",
    "</blockquote>",
    "<div",
    HR_SENTINEL,
];

/// Join lines with `<br>`, skipping breaks around block elements.
///
/// - Runs of blank lines collapse to one, and a blank line never gets a break.
/// - No break follows a line that starts or ends a block element.
/// - No break precedes a line that starts a block element.
pub(crate) fn convert_newlines(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out = String::with_capacity(content.len() + lines.len() * 4);
    let mut previous_blank = false;

    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let blank = trimmed.is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;

        out.push_str(line);

        let Some(next) = lines.get(idx + 1) else {
            break;
        };
        if blank || is_block_line(trimmed) || starts_block(next.trim()) {
            continue;
        }
        out.push_str("<br>");
    }

    out
}

fn is_block_line(trimmed: &str) -> bool {
    starts_block(trimmed)
        || BLOCK_ENDINGS.iter().any(|ending| trimmed.ends_with(ending))
        || ends_with_code_block(trimmed)
}

fn starts_block(trimmed: &str) -> bool {
    BLOCK_STARTS.iter().any(|start| trimmed.starts_with(start))
        || trimmed
            .strip_prefix(SENTINEL)
            .is_some_and(|rest| rest.starts_with(Category::CodeBlock.tag()))
}

fn ends_with_code_block(trimmed: &str) -> bool {
    let Some(body) = trimmed.strip_suffix(SENTINEL) else {
        return false;
    };
    body.rfind(SENTINEL)
        .is_some_and(|open| body[open + 1..].starts_with(Category::CodeBlock.tag()))
}
