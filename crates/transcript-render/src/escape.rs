//! HTML escaping.
//!
//! [`escape_html`] escapes everything and is used for content that must come
//! out as plain text. [`escape_remaining`] is the pipeline's final safety pass:
//! it escapes everything except vault tokens and [`GeneratedTag`] markup.

use crate::tags::GeneratedTag;
use crate::vault::{SENTINEL, token_len};

/// Escape `&`, `<`, `>`, `"` and `'`.
///
/// # Example
///
/// ```
/// use transcript_render::escape_html;
///
/// assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#39;x&#39;&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 8);
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Escape everything in `content` that the pipeline did not generate.
///
/// Walks the string once. At each position:
/// - a well-formed vault token is copied through unchanged;
/// - a tag equal to one [`GeneratedTag`] markup is copied through unchanged;
/// - any other character is escaped.
///
/// A sentinel that does not delimit a well-formed token is replaced with
/// U+FFFD so it can never pair with a later one.
#[must_use]
pub fn escape_remaining(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    let mut pos = 0;

    while let Some(c) = content[pos..].chars().next() {
        let rest = &content[pos..];

        if c == SENTINEL {
            if let Some(len) = token_len(rest) {
                out.push_str(&rest[..len]);
                pos += len;
            } else {
                out.push(char::REPLACEMENT_CHARACTER);
                pos += c.len_utf8();
            }
            continue;
        }

        if c == '<'
            && let Some(tag) = GeneratedTag::match_prefix(rest)
        {
            let markup = tag.as_str();
            out.push_str(markup);
            pos += markup.len();
            continue;
        }

        push_escaped(&mut out, c);
        pos += c.len_utf8();
    }

    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&#34;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &#34;e&#34; &#39;f&#39;"
        );
    }

    #[test]
    fn test_escape_html_keeps_unicode() {
        assert_eq!(escape_html("naïve → ✓"), "naïve → ✓");
    }

    #[test]
    fn test_escape_remaining_escapes_script() {
        assert_eq!(
            escape_remaining("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_remaining_keeps_generated_tags() {
        assert_eq!(
            escape_remaining(r#"<h1 class="md-h1">a & b</h1>"#),
            r#"<h1 class="md-h1">a &amp; b</h1>"#
        );
        assert_eq!(
            escape_remaining("<strong>x</strong><em>y</em>"),
            "<strong>x</strong><em>y</em>"
        );
    }

    #[test]
    fn test_escape_remaining_rejects_lookalike_tags() {
        assert_eq!(
            escape_remaining(r#"<h1 onmouseover="x">"#),
            "&lt;h1 onmouseover=&#34;x&#34;&gt;"
        );
        assert_eq!(escape_remaining("<li style=x>"), "&lt;li style=x&gt;");
        assert_eq!(escape_remaining("<strongest>"), "&lt;strongest&gt;");
    }

    #[test]
    fn test_escape_remaining_passes_tokens() {
        assert_eq!(
            escape_remaining("a \0LINK_0\0 & \0HR\0"),
            "a \0LINK_0\0 &amp; \0HR\0"
        );
    }

    #[test]
    fn test_escape_remaining_replaces_stray_sentinel() {
        assert_eq!(
            escape_remaining("\0<script>\0"),
            "\u{FFFD}&lt;script&gt;\u{FFFD}"
        );
        assert_eq!(escape_remaining("tail\0"), "tail\u{FFFD}");
    }

    #[test]
    fn test_escape_remaining_multibyte() {
        assert_eq!(escape_remaining("日本 <b>"), "日本 &lt;b&gt;");
    }

    #[test]
    fn test_escape_remaining_empty() {
        assert_eq!(escape_remaining(""), "");
    }
}
