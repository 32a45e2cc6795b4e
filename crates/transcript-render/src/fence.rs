//! Fenced code block extraction and rendering.
//!
//! Fences are found before any other transform runs, so the byte offsets in
//! [`CodeBlock`] always refer to the caller's original text.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;

/// Triple backticks, optional language tag, optional newline, lazy body.
static CODE_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w*)\n?(.*?)```").unwrap());

/// Fenced code block found in Markdown text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag after the opening fence (empty if absent).
    pub language: String,
    /// Raw body without fences, one trailing newline trimmed.
    pub code: String,
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset just past the closing fence.
    pub end: usize,
}

/// Find every fenced code block in `content`, in order.
///
/// Blocks never overlap: the first closing fence ends a block, and an
/// opening fence without a closing one is not a block.
///
/// # Example
///
/// ```
/// use transcript_render::extract_code_blocks;
///
/// let blocks = extract_code_blocks("intro\n```rust\nfn main() {}\n```\n");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].language, "rust");
/// assert_eq!(blocks[0].code, "fn main() {}");
/// assert_eq!(blocks[0].start, 6);
/// ```
#[must_use]
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    CODE_BLOCK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let language = caps.get(1).map_or("", |m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str());
            Some(CodeBlock {
                language: language.to_owned(),
                code: code.strip_suffix('\n').unwrap_or(code).to_owned(),
                start: full.start(),
                end: full.end(),
            })
        })
        .collect()
}

/// Render a code block with its language badge and copy button.
///
/// The body is escaped and otherwise left alone: no Markdown applies inside.
#[must_use]
pub fn render_code_block(block: &CodeBlock) -> String {
    let (language_class, badge) = if block.language.is_empty() {
        (String::new(), "text".to_owned())
    } else {
        let language = escape_html(&block.language);
        (format!(" language-{language}"), language)
    };

    let mut out = String::with_capacity(block.code.len() + 256);
    write!(
        out,
        r#"<div class="code-block{language_class}"><div class="code-header"><span class="language-badge">{badge}</span>"#
    )
    .unwrap();
    out.push_str(
        r#"<button class="copy-code-btn" onclick="copyCode(this)" title="Copy code">Copy</button></div>"#,
    );
    write!(
        out,
        r#"<pre class="code-content"><code>{}</code></pre></div>"#,
        escape_html(&block.code)
    )
    .unwrap();
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_blocks() {
        assert!(extract_code_blocks("No code blocks here").is_empty());
    }

    #[test]
    fn test_single_block() {
        let blocks = extract_code_blocks("```go\nfunc main() {}\n```");
        assert_eq!(
            blocks,
            vec![CodeBlock {
                language: "go".to_owned(),
                code: "func main() {}".to_owned(),
                start: 0,
                end: 24,
            }]
        );
    }

    #[test]
    fn test_multiple_blocks() {
        let blocks = extract_code_blocks("```bash\necho hello\n```\n\n```python\nprint('hi')\n```");
        let languages: Vec<&str> = blocks.iter().map(|b| b.language.as_str()).collect();
        assert_eq!(languages, vec!["bash", "python"]);
        assert!(blocks[0].end <= blocks[1].start);
    }

    #[test]
    fn test_no_language() {
        let blocks = extract_code_blocks("```\nplain text\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "");
        assert_eq!(blocks[0].code, "plain text");
    }

    #[test]
    fn test_positions_refer_to_input() {
        let content = "before\n```go\ncode\n```\nafter";
        let blocks = extract_code_blocks(content);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 7);
        assert_eq!(&content[blocks[0].start..blocks[0].end], "```go\ncode\n```");
    }

    #[test]
    fn test_empty_body() {
        let blocks = extract_code_blocks("```\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "");
    }

    #[test]
    fn test_unterminated_fence_is_not_a_block() {
        assert!(extract_code_blocks("```rust\nfn main() {}").is_empty());
    }

    #[test]
    fn test_first_closing_fence_wins() {
        let blocks = extract_code_blocks("```\nouter\n```\ninner\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "outer");
    }

    #[test]
    fn test_render_with_language() {
        let block = CodeBlock {
            language: "go".to_owned(),
            code: "a < b".to_owned(),
            start: 0,
            end: 0,
        };
        assert_eq!(
            render_code_block(&block),
            concat!(
                r#"<div class="code-block language-go"><div class="code-header">"#,
                r#"<span class="language-badge">go</span>"#,
                r#"<button class="copy-code-btn" onclick="copyCode(this)" title="Copy code">Copy</button></div>"#,
                r#"<pre class="code-content"><code>a &lt; b</code></pre></div>"#,
            )
        );
    }

    #[test]
    fn test_render_without_language() {
        let block = CodeBlock {
            language: String::new(),
            code: "plain".to_owned(),
            start: 0,
            end: 0,
        };
        let html = render_code_block(&block);
        assert!(html.starts_with(r#"<div class="code-block"><div class="code-header">"#));
        assert!(html.contains(r#"<span class="language-badge">text</span>"#));
    }
}
