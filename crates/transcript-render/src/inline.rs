//! Inline protectors and emphasis.
//!
//! Inline code, images and links are rendered to their final HTML right away
//! and parked in the [`Vault`]. Bold and italic are plain rewrites whose
//! content the escaper handles later.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;
use crate::tags::GeneratedTag;
use crate::vault::{Category, Vault};

static INLINE_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());

/// URL schemes allowed in `href` and `src`.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "file"];

/// Substituted for URLs with a disallowed scheme.
const BLOCKED_URL: &str = "#";

/// Replace single-backtick code spans with tokens.
pub(crate) fn protect_inline_code(text: &str, vault: &mut Vault) -> String {
    INLINE_CODE_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            // A fence token inside the span shows as the fence it replaced.
            let code = vault.expand_source(&caps[1]).into_owned();
            let html = format!(r#"<code class="inline-code">{}</code>"#, escape_html(&code));
            vault.protect(Category::InlineCode, &caps[0], html)
        })
        .into_owned()
}

/// Replace `![alt](url)` with tokens. Must run before [`protect_links`].
pub(crate) fn protect_images(text: &str, vault: &mut Vault) -> String {
    IMAGE_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let alt = vault.expand_source(&caps[1]).into_owned();
            let src = safe_url(&vault.expand_source(&caps[2]), true);
            let html = format!(
                r#"<img src="{}" alt="{}" class="md-image">"#,
                escape_html(&src),
                escape_html(&alt)
            );
            vault.protect(Category::Image, &caps[0], html)
        })
        .into_owned()
}

/// Replace `[text](url)` with tokens.
///
/// Tokens already inside the link text (inline code, images) are kept and
/// restored after the link itself.
pub(crate) fn protect_links(text: &str, vault: &mut Vault) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let href = safe_url(&vault.expand_source(&caps[2]), false);
            let html = format!(
                r#"<a href="{}" class="md-link">{}</a>"#,
                escape_html(&href),
                escape_html(&caps[1])
            );
            vault.protect(Category::Link, &caps[0], html)
        })
        .into_owned()
}

/// Apply [`emphasize`] line by line, skipping rendered tables.
///
/// Table cells are emphasized one at a time when the table is built, so a
/// marker pair never spans two cells.
pub(crate) fn apply_emphasis(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.starts_with(GeneratedTag::TableOpen.as_str()) {
                line.to_owned()
            } else {
                emphasize(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite `**bold**` and `*italic*` within a line. No escaping here.
pub(crate) fn emphasize(text: &str) -> String {
    let bold = BOLD_PATTERN.replace_all(text, "<strong>$1</strong>");
    ITALIC_PATTERN
        .replace_all(&bold, "<em>$1</em>")
        .into_owned()
}

/// Return `url` if its scheme is allowed, otherwise [`BLOCKED_URL`].
///
/// Relative URLs (no scheme) pass. `data:image/` is allowed for images only.
fn safe_url(url: &str, image: bool) -> String {
    let url = url.trim();
    // Browsers ignore control characters and whitespace inside a scheme.
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let Some(colon) = normalized.find(':') else {
        return url.to_owned();
    };
    let scheme = &normalized[..colon];
    if scheme.contains(['/', '?', '#']) {
        return url.to_owned();
    }

    let allowed = SAFE_SCHEMES.contains(&scheme)
        || (image && scheme == "data" && normalized.starts_with("data:image/"));
    if allowed {
        url.to_owned()
    } else {
        tracing::debug!(scheme, "Blocked URL with disallowed scheme");
        BLOCKED_URL.to_owned()
    }
}
