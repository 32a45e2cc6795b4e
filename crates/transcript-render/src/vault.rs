//! Placeholder vault for already-rendered HTML fragments.
//!
//! Spans whose final HTML is known early (code blocks, inline code, images,
//! links) are swapped for opaque tokens so the block transformers and the
//! escaper never touch them. Tokens are restored at the very end of a render.
//!
//! Token shape: `\0{TAG}_{n}\0`, where `TAG` names the [`Category`] and `n`
//! counts up per category. The renderer replaces every NUL byte of its input
//! before any token is minted, so tokens cannot be forged by content.

use std::borrow::Cow;

/// Delimiter byte around every token.
pub(crate) const SENTINEL: char = '\0';

/// Fixed token for a horizontal rule. Not stored in the vault.
pub(crate) const HR_SENTINEL: &str = "\0HR\0";

/// Kind of protected fragment. Each category has its own token namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Image,
    Link,
    InlineCode,
    CodeBlock,
}

impl Category {
    /// Order in which the renderer restores categories.
    pub const RESTORE_ORDER: [Self; 4] = [Self::Image, Self::Link, Self::InlineCode, Self::CodeBlock];

    /// Tag embedded in this category's tokens.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Link => "LINK",
            Self::InlineCode => "INLINE_CODE",
            Self::CodeBlock => "CODE_BLOCK",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Image => 0,
            Self::Link => 1,
            Self::InlineCode => 2,
            Self::CodeBlock => 3,
        }
    }
}

#[derive(Debug)]
struct Entry {
    /// Markdown the token replaced.
    source: String,
    /// Final HTML the token expands to.
    html: String,
}

/// Per-render store of protected fragments.
///
/// # Example
///
/// ```
/// use transcript_render::vault::{Category, Vault};
///
/// let mut vault = Vault::new();
/// let token = vault.protect(Category::InlineCode, "`x`", "<code>x</code>".to_owned());
/// let text = format!("use {token} here");
///
/// assert_eq!(vault.expand_source(&text), "use `x` here");
/// assert_eq!(
///     vault.restore_all(text, &Category::RESTORE_ORDER),
///     "use <code>x</code> here"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Vault {
    entries: [Vec<Entry>; 4],
}

impl Vault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rendered HTML and return the token standing in for it.
    pub fn protect(&mut self, category: Category, source: &str, html: String) -> String {
        let entries = &mut self.entries[category.index()];
        let token = format!("{SENTINEL}{}_{}{SENTINEL}", category.tag(), entries.len());
        entries.push(Entry {
            source: source.to_owned(),
            html,
        });
        token
    }

    /// Number of fragments stored under `category`.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.entries[category.index()].len()
    }

    /// Total number of stored fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    /// Check whether nothing has been protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace every token of a category in `order` with its HTML.
    ///
    /// A fragment may itself contain tokens (an image inside link text), so
    /// the scan is repeated while it still substitutes, at most once per
    /// category.
    #[must_use]
    pub fn restore_all(&self, text: String, order: &[Category]) -> String {
        self.substitute(text, order, |entry| entry.html.as_str())
    }

    /// Replace every token with the Markdown it was minted from.
    ///
    /// Used for attribute values, where nested HTML would be wrong.
    #[must_use]
    pub fn expand_source<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains(SENTINEL) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(self.substitute(text.to_owned(), &Category::RESTORE_ORDER, |entry| {
            entry.source.as_str()
        }))
    }

    fn substitute(
        &self,
        mut text: String,
        order: &[Category],
        value: impl Fn(&Entry) -> &str,
    ) -> String {
        for _ in 0..order.len() {
            match self.substitute_once(&text, order, &value) {
                Some(next) => text = next,
                None => break,
            }
        }
        text
    }

    /// One left-to-right pass. Returns `None` if nothing was substituted.
    fn substitute_once(
        &self,
        text: &str,
        order: &[Category],
        value: &impl Fn(&Entry) -> &str,
    ) -> Option<String> {
        if !text.contains(SENTINEL) {
            return None;
        }

        let mut out = String::with_capacity(text.len());
        let mut replaced = false;
        let mut rest = text;
        while let Some(start) = rest.find(SENTINEL) {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let Some(len) = token_len(tail) else {
                out.push(SENTINEL);
                rest = &tail[SENTINEL.len_utf8()..];
                continue;
            };
            let name = &tail[SENTINEL.len_utf8()..len - SENTINEL.len_utf8()];
            match self.lookup(name, order) {
                Some(entry) => {
                    out.push_str(value(entry));
                    replaced = true;
                }
                // HR sentinel, or a category not being restored.
                None => out.push_str(&tail[..len]),
            }
            rest = &tail[len..];
        }
        out.push_str(rest);

        replaced.then_some(out)
    }

    /// Entry named `TAG_n`, if `TAG` belongs to a category in `order`.
    fn lookup(&self, name: &str, order: &[Category]) -> Option<&Entry> {
        let (tag, index) = name.rsplit_once('_')?;
        let category = order.iter().find(|category| category.tag() == tag)?;
        let index: usize = index.parse().ok()?;
        self.entries[category.index()].get(index)
    }
}

/// Length of the well-formed token starting at the beginning of `text`.
///
/// Token names are ASCII uppercase letters, digits and underscores between
/// two sentinels.
pub(crate) fn token_len(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(SENTINEL)?;
    let end = rest.find(SENTINEL)?;
    let name = &rest[..end];
    let well_formed = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
    well_formed.then_some(end + 2 * SENTINEL.len_utf8())
}
