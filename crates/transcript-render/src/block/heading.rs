//! Headers and horizontal rules.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::tags::{GeneratedTag, HeadingLevel};
use crate::vault::HR_SENTINEL;

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6}) (.+)$").unwrap());

static RULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:---|\*\*\*|___)$").unwrap());

/// Rewrite `#` to `######` lines as heading tags. Text is left for the escaper.
pub(crate) fn process_headings(content: &str) -> String {
    HEADING_PATTERN
        .replace_all(content, |caps: &Captures<'_>| {
            let Some(level) = HeadingLevel::from_markers(caps[1].len()) else {
                return caps[0].to_owned();
            };
            format!(
                "{}{}{}",
                GeneratedTag::HeadingOpen(level).as_str(),
                &caps[2],
                GeneratedTag::HeadingClose(level).as_str()
            )
        })
        .into_owned()
}

/// Replace `---`, `***` and `___` lines with the rule sentinel.
pub(crate) fn process_rules(content: &str) -> String {
    RULE_PATTERN.replace_all(content, HR_SENTINEL).into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_all_levels() {
        for (markers, expected) in [
            ("#", r#"<h1 class="md-h1">T</h1>"#),
            ("##", r#"<h2 class="md-h2">T</h2>"#),
            ("###", r#"<h3 class="md-h3">T</h3>"#),
            ("####", r#"<h4 class="md-h4">T</h4>"#),
            ("#####", r#"<h5 class="md-h5">T</h5>"#),
            ("######", r#"<h6 class="md-h6">T</h6>"#),
        ] {
            assert_eq!(process_headings(&format!("{markers} T")), expected);
        }
    }

    #[test]
    fn test_seven_markers_is_text() {
        assert_eq!(process_headings("####### T"), "####### T");
    }

    #[test]
    fn test_requires_space_and_line_start() {
        assert_eq!(process_headings("#tag"), "#tag");
        assert_eq!(process_headings("issue # 5"), "issue # 5");
    }

    #[test]
    fn test_multiple_headings() {
        assert_eq!(
            process_headings("# Title\ntext\n## Section"),
            "<h1 class=\"md-h1\">Title</h1>\ntext\n<h2 class=\"md-h2\">Section</h2>"
        );
    }

    #[test]
    fn test_rules() {
        assert_eq!(process_rules("a\n---\n***\n___\nb"), "a\n\0HR\0\n\0HR\0\n\0HR\0\nb");
    }

    #[test]
    fn test_rule_must_be_whole_line() {
        assert_eq!(process_rules("--- x"), "--- x");
        assert_eq!(process_rules("----"), "----");
    }
}
