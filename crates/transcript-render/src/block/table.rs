//! Pipe tables.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::emphasize;
use crate::tags::GeneratedTag;

/// Separator row content once the outer pipes are stripped.
static SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

/// Rows collected while consecutive lines look like table rows.
#[derive(Debug, Default)]
struct TableAccumulator<'a> {
    rows: Vec<&'a str>,
}

impl<'a> TableAccumulator<'a> {
    fn push(&mut self, row: &'a str) {
        self.rows.push(row);
    }

    /// Emit the collected rows, if any, and reset.
    fn flush(&mut self, out: &mut Vec<String>) {
        if self.rows.is_empty() {
            return;
        }
        if self.rows.len() < 2 {
            // A lone row is not a table.
            out.extend(self.rows.iter().map(|row| (*row).to_owned()));
        } else {
            out.push(render_table(&self.rows));
        }
        self.rows.clear();
    }
}

/// Convert runs of `| a | b |` lines into single-line HTML tables.
pub(crate) fn process_tables(content: &str) -> String {
    let mut out = Vec::new();
    let mut table = TableAccumulator::default();

    for line in content.split('\n') {
        if is_table_row(line) {
            table.push(line);
        } else {
            table.flush(&mut out);
            out.push(line.to_owned());
        }
    }
    table.flush(&mut out);

    out.join("\n")
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn render_table(rows: &[&str]) -> String {
    let mut out = String::from(GeneratedTag::TableOpen.as_str());

    out.push_str(GeneratedTag::TheadOpen.as_str());
    push_row(
        &mut out,
        &parse_row(rows[0]),
        GeneratedTag::HeaderCellOpen,
        GeneratedTag::HeaderCellClose,
    );
    out.push_str(GeneratedTag::TheadClose.as_str());

    out.push_str(GeneratedTag::TbodyOpen.as_str());
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if idx == 1 && is_separator(row) {
            continue;
        }
        let cells = parse_row(row);
        if cells.is_empty() {
            continue;
        }
        push_row(&mut out, &cells, GeneratedTag::CellOpen, GeneratedTag::CellClose);
    }
    out.push_str(GeneratedTag::TbodyClose.as_str());

    out.push_str(GeneratedTag::TableClose.as_str());
    out
}

/// Cell contents are trimmed and emphasized but not escaped; the escaper
/// runs later.
fn push_row(out: &mut String, cells: &[&str], open: GeneratedTag, close: GeneratedTag) {
    out.push_str(GeneratedTag::RowOpen.as_str());
    for cell in cells {
        out.push_str(open.as_str());
        out.push_str(&emphasize(cell.trim()));
        out.push_str(close.as_str());
    }
    out.push_str(GeneratedTag::RowClose.as_str());
}

fn parse_row(row: &str) -> Vec<&str> {
    let inner = strip_outer_pipes(row);
    if inner.is_empty() {
        return Vec::new();
    }
    inner.split('|').collect()
}

fn is_separator(row: &str) -> bool {
    SEPARATOR_PATTERN.is_match(strip_outer_pipes(row))
}

fn strip_outer_pipes(row: &str) -> &str {
    row.trim().trim_matches('|')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_basic_table() {
        let input = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |";
        assert_eq!(
            process_tables(input),
            concat!(
                r#"<table class="md-table"><thead><tr><th>Header 1</th><th>Header 2</th></tr></thead>"#,
                "<tbody><tr><td>Cell 1</td><td>Cell 2</td></tr></tbody></table>"
            )
        );
    }

    #[test]
    fn test_rows_in_order() {
        let input = "| Name | Age |\n|------|-----|\n| Alice | 30 |\n| Bob | 25 |";
        let html = process_tables(input);
        assert_eq!(html.matches("<tr>").count(), 3);
        assert_eq!(html.matches("<thead>").count(), 1);
        assert_eq!(html.matches("<tbody>").count(), 1);
        let alice = html.find("<td>Alice</td>").unwrap();
        let bob = html.find("<td>Bob</td>").unwrap();
        assert!(alice < bob);
    }

    #[test]
    fn test_alignment_separator_is_dropped() {
        let input = "| L | C | R |\n|:--|:-:|--:|\n| 1 | 2 | 3 |";
        let html = process_tables(input);
        assert!(!html.contains(":-"));
        assert_eq!(html.matches("<td>").count(), 3);
    }

    #[test]
    fn test_second_row_without_separator_is_body() {
        let input = "| a | b |\n| c | d |";
        let html = process_tables(input);
        assert!(html.contains("<tbody><tr><td>c</td><td>d</td></tr></tbody>"));
    }

    #[test]
    fn test_single_row_left_as_text() {
        assert_eq!(process_tables("| just | one |"), "| just | one |");
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let input = "Intro.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nOutro.";
        let html = process_tables(input);
        assert!(html.starts_with("Intro.\n\n<table"));
        assert!(html.ends_with("</table>\n\nOutro."));
    }

    #[test]
    fn test_cells_not_escaped_here() {
        let input = "| <b> | & |\n|---|---|";
        assert!(process_tables(input).contains("<th><b></th><th>&</th>"));
    }

    #[test]
    fn test_cell_emphasis() {
        let input = "| **a** | *b* |\n|---|---|";
        assert!(
            process_tables(input)
                .contains("<th><strong>a</strong></th><th><em>b</em></th>")
        );
    }

    #[test]
    fn test_emphasis_does_not_cross_cells() {
        let input = "| **a | b** |\n|---|---|\n| *c | d* |";
        let html = process_tables(input);
        assert!(html.contains("<th>**a</th><th>b**</th>"), "{html}");
        assert!(html.contains("<td>*c</td><td>d*</td>"), "{html}");
    }

    #[test]
    fn test_lone_pipe_is_not_a_row() {
        assert_eq!(process_tables("|"), "|");
    }
}
