//! Closed set of HTML tags the block transformers emit.
//!
//! Every transformer writes its markup through [`GeneratedTag::as_str`], and
//! the escaper lets a `<` through only when the text at that position is
//! exactly one of these strings. A tag that is not listed here cannot survive
//! escaping, whatever attributes it carries.

/// Heading level (`#` through `######`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// All levels, shallowest first.
    pub const ALL: [Self; 6] = [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

    /// Level from the number of leading `#` markers.
    #[must_use]
    pub fn from_markers(count: usize) -> Option<Self> {
        Self::ALL.get(count.checked_sub(1)?).copied()
    }
}

/// A tag produced by the pipeline, with its exact markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratedTag {
    HeadingOpen(HeadingLevel),
    HeadingClose(HeadingLevel),
    UnorderedListOpen,
    TaskListOpen,
    UnorderedListClose,
    OrderedListOpen,
    OrderedListClose,
    ItemOpen,
    TaskItemOpen,
    ItemClose,
    CheckboxUnchecked,
    CheckboxChecked,
    TableOpen,
    TableClose,
    TheadOpen,
    TheadClose,
    TbodyOpen,
    TbodyClose,
    RowOpen,
    RowClose,
    HeaderCellOpen,
    HeaderCellClose,
    CellOpen,
    CellClose,
    BlockquoteOpen,
    BlockquoteClose,
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
}

/// Whitelist in match order.
const WHITELIST: [GeneratedTag; 40] = [
    GeneratedTag::HeadingOpen(HeadingLevel::H1),
    GeneratedTag::HeadingOpen(HeadingLevel::H2),
    GeneratedTag::HeadingOpen(HeadingLevel::H3),
    GeneratedTag::HeadingOpen(HeadingLevel::H4),
    GeneratedTag::HeadingOpen(HeadingLevel::H5),
    GeneratedTag::HeadingOpen(HeadingLevel::H6),
    GeneratedTag::HeadingClose(HeadingLevel::H1),
    GeneratedTag::HeadingClose(HeadingLevel::H2),
    GeneratedTag::HeadingClose(HeadingLevel::H3),
    GeneratedTag::HeadingClose(HeadingLevel::H4),
    GeneratedTag::HeadingClose(HeadingLevel::H5),
    GeneratedTag::HeadingClose(HeadingLevel::H6),
    GeneratedTag::UnorderedListOpen,
    GeneratedTag::TaskListOpen,
    GeneratedTag::UnorderedListClose,
    GeneratedTag::OrderedListOpen,
    GeneratedTag::OrderedListClose,
    GeneratedTag::ItemOpen,
    GeneratedTag::TaskItemOpen,
    GeneratedTag::ItemClose,
    GeneratedTag::CheckboxUnchecked,
    GeneratedTag::CheckboxChecked,
    GeneratedTag::TableOpen,
    GeneratedTag::TableClose,
    GeneratedTag::TheadOpen,
    GeneratedTag::TheadClose,
    GeneratedTag::TbodyOpen,
    GeneratedTag::TbodyClose,
    GeneratedTag::RowOpen,
    GeneratedTag::RowClose,
    GeneratedTag::HeaderCellOpen,
    GeneratedTag::HeaderCellClose,
    GeneratedTag::CellOpen,
    GeneratedTag::CellClose,
    GeneratedTag::BlockquoteOpen,
    GeneratedTag::BlockquoteClose,
    GeneratedTag::StrongOpen,
    GeneratedTag::StrongClose,
    GeneratedTag::EmOpen,
    GeneratedTag::EmClose,
];

impl GeneratedTag {
    /// Exact markup written into the output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeadingOpen(level) => match level {
                HeadingLevel::H1 => r#"<h1 class="md-h1">"#,
                HeadingLevel::H2 => r#"<h2 class="md-h2">"#,
                HeadingLevel::H3 => r#"<h3 class="md-h3">"#,
                HeadingLevel::H4 => r#"<h4 class="md-h4">"#,
                HeadingLevel::H5 => r#"<h5 class="md-h5">"#,
                HeadingLevel::H6 => r#"<h6 class="md-h6">"#,
            },
            Self::HeadingClose(level) => match level {
                HeadingLevel::H1 => "</h1>",
                HeadingLevel::H2 => "</h2>",
                HeadingLevel::H3 => "</h3>",
                HeadingLevel::H4 => "</h4>",
                HeadingLevel::H5 => "</h5>",
                HeadingLevel::H6 => "</h6>",
            },
            Self::UnorderedListOpen => r#"<ul class="md-ul">"#,
            Self::TaskListOpen => r#"<ul class="md-task-list">"#,
            Self::UnorderedListClose => "</ul>",
            Self::OrderedListOpen => r#"<ol class="md-ol">"#,
            Self::OrderedListClose => "</ol>",
            Self::ItemOpen => "<li>",
            Self::TaskItemOpen => r#"<li class="task-item">"#,
            Self::ItemClose => "</li>",
            Self::CheckboxUnchecked => r#"<input type="checkbox" disabled>"#,
            Self::CheckboxChecked => r#"<input type="checkbox" checked disabled>"#,
            Self::TableOpen => r#"<table class="md-table">"#,
            Self::TableClose => "</table>",
            Self::TheadOpen => "<thead>",
            Self::TheadClose => "</thead>",
            Self::TbodyOpen => "<tbody>",
            Self::TbodyClose => "</tbody>",
            Self::RowOpen => "<tr>",
            Self::RowClose => "</tr>",
            Self::HeaderCellOpen => "<th>",
            Self::HeaderCellClose => "</th>",
            Self::CellOpen => "<td>",
            Self::CellClose => "</td>",
            Self::BlockquoteOpen => r#"<blockquote class="md-blockquote">"#,
            Self::BlockquoteClose => "</blockquote>",
            Self::StrongOpen => "<strong>",
            Self::StrongClose => "</strong>",
            Self::EmOpen => "<em>",
            Self::EmClose => "</em>",
        }
    }

    /// Generated tag that `text` starts with, if any.
    #[must_use]
    pub fn match_prefix(text: &str) -> Option<Self> {
        if !text.starts_with('<') {
            return None;
        }
        WHITELIST
            .into_iter()
            .find(|tag| text.starts_with(tag.as_str()))
    }
}
