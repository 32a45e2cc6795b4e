//! Ordered, unordered and task lists with indentation-based nesting.
//!
//! Lines are scanned top to bottom against a stack of open [`ListFrame`]s.
//! Indentation on the stack strictly increases from bottom to top:
//! - a deeper item opens a nested list;
//! - a shallower item closes every deeper list;
//! - an item of another kind at the same depth closes the current list and
//!   opens one of the new kind;
//! - any non-list line, and the end of input, closes everything.

use std::sync::LazyLock;

use regex::Regex;

use crate::tags::GeneratedTag;

static TASK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)- \[([ xX])\] (.+)$").unwrap());

static UNORDERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*] (.+)$").unwrap());

static ORDERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\. (.+)$").unwrap());

/// Kind of list a frame represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
    Task,
}

impl ListKind {
    fn open_tag(self) -> GeneratedTag {
        match self {
            Self::Unordered => GeneratedTag::UnorderedListOpen,
            Self::Ordered => GeneratedTag::OrderedListOpen,
            Self::Task => GeneratedTag::TaskListOpen,
        }
    }

    fn close_tag(self) -> GeneratedTag {
        match self {
            Self::Unordered | Self::Task => GeneratedTag::UnorderedListClose,
            Self::Ordered => GeneratedTag::OrderedListClose,
        }
    }
}

/// One currently open list.
#[derive(Clone, Copy, Debug)]
struct ListFrame {
    kind: ListKind,
    indent: usize,
}

/// Recognized list line.
struct ListItem<'a> {
    kind: ListKind,
    indent: usize,
    checked: bool,
    text: &'a str,
}

impl ListItem<'_> {
    /// Item markup. Text is left for the escaper.
    fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 64);
        if self.kind == ListKind::Task {
            out.push_str(GeneratedTag::TaskItemOpen.as_str());
            let checkbox = if self.checked {
                GeneratedTag::CheckboxChecked
            } else {
                GeneratedTag::CheckboxUnchecked
            };
            out.push_str(checkbox.as_str());
            out.push(' ');
        } else {
            out.push_str(GeneratedTag::ItemOpen.as_str());
        }
        out.push_str(self.text);
        out.push_str(GeneratedTag::ItemClose.as_str());
        out
    }
}

/// Checkbox prefixes that never start a plain unordered item.
const CHECKBOX_PREFIXES: [&str; 3] = ["- [ ]", "- [x]", "- [X]"];

/// Classify a line. Task items are checked before plain unordered items.
///
/// A checkbox without task text (`- [ ]` alone) is not an item at all.
fn parse_item(line: &str) -> Option<ListItem<'_>> {
    if let Some(caps) = TASK_PATTERN.captures(line) {
        return Some(ListItem {
            kind: ListKind::Task,
            indent: caps.get(1)?.as_str().len(),
            checked: &caps[2] != " ",
            text: caps.get(3)?.as_str(),
        });
    }
    let trimmed = line.trim_start();
    if CHECKBOX_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
        return None;
    }
    if let Some(caps) = UNORDERED_PATTERN.captures(line) {
        return Some(ListItem {
            kind: ListKind::Unordered,
            indent: caps.get(1)?.as_str().len(),
            checked: false,
            text: caps.get(2)?.as_str(),
        });
    }
    let caps = ORDERED_PATTERN.captures(line)?;
    Some(ListItem {
        kind: ListKind::Ordered,
        indent: caps.get(1)?.as_str().len(),
        checked: false,
        text: caps.get(2)?.as_str(),
    })
}

/// Stack of open lists plus the lines emitted so far.
struct ListBuilder {
    stack: Vec<ListFrame>,
    out: Vec<String>,
}

impl ListBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            out: Vec::new(),
        }
    }

    fn open(&mut self, kind: ListKind, indent: usize) {
        self.stack.push(ListFrame { kind, indent });
        self.out.push(kind.open_tag().as_str().to_owned());
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.out.push(frame.kind.close_tag().as_str().to_owned());
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
    }

    fn item(&mut self, item: &ListItem<'_>) {
        match self.stack.last().copied() {
            None => self.open(item.kind, item.indent),
            Some(top) if item.indent > top.indent => self.open(item.kind, item.indent),
            Some(top) => {
                if item.indent < top.indent {
                    while self.stack.last().is_some_and(|f| f.indent > item.indent) {
                        self.close_top();
                    }
                }
                match self.stack.last().copied() {
                    // Dedented past the outermost list.
                    None => self.open(item.kind, item.indent),
                    Some(frame) if frame.kind != item.kind => {
                        self.close_top();
                        self.open(item.kind, item.indent);
                    }
                    Some(_) => {}
                }
            }
        }
        self.out.push(item.to_html());
    }

    fn line(&mut self, line: &str) {
        self.close_all();
        self.out.push(line.to_owned());
    }

    fn finish(mut self) -> String {
        self.close_all();
        self.out.join("\n")
    }
}

/// Convert list lines into `<ul>`/`<ol>` markup, one tag or item per line.
pub(crate) fn process_lists(content: &str) -> String {
    let mut builder = ListBuilder::new();
    for line in content.split('\n') {
        match parse_item(line) {
            Some(item) => builder.item(&item),
            None => builder.line(line),
        }
    }
    builder.finish()
}
