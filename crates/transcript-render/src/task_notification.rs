//! Background task notifications.
//!
//! A notification is a small XML payload injected into a conversation when a
//! background task changes state:
//!
//! ```text
//! <task-notification>
//! <task-id>abc123</task-id>
//! <status>completed</status>
//! <summary>Agent "explore" completed</summary>
//! <result>Markdown report…</result>
//! </task-notification>
//! ```

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;
use crate::renderer::render;

/// Marker that identifies a notification payload.
const MARKER: &str = "<task-notification>";

/// Results longer than this many bytes are folded into `<details>`.
const COLLAPSE_THRESHOLD: usize = 300;

static TASK_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<task-id>(.*?)</task-id>").unwrap());

static STATUS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<status>(.*?)</status>").unwrap());

static SUMMARY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<summary>(.*?)</summary>").unwrap());

static RESULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<result>(.*?)</result>").unwrap());

/// Task state as shown in the notification header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    Running,
    Failed,
}

impl TaskStatus {
    /// Map a raw `<status>` value. Unknown values count as completed.
    #[must_use]
    pub fn from_raw(status: &str) -> Self {
        match status {
            "failed" | "error" => Self::Failed,
            "running" => Self::Running,
            _ => Self::Completed,
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Completed => "✓",
            Self::Running => "⏳",
            Self::Failed => "✗",
        }
    }

    /// Suffix of the header's `status-*` class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Running => "running",
            Self::Failed => "failed",
        }
    }
}

/// Fields of a parsed notification. Missing fields are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskNotification {
    pub task_id: String,
    pub status: String,
    pub summary: String,
    pub result: String,
}

impl TaskNotification {
    /// Parse a notification payload, or `None` if `content` is not one.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        if !content.contains(MARKER) {
            return None;
        }
        Some(Self {
            task_id: field(&TASK_ID_PATTERN, content),
            status: field(&STATUS_PATTERN, content),
            summary: field(&SUMMARY_PATTERN, content),
            result: field(&RESULT_PATTERN, content),
        })
    }

    #[must_use]
    pub fn task_status(&self) -> TaskStatus {
        TaskStatus::from_raw(&self.status)
    }

    /// Render the notification card. The result body goes through [`render`].
    #[must_use]
    pub fn to_html(&self) -> String {
        let status = self.task_status();
        let mut out = String::with_capacity(self.result.len() * 2 + 256);

        out.push_str(r#"<div class="task-notification">"#);
        write!(
            out,
            r#"<div class="task-notification-header status-{}"><span class="status-icon">{}</span> <span class="summary">{}</span>"#,
            status.class(),
            status.icon(),
            escape_html(&self.summary)
        )
        .unwrap();
        if !self.task_id.is_empty() {
            write!(
                out,
                r#" <span class="task-id-badge" title="Task ID">{}</span>"#,
                escape_html(&self.task_id)
            )
            .unwrap();
        }
        out.push_str("</div>\n");

        if !self.result.is_empty() {
            let body = format!(
                r#"<div class="task-result-content">{}</div>"#,
                render(&self.result)
            );
            if self.result.len() > COLLAPSE_THRESHOLD {
                write!(
                    out,
                    r#"<details class="task-notification-result"><summary>View result</summary>{body}</details>"#
                )
                .unwrap();
            } else {
                out.push_str(&body);
            }
        }

        out.push_str("</div>\n");
        out
    }
}

/// Render a task notification, or the escaped text if it is not one.
///
/// # Example
///
/// ```
/// use transcript_render::render_task_notification;
///
/// let html = render_task_notification(
///     "<task-notification><status>failed</status><summary>Build</summary></task-notification>",
/// );
/// assert!(html.contains(r#"<div class="task-notification-header status-failed">"#));
///
/// assert_eq!(render_task_notification("a < b"), r#"<div class="text">a &lt; b</div>"#);
/// ```
#[must_use]
pub fn render_task_notification(content: &str) -> String {
    match TaskNotification::parse(content) {
        Some(notification) => {
            tracing::debug!(
                task_id = %notification.task_id,
                status = notification.task_status().class(),
                "Rendering task notification"
            );
            notification.to_html()
        }
        None => format!(r#"<div class="text">{}</div>"#, escape_html(content)),
    }
}

fn field(pattern: &Regex, content: &str) -> String {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or_else(String::new, |m| m.as_str().trim().to_owned())
}
