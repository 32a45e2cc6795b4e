//! Safe HTML rendering for conversation transcripts.
//!
//! Assistant messages are rendered from a practical subset of Markdown with
//! [`render`]. User messages and background task notifications have their own
//! formatters ([`format_user_content`], [`render_task_notification`]).
//!
//! Every renderer treats its input as untrusted: the only markup in the output
//! is markup the renderer generated itself.
//!
//! # Pipeline
//!
//! [`render`] runs a fixed sequence of string passes:
//!
//! 1. Replace input NUL bytes, which delimit internal tokens.
//! 2. Swap fenced code blocks, inline code, images and links for tokens held
//!    in a [`vault::Vault`], rendering their HTML up front.
//! 3. Rewrite tables, lists, blockquotes, rules, headings and emphasis.
//! 4. Escape everything except tokens and [`GeneratedTag`] markup.
//! 5. Turn remaining newlines into `<br>` outside block elements.
//! 6. Restore tokens.
//!
//! # Example
//!
//! ```
//! use transcript_render::render;
//!
//! let html = render("## Steps\n\n1. Run `make`\n2. Done <3");
//! assert_eq!(
//!     html,
//!     concat!(
//!         r#"<h2 class="md-h2">Steps</h2>"#,
//!         r#"<ol class="md-ol"><li>Run <code class="inline-code">make</code></li>"#,
//!         "<li>Done &lt;3</li></ol>",
//!     )
//! );
//! ```

mod block;
mod breaks;
mod escape;
mod fence;
mod inline;
mod renderer;
mod tags;
mod task_notification;
mod user_content;
pub mod vault;

pub use escape::{escape_html, escape_remaining};
pub use fence::{CodeBlock, extract_code_blocks, render_code_block};
pub use renderer::render;
pub use tags::{GeneratedTag, HeadingLevel};
pub use task_notification::{TaskNotification, TaskStatus, render_task_notification};
pub use user_content::format_user_content;
