//! `transcript render` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use transcript_config::{CliSettings, Config, ContentKind};
use transcript_render::{format_user_content, render, render_task_notification};

use crate::error::CliError;
use crate::input::read_input;
use crate::output::Output;

/// Content kind as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum KindArg {
    /// Markdown (assistant messages).
    Markdown,
    /// Plain user text with tool output blocks.
    User,
    /// Task notification payload.
    Task,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Markdown => Self::Markdown,
            KindArg::User => Self::User,
            KindArg::Task => Self::Task,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Message file to render (default: stdin).
    file: Option<PathBuf>,

    /// How to interpret the message (overrides config).
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Wrap the fragment in the transcript message container (overrides config).
    #[arg(long, overrides_with = "no_wrap")]
    wrap: bool,

    /// Emit the bare fragment even if the config enables wrapping.
    #[arg(long, overrides_with = "wrap")]
    no_wrap: bool,

    /// Path to configuration file (default: auto-discover transcript.toml).
    #[arg(short, long, env = "TRANSCRIPT_CONFIG")]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            kind: self.kind.map(ContentKind::from),
            wrap: self.wrap_setting(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let content = read_input(self.file.as_deref())?;
        let html = render_content(config.render.kind, config.render.wrap, &content);
        tracing::debug!(
            kind = %config.render.kind,
            input_bytes = content.len(),
            output_bytes = html.len(),
            "Rendered message"
        );

        output.fragment(&html)?;
        Ok(())
    }

    /// Wrapping override from `--wrap`/`--no-wrap`. The last flag given wins.
    fn wrap_setting(&self) -> Option<bool> {
        if self.wrap {
            Some(true)
        } else if self.no_wrap {
            Some(false)
        } else {
            None
        }
    }
}

/// Render `content` as `kind`, optionally inside the message container.
fn render_content(kind: ContentKind, wrap: bool, content: &str) -> String {
    let (html, container) = match kind {
        ContentKind::Markdown => (render(content), "text markdown-content"),
        ContentKind::User => (format_user_content(content), "text user-content"),
        ContentKind::Task => return render_task_notification(content),
    };
    if wrap {
        format!(r#"<div class="{container}">{html}</div>"#)
    } else {
        html
    }
}
