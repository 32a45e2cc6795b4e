//! `transcript blocks` command implementation.

use std::path::PathBuf;

use clap::Args;
use transcript_render::{CodeBlock, extract_code_blocks};

use crate::error::CliError;
use crate::input::read_input;
use crate::output::Output;

/// Arguments for the blocks command.
#[derive(Args)]
pub(crate) struct BlocksArgs {
    /// Message file to scan (default: stdin).
    file: Option<PathBuf>,
}

impl BlocksArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let content = read_input(self.file.as_deref())?;
        let blocks = extract_code_blocks(&content);
        for (index, block) in blocks.iter().enumerate() {
            output.line(&describe(index, block))?;
        }

        let noun = if blocks.len() == 1 { "block" } else { "blocks" };
        output.status(&format!("{} code {noun}", blocks.len()));
        Ok(())
    }
}

/// One listing line: index, language, byte range, line count.
fn describe(index: usize, block: &CodeBlock) -> String {
    let language = if block.language.is_empty() {
        "text"
    } else {
        block.language.as_str()
    };
    format!(
        "{index}\t{language}\t{}..{}\t{}",
        block.start,
        block.end,
        block.code.lines().count()
    )
}
