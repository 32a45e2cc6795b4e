//! Terminal output utilities.
//!
//! Rendered HTML and listings go to stdout; status and errors go to stderr.

use std::io;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    out: Term,
    err: Term,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Write a rendered fragment to stdout, terminated by a newline.
    pub(crate) fn fragment(&self, html: &str) -> io::Result<()> {
        self.out.write_line(html.strip_suffix('\n').unwrap_or(html))
    }

    /// Write one listing line to stdout.
    pub(crate) fn line(&self, line: &str) -> io::Result<()> {
        self.out.write_line(line)
    }

    /// Print a status message (dimmed) to stderr.
    pub(crate) fn status(&self, msg: &str) {
        let _ = self.err.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print an error message (red) to stderr.
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
