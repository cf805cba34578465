//! Help listing and default-value export.
//!
//! Both walk the backend's flags in name order and apply the same
//! visibility filter; only the line format differs.

use std::io::{self, Write};

use tracing::warn;

use super::{FlagRegistry, VALUE_PLACEHOLDER};
use crate::backend::FlagBackend;
use crate::detail::Visibility;

/// Padding is skipped entirely when it would reach this many spaces.
const MAX_PADDING: usize = 80;

const FLAGFILE_OPTION: &str = "flagfile PATH";
const FLAGFILE_HELP: &str = "Line-delimited file of additional flags";

impl<B: FlagBackend> FlagRegistry<B> {
    /// Renders the help listing for `visibility`.
    ///
    /// Each line is `    --NAME`, then ` VALUE` for non-boolean flags,
    /// spaces up to the name column, two spaces and the description. CLI
    /// listings outside the shell start with a line for `--flagfile`.
    #[must_use]
    pub fn render_flags(&self, visibility: Visibility) -> String {
        let state = self.state.lock();
        let column = state.name_column();
        let mut out = String::new();

        if !visibility.shell && visibility.cli {
            let padding = column.saturating_sub(FLAGFILE_OPTION.len());
            out.push_str("    --");
            out.push_str(FLAGFILE_OPTION);
            out.push_str(&" ".repeat(padding));
            out.push_str("  ");
            out.push_str(FLAGFILE_HELP);
            out.push('\n');
        }

        for flag in state.listed(visibility) {
            out.push_str("    --");
            out.push_str(&flag.name);
            let mut used = flag.name.len();
            if flag.flag_type != "bool" {
                out.push_str(VALUE_PLACEHOLDER);
                used += VALUE_PLACEHOLDER.len();
            }
            let padding = column.saturating_sub(used);
            if padding > 0 && padding < MAX_PADDING {
                out.push_str(&" ".repeat(padding));
            }
            out.push_str("  ");
            out.push_str(&state.description(&flag.name));
            out.push('\n');
        }
        out
    }

    /// Writes the help listing for `visibility` to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the writer.
    pub fn write_flags<W: Write>(&self, out: &mut W, visibility: Visibility) -> io::Result<()> {
        out.write_all(self.render_flags(visibility).as_bytes())
    }

    /// Prints the help listing for `visibility` to standard output.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn print_flags(&self, visibility: Visibility) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(err) = self
            .write_flags(&mut handle, visibility)
            .and_then(|()| handle.flush())
        {
            warn!(error = %err, "failed to print flag listing");
        }
    }

    /// Writes `NAME=DEFAULT` for every flag the help listing for
    /// `visibility` would show.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the writer.
    pub fn dump_default_flags<W: Write>(
        &self,
        out: &mut W,
        visibility: Visibility,
    ) -> io::Result<()> {
        let listed = self.state.lock().listed(visibility);
        for flag in listed {
            writeln!(out, "{}={}", flag.name, flag.default_value)?;
        }
        Ok(())
    }
}
