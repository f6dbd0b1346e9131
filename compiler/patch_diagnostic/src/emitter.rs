//! Terminal Emitter
//!
//! Writes rendered errors to a terminal with optional ANSI color support.

use std::io::{self, Write};

use crate::render::{render_report, Painter};
use crate::{PositionedError, TraceStyle};

/// ANSI color codes for terminal output.
pub(crate) mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color` flag.
    pub fn from_flag(flag: &str) -> Option<ColorMode> {
        match flag {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    style: TraceStyle,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            style: TraceStyle::default(),
        }
    }

    /// Select how cause chains are printed.
    #[must_use]
    pub fn with_trace_style(mut self, style: TraceStyle) -> Self {
        self.style = style;
        self
    }

    /// Write one error and its cause chain, followed by a newline.
    pub fn emit(&mut self, error: &dyn PositionedError) {
        let report = render_report(error, self.style, Painter { colors: self.colors });
        let _ = writeln!(self.writer, "{report}");
    }

    pub fn emit_all<E: PositionedError>(&mut self, errors: &[E]) {
        for error in errors {
            self.emit(error);
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}
