//! Evaluation settings.

use patch_diagnostic::TraceStyle;

/// Nested user-function calls allowed by default.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Settings shared by every context derived from one builder.
#[derive(Clone, Debug)]
pub struct LangConfig {
    trace_style: TraceStyle,
    max_call_depth: Option<usize>,
}

impl LangConfig {
    pub fn new() -> Self {
        LangConfig {
            trace_style: TraceStyle::Full,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }

    /// How hosts should print the cause chain of an error.
    #[inline]
    pub fn trace_style(&self) -> TraceStyle {
        self.trace_style
    }

    /// `None` means no limit beyond available memory.
    #[inline]
    pub fn max_call_depth(&self) -> Option<usize> {
        self.max_call_depth
    }

    #[must_use]
    pub fn with_trace_style(mut self, style: TraceStyle) -> Self {
        self.trace_style = style;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for LangConfig {
    fn default() -> Self {
        Self::new()
    }
}
