//! Plain-text rendering of positioned errors.

use std::sync::Arc;

use patch_ir::{SourceSpan, TAB_WIDTH};

use crate::emitter::colors;
use crate::{PositionedError, TraceStyle};

/// A formatted source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub text: String,
    /// Single-row span with sane bounds; only these get a source snippet.
    pub well_behaved: bool,
}

impl Location {
    fn broken(text: String) -> Self {
        Location {
            text,
            well_behaved: false,
        }
    }
}

/// Format a span as `file row:col`, `file row:col-col` or
/// `file row:col - row:col`, or `unknown` when there is no span.
pub fn format_location(span: Option<&SourceSpan>) -> Location {
    let Some(span) = span else {
        return Location::broken("unknown".to_string());
    };
    let (from, to) = (span.from(), span.to());

    if !Arc::ptr_eq(from.file(), to.file()) {
        return Location::broken(format!(
            "error: inconsistent file (from: {from:?}, to: {to:?})"
        ));
    }
    if from.row() > to.row() || (from.row() == to.row() && from.column() > to.column()) {
        return Location::broken(format!(
            "error: unexpected position order (from: {from:?}, to: {to:?})"
        ));
    }
    if from.column() == 0 || to.column() + 1 < from.column() {
        return Location::broken(format!(
            "error: broken position (from: {from:?}, to: {to:?})"
        ));
    }

    let name = from.file().name();
    if from.row() != to.row() {
        return Location::broken(format!(
            "{name} {}:{} - {}:{}",
            from.row(),
            from.column(),
            to.row(),
            to.column()
        ));
    }

    let text = if from.column() == to.column() {
        format!("{name} {}:{}", from.row(), from.column())
    } else {
        format!("{name} {}:{}-{}", from.row(), from.column(), to.column())
    };
    Location {
        text,
        well_behaved: true,
    }
}

/// Render an error and its cause chain without colors.
pub fn render(error: &dyn PositionedError, style: TraceStyle) -> String {
    render_report(error, style, Painter { colors: false })
}

#[derive(Clone, Copy)]
pub(crate) struct Painter {
    pub(crate) colors: bool,
}

impl Painter {
    fn paint(self, out: &mut String, text: &str, color: &str) {
        if self.colors {
            out.push_str(color);
            out.push_str(text);
            out.push_str(colors::RESET);
        } else {
            out.push_str(text);
        }
    }
}

pub(crate) fn render_report(error: &dyn PositionedError, style: TraceStyle, paint: Painter) -> String {
    let mut out = String::from("\n| ");
    paint.paint(&mut out, error.base_message(), colors::ERROR);
    out.push_str("\n| ");
    fill_in_error(&mut out, error, paint);

    if style == TraceStyle::Short {
        out.push_str("\n|");
    }

    let mut next = PositionedError::cause(error);
    while let Some(cause) = next {
        match style {
            TraceStyle::Full => {
                out.push_str("\n| \n| ");
                paint.paint(&mut out, "Caused by:", colors::NOTE);
                out.push_str("\n| ");
                fill_in_error(&mut out, cause, paint);
            }
            TraceStyle::Short => {
                out.push_str("\n| ");
                paint.paint(&mut out, "Caused by:", colors::NOTE);
                out.push(' ');
                out.push_str(cause.message());
                out.push_str(" at ");
                out.push_str(&format_location(cause.span()).text);
            }
        }
        next = PositionedError::cause(cause);
    }

    out
}

fn fill_in_error(out: &mut String, error: &dyn PositionedError, paint: Painter) {
    out.push_str("  ");
    out.push_str(error.message());
    out.push_str("\n| ");

    let span = error.span();
    let location = format_location(span);
    paint.paint(out, "Location:", colors::BOLD);
    out.push(' ');
    out.push_str(&location.text);

    let Some(span) = span else { return };
    if !location.well_behaved {
        return;
    }
    let (from, to) = (span.from(), span.to());
    let row = from.file().row_text(from.row()).unwrap_or_default();

    out.push_str("\n| ");
    out.push_str(&row.replace('\t', &" ".repeat(TAB_WIDTH as usize)));
    out.push_str("\n| ");
    out.push_str(&" ".repeat(from.column() as usize - 1));
    let carets = "^".repeat((to.column() - from.column() + 1) as usize);
    paint.paint(out, &carets, colors::ERROR);
    out.push_str(" here");
}

#[cfg(test)]
mod tests;
