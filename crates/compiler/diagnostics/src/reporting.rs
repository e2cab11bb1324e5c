//! # Diagnostic Rendering
//!
//! Renders diagnostics against the source text they point into.

use crate::Diagnostic;
use ariadne::{Label, Report, Source};

/// Build a formatted message for a single diagnostic
///
/// Falls back to the plain `Display` form when the report cannot be written.
pub fn build_diagnostic_message(source: &str, diagnostic: &Diagnostic, with_color: bool) -> String {
    let mut write_buffer = Vec::new();
    let code_u32: u32 = diagnostic.code.into();
    let mut report = Report::build(
        diagnostic.severity.into(),
        ((), diagnostic.span.into_range()),
    )
    .with_config(
        ariadne::Config::new()
            .with_index_type(ariadne::IndexType::Byte)
            .with_color(with_color),
    )
    .with_code(code_u32)
    .with_message(&diagnostic.message)
    .with_label(Label::new(((), diagnostic.span.into_range())).with_message(&diagnostic.message));

    for (span, note) in &diagnostic.related_spans {
        report = report.with_label(Label::new(((), span.into_range())).with_message(note));
    }

    if report
        .finish()
        .write(Source::from(source), &mut write_buffer)
        .is_err()
    {
        return diagnostic.to_string();
    }
    String::from_utf8_lossy(&write_buffer).to_string()
}
