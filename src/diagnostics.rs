//! Error reporting for the alps CLI.
//!
//! Every fatal error is reported exactly once. Errors carrying a source
//! location are rendered as an [`ariadne`] report pointing at the
//! offending span in whichever file it lives, including files pulled in
//! by `include(...)`. When a rich report cannot be produced, a plain
//! `line:column`-prefixed message goes to stderr instead.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use alps::source::{SourceId, SourceMap};
use alps::token::Span;

use crate::driver::{CompileError, CompileErrorWithSources};

/// Prints a red-labeled ariadne report for a span in one source file.
fn print_span_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    message: &str,
) -> std::io::Result<()> {
    Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

/// Reports one error located at `span` in the buffer `source_id`.
fn report_at_span(sources: &SourceMap, source_id: SourceId, span: &Span, message: &str) {
    let filename = sources.name(source_id);
    let text = sources.text(source_id);
    // zero-width spans (end-of-input errors) still need a visible label
    let range = if span.start < span.end {
        span.start..span.end
    } else if text.is_empty() {
        0..0
    } else {
        let end = span.start.min(text.len());
        end.saturating_sub(1)..end
    };

    if let Err(report_err) = print_span_report(filename, text, range, message) {
        eprintln!(
            "Error: {} (at {}:{}:{})",
            message, filename, span.line, span.column
        );
        eprintln!("(Failed to display detailed error report: {})", report_err);
    }
}

/// Reports a compile error to stderr.
pub(crate) fn report_error(error: &CompileErrorWithSources) {
    let sources = error.sources();
    match error.error() {
        CompileError::Lex(e) => {
            report_at_span(sources, e.source, &e.span, &e.message);
        }
        CompileError::Parse(e) => {
            report_at_span(sources, e.source, &e.span, &e.message);
        }
        CompileError::Emit(e) => match (&e.span, &e.source) {
            (Some(span), Some(source_id)) => {
                report_at_span(sources, *source_id, span, &e.message);
            }
            _ => eprintln!("Error: {}", e.message),
        },
        CompileError::FileRead { .. } | CompileError::OutputWrite { .. } => {
            eprintln!("Error: {}", error.error());
        }
    }
}
