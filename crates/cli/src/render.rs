//! Pretty diagnostic rendering using ariadne.
//!
//! Turns [`Diagnostic`]s into ariadne [`Report`]s that underline the
//! offending part of the format string. Colour is used only when stderr is
//! a terminal.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use fmtconv_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format selected by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Converted text on stdout, ariadne diagnostics on stderr.
    Pretty,
    /// A single JSON object on stdout.
    Json,
}

impl Format {
    /// Resolve the `--output` flag. Converted text is the primary output, so
    /// the default is pretty even when stdout is piped.
    pub(crate) fn resolve(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            _ => Format::Pretty,
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Info => Color::Blue,
        _ => Color::Yellow,
    }
}

fn context_note(ctx: &BTreeMap<String, String>) -> String {
    ctx.iter()
        .map(|(k, v)| format!("{k}={v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics against `source` on stderr.
///
/// Spanned diagnostics underline the offending characters of the format
/// string. Unspanned ones (capacity errors) print as a single line.
pub(crate) fn render_diagnostics_pretty(source: &str, name: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let color = io::stderr().is_terminal();
    // Diagnostic spans are byte offsets into the format string.
    let config = Config::default()
        .with_compact(false)
        .with_color(color)
        .with_index_type(IndexType::Byte);
    let mut cache = (name, Source::from(source));

    for diag in diagnostics {
        let Some(span) = diag.span else {
            eprintln!("{}[{}]: {}", diag.severity, diag.id, diag.message);
            if let Some(ctx) = &diag.context {
                eprintln!("  = note: {}", context_note(ctx));
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // Clamp to the source so a bad span cannot panic the renderer.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let label = Label::new((name, start..end))
            .with_message(label_text(source, start..end))
            .with_color(severity_color(diag.severity));

        let mut report = Report::build(report_kind(diag.severity), (name, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(label);
        if let Some(ctx) = &diag.context {
            report = report.with_note(context_note(ctx));
        }
        if let Some(explanation) = diag.explain() {
            report = report.with_help(explanation);
        }
        report.finish().eprint(&mut cache).ok();
    }
}

/// Label for an underlined range: the exact source text, or a marker for
/// the end of input.
fn label_text(source: &str, range: std::ops::Range<usize>) -> String {
    match source.get(range) {
        Some("") | None => "end of format string".to_string(),
        Some(text) => format!("here: {text:?}"),
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a summary line such as `1 error, 2 warnings` on stderr.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;
    if diagnostics.is_empty() {
        return;
    }

    let color = io::stderr().is_terminal();
    let paint = |text: String, c: Color| {
        if color {
            text.fg(c).to_string()
        } else {
            text
        }
    };

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(paint(format!("{errors} error{s}"), Color::Red));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(paint(format!("{warnings} warning{s}"), Color::Yellow));
    }
    eprintln!("{}", parts.join(", "));
}
