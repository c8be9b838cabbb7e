//! Lossy-approximation notes for format strings that convert successfully.

use std::collections::BTreeMap;

use fmtconv_diagnostics::{Diagnostic, codes};

use crate::error::FormatError;
use crate::grammar::field::Flag;
use crate::grammar::parser::{Segment, Specifier, scan};

/// Report every place where `source` converts with information loss.
///
/// Returns the parse error instead if `source` does not convert at all.
/// Notes are ordered by position; within one specifier, conversion notes
/// come before flag notes, which come before the length modifier.
pub fn lint(source: &str) -> Result<Vec<Diagnostic>, FormatError> {
    let mut notes = Vec::new();
    for segment in scan(source)? {
        if let Segment::Specifier(spec) = segment {
            lint_specifier(&spec, &mut notes);
        }
    }
    Ok(notes)
}

fn lint_specifier(spec: &Specifier, notes: &mut Vec<Diagnostic>) {
    let conv = spec.conversion.as_char();
    if let Some(loss) = spec.conversion.approximation() {
        notes.push(note(
            spec,
            format!("'%{conv}' is approximated: {loss}"),
            [("conversion", conv.to_string())],
        ));
    }
    for flag in spec.field.flags.iter() {
        let effect = match flag {
            Flag::Plus => "forced sign",
            Flag::Space => "space sign",
            Flag::Hash => "alternate form",
            Flag::Minus | Flag::Zero => continue,
        };
        notes.push(note(
            spec,
            format!("flag '{}' ({effect}) has no destination spelling and is dropped", flag.as_char()),
            [("flag", flag.as_char().to_string())],
        ));
    }
    if let Some(length) = spec.field.length {
        notes.push(note(
            spec,
            format!("length modifier '{}' is dropped", length.as_str()),
            [("length", length.as_str().to_string())],
        ));
    }
}

fn note<const N: usize>(
    spec: &Specifier,
    message: String,
    ctx: [(&str, String); N],
) -> Diagnostic {
    let ctx: BTreeMap<String, String> = ctx.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    Diagnostic::from_code(codes::LOSSY_APPROXIMATION, message, Some(spec.span)).with_context(ctx)
}
