//! Field renderer: writes one destination block `{tag[:fill align width.precision]}`.

use crate::error::FormatError;
use crate::grammar::field::{Flag, SpecifierField};
use crate::grammar::mapper::DestinationSpecifier;
use crate::grammar::parser::Specifier;
use crate::sink::OutputSink;

/// Render a completed specifier through the mapping table.
pub fn render_specifier<S: OutputSink + ?Sized>(
    spec: &Specifier,
    sink: &mut S,
) -> Result<(), FormatError> {
    render_field(spec.conversion.destination(), &spec.field, sink)
}

/// Render `field` as a block tagged `tag`.
///
/// `-` renders as left alignment and wins over `0`, which renders as a
/// zero fill with right alignment. Without either flag the destination's
/// defaults apply and no fill/alignment is written. Length modifiers and
/// the `+`, space, and `#` flags have no destination spelling.
pub fn render_field<S: OutputSink + ?Sized>(
    tag: DestinationSpecifier,
    field: &SpecifierField,
    sink: &mut S,
) -> Result<(), FormatError> {
    sink.append_char('{')?;
    sink.append_str(tag.tag())?;

    let align = if field.flags.contains(Flag::Minus) {
        Some("<")
    } else if field.flags.contains(Flag::Zero) {
        Some("0>")
    } else {
        None
    };

    if align.is_none() && field.width.is_none() && field.precision.is_none() {
        return sink.append_char('}');
    }

    sink.append_char(':')?;
    if let Some(align) = align {
        sink.append_str(align)?;
    }
    if let Some(width) = field.width {
        sink.append_decimal(width)?;
    }
    if let Some(precision) = field.precision {
        sink.append_char('.')?;
        sink.append_decimal(precision)?;
    }
    sink.append_char('}')
}
