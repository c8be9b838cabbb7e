//! Conversion entry points.

use crate::config::{CapacityPolicy, ConvertConfig};
use crate::error::FormatError;
use crate::estimate::estimate_capacity;
use crate::grammar::parser::transcode;
use crate::sink::{FixedBuffer, FixedSink, GrowableSink, OutputSink};

/// Convert a printf format string into a destination template.
///
/// ```
/// assert_eq!(fmtconv_core::convert("%-8.2f%%").unwrap(), "{d:<8.2}%");
/// ```
pub fn convert(source: &str) -> Result<String, FormatError> {
    let mut sink = GrowableSink::with_capacity(source.len());
    transcode(source, &mut sink)?;
    Ok(sink.into_string())
}

/// Convert into any [`OutputSink`].
///
/// On error the sink may hold a partial prefix of the output.
pub fn convert_with_sink<S: OutputSink + ?Sized>(
    source: &str,
    sink: &mut S,
) -> Result<(), FormatError> {
    transcode(source, sink)
}

/// Convert into caller-provided storage and return the number of bytes
/// written.
///
/// Fails with [`FormatError::CapacityExceeded`] if `buf` is too small; the
/// contents of `buf` are unspecified after any error.
pub fn convert_into(source: &str, buf: &mut [u8]) -> Result<usize, FormatError> {
    let mut sink = FixedSink::new(buf);
    transcode(source, &mut sink)?;
    Ok(sink.len())
}

/// Convert into a buffer whose capacity is fixed before writing starts.
///
/// `capacity_hint` is used when given, capped at the
/// [`CapacityPolicy::ExpansionBound`] for `source` since no output can be
/// longer. Otherwise the capacity is measured with a dry run
/// ([`CapacityPolicy::Exact`]).
pub fn convert_fixed(source: &str, capacity_hint: Option<usize>) -> Result<FixedBuffer, FormatError> {
    convert_fixed_with(source, capacity_hint, &ConvertConfig::default())
}

/// [`convert_fixed`] with an explicit sizing policy for the no-hint case.
pub fn convert_fixed_with(
    source: &str,
    capacity_hint: Option<usize>,
    config: &ConvertConfig,
) -> Result<FixedBuffer, FormatError> {
    let capacity = match capacity_hint {
        Some(hint) => hint.min(estimate_capacity(source, CapacityPolicy::ExpansionBound)?),
        None => estimate_capacity(source, config.capacity)?,
    };
    let mut storage = vec![0u8; capacity].into_boxed_slice();
    let len = convert_into(source, &mut storage)?;
    Ok(FixedBuffer::from_parts(storage, len))
}
