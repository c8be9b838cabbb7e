//! Capacity estimation for fixed-capacity conversion.

use crate::config::CapacityPolicy;
use crate::error::FormatError;
use crate::grammar::parser::transcode;
use crate::sink::{CountingSink, OutputSink};

/// Sources shorter than this get [`LEGACY_SHORT_CAPACITY`] bytes.
pub const LEGACY_SHORT_INPUT: usize = 64;
/// Fixed allocation for short sources under [`CapacityPolicy::Legacy`].
pub const LEGACY_SHORT_CAPACITY: usize = 255;
/// Per-byte multiplier for long sources under [`CapacityPolicy::Legacy`].
pub const LEGACY_FACTOR: usize = 3;
/// Worst-case output bytes per source byte.
pub const EXPANSION_FACTOR: usize = 2;

/// Bytes needed to hold the conversion of `source` under `policy`.
///
/// Only [`CapacityPolicy::Exact`] parses the input, so it is the only policy
/// that can fail. The heuristic policies trust the later write pass to
/// report grammar errors.
pub fn estimate_capacity(source: &str, policy: CapacityPolicy) -> Result<usize, FormatError> {
    match policy {
        CapacityPolicy::Exact => {
            let mut counter = CountingSink::new();
            transcode(source, &mut counter)?;
            Ok(counter.len())
        }
        CapacityPolicy::ExpansionBound => Ok(source.len().saturating_mul(EXPANSION_FACTOR)),
        CapacityPolicy::Legacy => Ok(if source.len() < LEGACY_SHORT_INPUT {
            LEGACY_SHORT_CAPACITY
        } else {
            source.len().saturating_mul(LEGACY_FACTOR)
        }),
    }
}
