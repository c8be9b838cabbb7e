//! printf → brace-template format string conversion.
//!
//! Reads a C `printf` conversion string and writes the equivalent
//! `{tag:fill align width.precision}` template:
//!
//! ```
//! let out = fmtconv_core::convert("User %s has %d points (%.2f%%)").unwrap();
//! assert_eq!(out, "User {s} has {d} points ({d:.2}%)");
//! ```
//!
//! The main entry points are [`convert`] for growable output and
//! [`convert_fixed`] for output whose capacity is fixed before writing.
//! Both run the same single-pass state machine ([`grammar::parser`]) over
//! an [`OutputSink`].
//!
//! # Approximations
//!
//! The destination grammar is smaller than printf's. These conversions
//! succeed with information loss (reported by [`lint`]):
//!
//! - `%u` renders as `{d}`; signedness is not represented.
//! - `%f`, `%F`, `%g`, `%G` render as `{d}`; `%g` loses its
//!   shortest-representation selection.
//! - `%E` renders as `{e}`, `%F` as `{d}`; uppercase spelling is lost.
//! - `%a`/`%A` fall back to `{x}`/`{X}`.
//! - `%p` renders as the address tag `{*}`.
//! - The `+`, space, and `#` flags and all length modifiers are dropped.
//!
//! `%n` has no equivalent and is rejected.

#![warn(missing_docs)]

pub mod config;
pub mod convert;
pub mod error;
pub mod estimate;
/// Grammar: fields, mapping table, state machine, and renderer.
pub mod grammar;
pub mod lint;
pub mod sink;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Conversion
pub use convert::{convert, convert_fixed, convert_fixed_with, convert_into, convert_with_sink};

// Configuration and sizing
pub use config::{CapacityPolicy, ConvertConfig};
pub use estimate::estimate_capacity;

// Errors and diagnostics
pub use error::FormatError;
pub use fmtconv_diagnostics::{Diagnostic, Severity, Span, codes, explain};
pub use lint::lint;

// Grammar
pub use grammar::field::{Flag, Flags, LengthModifier, SpecifierField};
pub use grammar::mapper::{ConversionChar, DestinationSpecifier};
pub use grammar::parser::{ParseState, Segment, Specifier, scan};

// Sinks
pub use sink::{CountingSink, FixedBuffer, FixedSink, GrowableSink, OutputSink};

// Serialization helpers
pub use grammar::dump::to_pretty_json;
