//! Conversion error taxonomy.

use std::collections::BTreeMap;

use fmtconv_diagnostics::{Diagnostic, Span, codes};

use crate::grammar::parser::ParseState;

/// Why a conversion was aborted.
///
/// Offsets (`at`, `start`, `end`) are byte offsets into the source string.
/// Every variant except [`FormatError::CapacityExceeded`] is a property of
/// the input; retrying the same input yields the same error.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A flag was repeated, or more than five flags were given.
    #[error("invalid flag '{flag}' at offset {at}: flags may appear at most once")]
    InvalidFlag {
        /// The offending flag character.
        flag: char,
        /// Offset of the flag.
        at: usize,
    },

    /// A character is not allowed in the current grammar position.
    #[error("unexpected {found:?} at offset {at} ({state})")]
    InvalidCharacterInSpecifier {
        /// The offending character.
        found: char,
        /// Parser state when it was read.
        state: ParseState,
        /// Offset of the character.
        at: usize,
    },

    /// A `.` was not followed by at least one digit.
    #[error("missing precision digits after '.' at offset {at}")]
    MissingPrecisionDigits {
        /// Offset of the character after the dot.
        at: usize,
    },

    /// The input ended inside a specifier.
    #[error("unterminated conversion specifier starting at offset {start}")]
    UnterminatedSpecifier {
        /// Offset of the opening `%`.
        start: usize,
        /// End of input.
        end: usize,
    },

    /// A letter outside the supported conversion set.
    #[error("unknown conversion character {found:?} at offset {at}")]
    UnknownConversionCharacter {
        /// The offending character.
        found: char,
        /// Offset of the character.
        at: usize,
    },

    /// The conversion exists in printf but not in the destination grammar.
    #[error("conversion '%{conversion}' at offset {at} has no destination equivalent")]
    NoDestinationEquivalent {
        /// The conversion character.
        conversion: char,
        /// Offset of the character.
        at: usize,
    },

    /// A fixed-capacity sink ran out of room.
    #[error("output exceeds fixed capacity ({required} bytes needed, capacity {capacity})")]
    CapacityExceeded {
        /// Capacity of the sink in bytes.
        capacity: usize,
        /// Bytes the failing write would have required.
        required: usize,
    },

    /// Width or precision does not fit in a `u32`.
    #[error("width or precision too large at offset {at}")]
    NumericOverflow {
        /// Offset of the digit that overflowed.
        at: usize,
    },
}

impl FormatError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::InvalidFlag { .. } => codes::INVALID_FLAG,
            FormatError::InvalidCharacterInSpecifier { .. } => codes::INVALID_CHARACTER,
            FormatError::MissingPrecisionDigits { .. } => codes::MISSING_PRECISION_DIGITS,
            FormatError::UnterminatedSpecifier { .. } => codes::UNTERMINATED_SPECIFIER,
            FormatError::UnknownConversionCharacter { .. } => codes::UNKNOWN_CONVERSION,
            FormatError::NoDestinationEquivalent { .. } => codes::NO_DESTINATION_EQUIVALENT,
            FormatError::CapacityExceeded { .. } => codes::CAPACITY_EXCEEDED,
            FormatError::NumericOverflow { .. } => codes::NUMERIC_OVERFLOW,
        }
    }

    /// Source span the error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        match *self {
            FormatError::InvalidFlag { at, flag } => Some(Span::new(at, at + flag.len_utf8())),
            FormatError::InvalidCharacterInSpecifier { at, found, .. }
            | FormatError::UnknownConversionCharacter { at, found } => {
                Some(Span::new(at, at + found.len_utf8()))
            }
            FormatError::NoDestinationEquivalent { at, conversion } => {
                Some(Span::new(at, at + conversion.len_utf8()))
            }
            // Points at the dot itself; `at` may start a multi-byte character.
            FormatError::MissingPrecisionDigits { at } => Some(Span::new(at.saturating_sub(1), at)),
            FormatError::NumericOverflow { at } => Some(Span::new(at, at + 1)),
            FormatError::UnterminatedSpecifier { start, end } => Some(Span::new(start, end)),
            FormatError::CapacityExceeded { .. } => None,
        }
    }

    /// True for errors caused by the input rather than by output sizing.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, FormatError::CapacityExceeded { .. })
    }

    fn context(&self) -> BTreeMap<String, String> {
        let mut ctx = BTreeMap::new();
        match self {
            FormatError::InvalidFlag { flag, .. } => {
                ctx.insert("flag".into(), flag.to_string());
            }
            FormatError::InvalidCharacterInSpecifier { found, state, .. } => {
                ctx.insert("found".into(), found.to_string());
                ctx.insert("state".into(), state.to_string());
            }
            FormatError::UnknownConversionCharacter { found, .. } => {
                ctx.insert("found".into(), found.to_string());
            }
            FormatError::NoDestinationEquivalent { conversion, .. } => {
                ctx.insert("conversion".into(), conversion.to_string());
            }
            FormatError::CapacityExceeded { capacity, required } => {
                ctx.insert("capacity".into(), capacity.to_string());
                ctx.insert("required".into(), required.to_string());
            }
            FormatError::MissingPrecisionDigits { .. }
            | FormatError::UnterminatedSpecifier { .. }
            | FormatError::NumericOverflow { .. } => {}
        }
        ctx
    }
}

impl From<&FormatError> for Diagnostic {
    fn from(err: &FormatError) -> Self {
        let diag = Diagnostic::from_code(err.code(), err.to_string(), err.span());
        let ctx = err.context();
        if ctx.is_empty() {
            diag
        } else {
            diag.with_context(ctx)
        }
    }
}
