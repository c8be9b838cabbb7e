//! Single-pass state machine over a printf format string.
//!
//! [`Machine`] consumes one character at a time and reports what it means:
//! a literal to copy, a collapsed `%%`, a completed [`Specifier`], or nothing
//! yet. [`transcode`] drives it into an [`OutputSink`]; [`scan`] drives it
//! into a segment list for tooling. Both share the exact same grammar.

use std::fmt;

use serde::Serialize;

use crate::error::FormatError;
use crate::grammar::field::{Flag, LengthModifier, MAX_FLAGS, SpecifierField};
use crate::grammar::mapper::{ConversionChar, Lookup, lookup};
use crate::grammar::render::render_specifier;
use crate::sink::OutputSink;
use fmtconv_diagnostics::Span;

// ── States ──────────────────────────────────────────────────────────────

/// Which grammar positions are legal next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseState {
    /// Outside any specifier. Initial and the only accepting state.
    #[default]
    Start,
    /// Just read `%`.
    PercentFound,
    /// Reading flags.
    FlagsFound,
    /// Reading width digits.
    WidthFound,
    /// Read `.`, a digit must follow.
    DotFound,
    /// Reading precision digits.
    PrecisionFound,
    /// Read one length character; `hh`/`ll` may still complete.
    LengthFound(LengthModifier),
    /// Two-letter length modifier complete; only a conversion may follow.
    SpecifierAwaited,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseState::Start => f.write_str("start"),
            ParseState::PercentFound => f.write_str("after '%'"),
            ParseState::FlagsFound => f.write_str("flags"),
            ParseState::WidthFound => f.write_str("width"),
            ParseState::DotFound => f.write_str("after '.'"),
            ParseState::PrecisionFound => f.write_str("precision"),
            ParseState::LengthFound(lm) => write!(f, "length modifier '{}'", lm.as_str()),
            ParseState::SpecifierAwaited => f.write_str("awaiting conversion"),
        }
    }
}

/// Input character class. `0` is reported as `Digit(0)`; whether it acts as
/// a flag depends on the state.
#[derive(Debug, Clone, Copy)]
enum Class {
    Percent,
    Flag(Flag),
    Digit(u32),
    Dot,
    Length(LengthModifier),
    Conversion(ConversionChar),
    NoEquivalent(char),
    UnknownLetter(char),
    Other(char),
}

impl Class {
    fn of(c: char) -> Self {
        if let Some(d) = c.to_digit(10) {
            return Class::Digit(d);
        }
        if let Some(flag) = Flag::from_char(c) {
            return Class::Flag(flag);
        }
        if let Some(lm) = LengthModifier::from_char(c) {
            return Class::Length(lm);
        }
        match c {
            '%' => Class::Percent,
            '.' => Class::Dot,
            _ => match lookup(c) {
                Lookup::Supported(conv) => Class::Conversion(conv),
                Lookup::NoEquivalent => Class::NoEquivalent(c),
                Lookup::Unknown if c.is_ascii_alphabetic() => Class::UnknownLetter(c),
                Lookup::Unknown => Class::Other(c),
            },
        }
    }
}

// ── Output of one step ──────────────────────────────────────────────────

/// A completed conversion specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Specifier {
    /// Accumulated flags, width, precision, and length modifier.
    pub field: SpecifierField,
    /// The conversion character that closed the clause.
    pub conversion: ConversionChar,
    /// Source span from `%` through the conversion character.
    pub span: Span,
}

/// What a single character meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Copy this character to the output.
    Literal(char),
    /// Consumed as part of an unfinished specifier.
    Pending,
    /// Second `%` of a `%%` escape.
    Percent,
    /// A specifier is complete.
    Specifier(Specifier),
}

// ── Machine ─────────────────────────────────────────────────────────────

/// Finite-state recognizer for printf conversion specifiers.
///
/// Holds at most one live [`SpecifierField`]. After every completed or
/// collapsed clause the machine is back in [`ParseState::Start`].
#[derive(Debug, Clone, Default)]
pub struct Machine {
    state: ParseState,
    field: SpecifierField,
    clause_start: usize,
}

impl Machine {
    /// A machine in the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Feed the character `c` found at byte offset `at`.
    pub fn step(&mut self, at: usize, c: char) -> Result<Step, FormatError> {
        use ParseState as S;

        let state = self.state;
        let class = Class::of(c);

        let next = match (state, class) {
            (S::Start, Class::Percent) => {
                self.clause_start = at;
                self.field = SpecifierField::default();
                S::PercentFound
            }
            (S::Start, _) => return Ok(Step::Literal(c)),

            (S::PercentFound, Class::Percent) => {
                self.state = S::Start;
                return Ok(Step::Percent);
            }

            // Missing precision digits take priority over every other
            // classification of the character after a dot.
            (S::DotFound, Class::Digit(d)) => {
                self.field.precision = Some(d);
                S::PrecisionFound
            }
            (S::DotFound, _) => return Err(FormatError::MissingPrecisionDigits { at }),

            (S::PercentFound | S::FlagsFound, Class::Digit(0)) => {
                self.push_flag(Flag::Zero, at)?;
                S::FlagsFound
            }
            (S::PercentFound | S::FlagsFound, Class::Flag(flag)) => {
                self.push_flag(flag, at)?;
                S::FlagsFound
            }
            (S::PercentFound | S::FlagsFound, Class::Digit(d)) => {
                self.field.width = Some(d);
                S::WidthFound
            }
            (S::WidthFound, Class::Digit(d)) => {
                self.field.width = Some(accumulate(self.field.width, d, at)?);
                S::WidthFound
            }
            (S::PrecisionFound, Class::Digit(d)) => {
                self.field.precision = Some(accumulate(self.field.precision, d, at)?);
                S::PrecisionFound
            }

            (S::PercentFound | S::FlagsFound | S::WidthFound, Class::Dot) => S::DotFound,

            (
                S::PercentFound | S::FlagsFound | S::WidthFound | S::PrecisionFound,
                Class::Length(lm),
            ) => {
                self.field.length = Some(lm);
                S::LengthFound(lm)
            }
            (S::LengthFound(first), Class::Length(second)) => match first.extend(second) {
                Some(lm) => {
                    self.field.length = Some(lm);
                    S::SpecifierAwaited
                }
                None => return Err(self.invalid(c, at)),
            },

            (_, Class::Conversion(conversion)) => {
                let spec = Specifier {
                    field: self.field,
                    conversion,
                    span: Span::new(self.clause_start, at + c.len_utf8()),
                };
                self.state = S::Start;
                self.field = SpecifierField::default();
                return Ok(Step::Specifier(spec));
            }
            (_, Class::NoEquivalent(conversion)) => {
                return Err(FormatError::NoDestinationEquivalent { conversion, at });
            }
            (_, Class::UnknownLetter(found)) => {
                return Err(FormatError::UnknownConversionCharacter { found, at });
            }
            _ => return Err(self.invalid(c, at)),
        };

        self.state = next;
        Ok(Step::Pending)
    }

    /// Signal end of input at byte offset `end`.
    ///
    /// Fails with [`FormatError::UnterminatedSpecifier`] unless the machine
    /// is back in [`ParseState::Start`].
    pub fn finish(&self, end: usize) -> Result<(), FormatError> {
        match self.state {
            ParseState::Start => Ok(()),
            _ => Err(FormatError::UnterminatedSpecifier {
                start: self.clause_start,
                end,
            }),
        }
    }

    fn push_flag(&mut self, flag: Flag, at: usize) -> Result<(), FormatError> {
        if self.field.flags.len() >= MAX_FLAGS || !self.field.flags.insert(flag) {
            return Err(FormatError::InvalidFlag {
                flag: flag.as_char(),
                at,
            });
        }
        Ok(())
    }

    fn invalid(&self, found: char, at: usize) -> FormatError {
        FormatError::InvalidCharacterInSpecifier {
            found,
            state: self.state,
            at,
        }
    }
}

fn accumulate(current: Option<u32>, digit: u32, at: usize) -> Result<u32, FormatError> {
    current
        .unwrap_or(0)
        .checked_mul(10)
        .and_then(|n| n.checked_add(digit))
        .ok_or(FormatError::NumericOverflow { at })
}

// ── Drivers ─────────────────────────────────────────────────────────────

/// Convert `source` into `sink` in a single pass.
///
/// On error the sink may hold a partial prefix; callers discard it.
pub fn transcode<S: OutputSink + ?Sized>(source: &str, sink: &mut S) -> Result<(), FormatError> {
    let mut machine = Machine::new();
    for (at, c) in source.char_indices() {
        match machine.step(at, c)? {
            Step::Literal(c) => sink.append_char(c)?,
            Step::Percent => sink.append_char('%')?,
            Step::Pending => {}
            Step::Specifier(spec) => render_specifier(&spec, sink)?,
        }
    }
    machine.finish(source.len())
}

/// A piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<'a> {
    /// A run of literal text.
    Literal {
        /// The text, borrowed from the source.
        text: &'a str,
        /// Source span of the run.
        span: Span,
    },
    /// A `%%` escape.
    Percent {
        /// Source span of both characters.
        span: Span,
    },
    /// A conversion specifier.
    Specifier(Specifier),
}

/// Parse `source` into literal runs, escapes, and specifiers.
pub fn scan(source: &str) -> Result<Vec<Segment<'_>>, FormatError> {
    let mut segments = Vec::new();
    let mut machine = Machine::new();
    let mut literal_start: Option<usize> = None;

    for (at, c) in source.char_indices() {
        let step = machine.step(at, c)?;
        // Only the `%` opening a clause can end a literal run.
        if !matches!(step, Step::Literal(_))
            && let Some(start) = literal_start.take()
        {
            push_literal(&mut segments, source, start, at);
        }
        match step {
            Step::Literal(_) => {
                literal_start.get_or_insert(at);
            }
            Step::Pending => {}
            Step::Percent => segments.push(Segment::Percent {
                span: Span::new(at - 1, at + 1),
            }),
            Step::Specifier(spec) => segments.push(Segment::Specifier(spec)),
        }
    }
    machine.finish(source.len())?;
    if let Some(start) = literal_start {
        push_literal(&mut segments, source, start, source.len());
    }
    Ok(segments)
}

fn push_literal<'a>(segments: &mut Vec<Segment<'a>>, source: &'a str, start: usize, end: usize) {
    if end > start {
        segments.push(Segment::Literal {
            text: &source[start..end],
            span: Span::new(start, end),
        });
    }
}
