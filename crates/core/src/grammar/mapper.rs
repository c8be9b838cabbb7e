//! Conversion character → destination specifier table.
//!
//! One authoritative table; see the crate docs for the approximations it
//! makes.

use serde::{Deserialize, Serialize};

/// Destination rendering behavior, rendered as the tag inside `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationSpecifier {
    /// Decimal number (`d`).
    Decimal,
    /// Lowercase hexadecimal (`x`).
    Hex,
    /// Uppercase hexadecimal (`X`).
    HexUpper,
    /// Octal (`o`).
    Octal,
    /// Scientific notation (`e`).
    Scientific,
    /// String (`s`).
    String,
    /// Single character (`c`).
    Char,
    /// Pointer address (`*`).
    Address,
}

impl DestinationSpecifier {
    /// The tag written between the braces.
    pub fn tag(self) -> &'static str {
        match self {
            DestinationSpecifier::Decimal => "d",
            DestinationSpecifier::Hex => "x",
            DestinationSpecifier::HexUpper => "X",
            DestinationSpecifier::Octal => "o",
            DestinationSpecifier::Scientific => "e",
            DestinationSpecifier::String => "s",
            DestinationSpecifier::Char => "c",
            DestinationSpecifier::Address => "*",
        }
    }
}

/// A supported source conversion character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum ConversionChar {
    /// `d`
    SignedDecimal,
    /// `i`
    Integer,
    /// `u`
    Unsigned,
    /// `f`
    Float,
    /// `F`
    FloatUpper,
    /// `e`
    Exponent,
    /// `E`
    ExponentUpper,
    /// `g`
    General,
    /// `G`
    GeneralUpper,
    /// `x`
    Hex,
    /// `X`
    HexUpper,
    /// `o`
    Octal,
    /// `s`
    String,
    /// `c`
    Char,
    /// `p`
    Pointer,
    /// `a`
    HexFloat,
    /// `A`
    HexFloatUpper,
}

/// Outcome of looking up a character in the conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A supported conversion.
    Supported(ConversionChar),
    /// Valid printf, but the destination grammar cannot express it.
    NoEquivalent,
    /// Not a conversion character at all.
    Unknown,
}

/// Look up a source character.
pub fn lookup(c: char) -> Lookup {
    match ConversionChar::from_char(c) {
        Some(conv) => Lookup::Supported(conv),
        None if c == 'n' => Lookup::NoEquivalent,
        None => Lookup::Unknown,
    }
}

impl ConversionChar {
    /// Every supported conversion, in table order.
    pub const ALL: [ConversionChar; 17] = [
        ConversionChar::SignedDecimal,
        ConversionChar::Integer,
        ConversionChar::Unsigned,
        ConversionChar::Float,
        ConversionChar::FloatUpper,
        ConversionChar::Exponent,
        ConversionChar::ExponentUpper,
        ConversionChar::General,
        ConversionChar::GeneralUpper,
        ConversionChar::Hex,
        ConversionChar::HexUpper,
        ConversionChar::Octal,
        ConversionChar::String,
        ConversionChar::Char,
        ConversionChar::Pointer,
        ConversionChar::HexFloat,
        ConversionChar::HexFloatUpper,
    ];

    /// Classify a source character.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' => ConversionChar::SignedDecimal,
            'i' => ConversionChar::Integer,
            'u' => ConversionChar::Unsigned,
            'f' => ConversionChar::Float,
            'F' => ConversionChar::FloatUpper,
            'e' => ConversionChar::Exponent,
            'E' => ConversionChar::ExponentUpper,
            'g' => ConversionChar::General,
            'G' => ConversionChar::GeneralUpper,
            'x' => ConversionChar::Hex,
            'X' => ConversionChar::HexUpper,
            'o' => ConversionChar::Octal,
            's' => ConversionChar::String,
            'c' => ConversionChar::Char,
            'p' => ConversionChar::Pointer,
            'a' => ConversionChar::HexFloat,
            'A' => ConversionChar::HexFloatUpper,
            _ => return None,
        })
    }

    /// The source character.
    pub fn as_char(self) -> char {
        match self {
            ConversionChar::SignedDecimal => 'd',
            ConversionChar::Integer => 'i',
            ConversionChar::Unsigned => 'u',
            ConversionChar::Float => 'f',
            ConversionChar::FloatUpper => 'F',
            ConversionChar::Exponent => 'e',
            ConversionChar::ExponentUpper => 'E',
            ConversionChar::General => 'g',
            ConversionChar::GeneralUpper => 'G',
            ConversionChar::Hex => 'x',
            ConversionChar::HexUpper => 'X',
            ConversionChar::Octal => 'o',
            ConversionChar::String => 's',
            ConversionChar::Char => 'c',
            ConversionChar::Pointer => 'p',
            ConversionChar::HexFloat => 'a',
            ConversionChar::HexFloatUpper => 'A',
        }
    }

    /// Map to the destination specifier. Total over the supported set.
    pub fn destination(self) -> DestinationSpecifier {
        use ConversionChar as C;
        use DestinationSpecifier as D;
        match self {
            C::SignedDecimal | C::Integer | C::Unsigned => D::Decimal,
            C::Float | C::FloatUpper | C::General | C::GeneralUpper => D::Decimal,
            C::Exponent | C::ExponentUpper => D::Scientific,
            C::Hex | C::HexFloat => D::Hex,
            C::HexUpper | C::HexFloatUpper => D::HexUpper,
            C::Octal => D::Octal,
            C::String => D::String,
            C::Char => D::Char,
            C::Pointer => D::Address,
        }
    }

    /// Describes what the mapping loses, for conversions that are only
    /// approximated by their destination tag.
    pub fn approximation(self) -> Option<&'static str> {
        match self {
            ConversionChar::Unsigned => Some("unsigned distinction is not represented"),
            ConversionChar::General | ConversionChar::GeneralUpper => {
                Some("shortest-representation selection is lost; rendered as decimal")
            }
            ConversionChar::HexFloat | ConversionChar::HexFloatUpper => {
                Some("hexadecimal floating point has no destination tag; rendered as hex")
            }
            ConversionChar::ExponentUpper | ConversionChar::FloatUpper => {
                Some("uppercase exponent/infinity spelling is not represented")
            }
            _ => None,
        }
    }
}

impl From<ConversionChar> for char {
    fn from(conv: ConversionChar) -> Self {
        conv.as_char()
    }
}

impl TryFrom<char> for ConversionChar {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        ConversionChar::from_char(c).ok_or_else(|| format!("unsupported conversion character '{c}'"))
    }
}
