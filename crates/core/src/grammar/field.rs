use serde::{Deserialize, Serialize};

/// Maximum number of distinct flags a single specifier may carry.
pub const MAX_FLAGS: usize = 5;

/// A printf flag character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// `-`: left-justify within the field width.
    Minus,
    /// `+`: always print a sign.
    Plus,
    /// `' '`: print a space in place of a positive sign.
    Space,
    /// `#`: alternate form.
    Hash,
    /// `0`: pad with zeros.
    Zero,
}

impl Flag {
    /// All flags in canonical order.
    pub const ALL: [Flag; MAX_FLAGS] = [Flag::Minus, Flag::Plus, Flag::Space, Flag::Hash, Flag::Zero];

    /// Classify a source character as a flag.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Flag::Minus),
            '+' => Some(Flag::Plus),
            ' ' => Some(Flag::Space),
            '#' => Some(Flag::Hash),
            '0' => Some(Flag::Zero),
            _ => None,
        }
    }

    /// The source character for this flag.
    pub fn as_char(self) -> char {
        match self {
            Flag::Minus => '-',
            Flag::Plus => '+',
            Flag::Space => ' ',
            Flag::Hash => '#',
            Flag::Zero => '0',
        }
    }

    fn bit(self) -> u8 {
        match self {
            Flag::Minus => 1,
            Flag::Plus => 1 << 1,
            Flag::Space => 1 << 2,
            Flag::Hash => 1 << 3,
            Flag::Zero => 1 << 4,
        }
    }
}

/// Unordered set of flags, stored as a bitmask.
///
/// Serializes as the flag characters in canonical order (e.g. `"-0"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Flags(u8);

impl Flags {
    /// An empty flag set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add `flag`. Returns `false` (and leaves the set unchanged) if it was
    /// already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        if self.contains(flag) {
            return false;
        }
        self.0 |= flag.bit();
        true
    }

    /// Whether `flag` is in the set.
    pub fn contains(&self, flag: Flag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Number of flags in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over the flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl From<Flags> for String {
    fn from(flags: Flags) -> Self {
        flags.iter().map(Flag::as_char).collect()
    }
}

impl From<String> for Flags {
    fn from(s: String) -> Self {
        let mut flags = Flags::empty();
        for flag in s.chars().filter_map(Flag::from_char) {
            flags.insert(flag);
        }
        flags
    }
}

/// Argument-size length modifier. Read and validated, never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthModifier {
    /// `hh`
    #[serde(rename = "hh")]
    Hh,
    /// `h`
    #[serde(rename = "h")]
    H,
    /// `l`
    #[serde(rename = "l")]
    L,
    /// `ll`
    #[serde(rename = "ll")]
    Ll,
    /// `j`
    #[serde(rename = "j")]
    J,
    /// `z`
    #[serde(rename = "z")]
    Z,
    /// `t`
    #[serde(rename = "t")]
    T,
    /// `L`
    #[serde(rename = "L")]
    BigL,
}

impl LengthModifier {
    /// Classify the first character of a length modifier.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(LengthModifier::H),
            'l' => Some(LengthModifier::L),
            'j' => Some(LengthModifier::J),
            'z' => Some(LengthModifier::Z),
            't' => Some(LengthModifier::T),
            'L' => Some(LengthModifier::BigL),
            _ => None,
        }
    }

    /// Complete a two-letter modifier. Only `hh` and `ll` exist.
    pub fn extend(self, next: LengthModifier) -> Option<Self> {
        match (self, next) {
            (LengthModifier::H, LengthModifier::H) => Some(LengthModifier::Hh),
            (LengthModifier::L, LengthModifier::L) => Some(LengthModifier::Ll),
            _ => None,
        }
    }

    /// Source spelling of the modifier.
    pub fn as_str(self) -> &'static str {
        match self {
            LengthModifier::Hh => "hh",
            LengthModifier::H => "h",
            LengthModifier::L => "l",
            LengthModifier::Ll => "ll",
            LengthModifier::J => "j",
            LengthModifier::Z => "z",
            LengthModifier::T => "t",
            LengthModifier::BigL => "L",
        }
    }
}

/// Fields accumulated while parsing one `%`-clause.
///
/// Filled in grammar order (flags, width, precision, length) and consumed
/// when the conversion character arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecifierField {
    /// Flag set.
    #[serde(skip_serializing_if = "Flags::is_empty", default)]
    pub flags: Flags,
    /// Minimum field width.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<u32>,
    /// Precision, present only when at least one digit followed `.`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub precision: Option<u32>,
    /// Length modifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub length: Option<LengthModifier>,
}
