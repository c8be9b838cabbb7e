//! Conversion configuration.

use serde::{Deserialize, Serialize};

/// How fixed-capacity mode sizes its buffer when no capacity hint is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityPolicy {
    /// Dry-run the parser against a counting sink. Exact, and reports parse
    /// errors before anything is allocated.
    #[default]
    Exact,
    /// Twice the source length. No specifier renders to more than twice its
    /// own length, and literal text never grows.
    ExpansionBound,
    /// 255 bytes for sources under 64 bytes, three times the length
    /// otherwise. Kept for parity with existing callers.
    Legacy,
}

/// Configuration for [`convert_fixed_with`](crate::convert_fixed_with).
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Sizing policy used when the caller gives no capacity hint.
    pub capacity: CapacityPolicy,
}
