use super::parser::Segment;

/// Serialize scanned segments to a pretty-printed JSON string.
pub fn to_pretty_json(segments: &[Segment<'_>]) -> String {
    serde_json::to_string_pretty(segments).expect("segment serialization cannot fail")
}
