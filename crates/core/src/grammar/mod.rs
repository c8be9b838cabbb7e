/// JSON serialization helpers for scanned segments.
pub mod dump;
/// Specifier fields: flags, width, precision, and length modifiers.
pub mod field;
/// Conversion character → destination specifier table.
pub mod mapper;
/// Format string state machine and its drivers.
pub mod parser;
/// Destination block renderer.
pub mod render;
