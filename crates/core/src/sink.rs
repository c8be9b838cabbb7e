//! Output sinks for converted text.
//!
//! The parser is generic over [`OutputSink`]; the same grammar drives a
//! growable `String`, a caller-provided fixed buffer, and a counting-only
//! sink used for capacity estimation.

use std::fmt;

use crate::error::FormatError;

/// Append-only destination for converted output.
///
/// Writes are order-preserving. Only fixed-capacity sinks can fail, with
/// [`FormatError::CapacityExceeded`].
pub trait OutputSink {
    /// Append a single character.
    fn append_char(&mut self, c: char) -> Result<(), FormatError>;

    /// Append a string.
    fn append_str(&mut self, s: &str) -> Result<(), FormatError> {
        for c in s.chars() {
            self.append_char(c)?;
        }
        Ok(())
    }

    /// Append the decimal digits of `n`.
    fn append_decimal(&mut self, n: u32) -> Result<(), FormatError> {
        let mut digits = [0u8; 10];
        let mut i = digits.len();
        let mut n = n;
        loop {
            i -= 1;
            digits[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for &b in &digits[i..] {
            self.append_char(char::from(b))?;
        }
        Ok(())
    }

    /// Bytes written so far.
    fn len(&self) -> usize;

    /// Whether nothing has been written.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Growable ────────────────────────────────────────────────────────────

/// Heap-backed sink that grows as needed.
#[derive(Debug, Clone, Default)]
pub struct GrowableSink {
    buf: String,
}

impl GrowableSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink with preallocated room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Output written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Take ownership of the output.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl OutputSink for GrowableSink {
    fn append_char(&mut self, c: char) -> Result<(), FormatError> {
        self.buf.push(c);
        Ok(())
    }

    fn append_str(&mut self, s: &str) -> Result<(), FormatError> {
        self.buf.push_str(s);
        Ok(())
    }

    fn len(&self) -> usize {
        self.buf.len()
    }
}

// ── Fixed ───────────────────────────────────────────────────────────────

/// Sink over caller-provided storage. Never resized.
///
/// A write that does not fit fails with [`FormatError::CapacityExceeded`]
/// and leaves the already-written prefix untouched.
pub struct FixedSink<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> FixedSink<'a> {
    /// Wrap `buf`; its length is the capacity.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// Written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Written output as text.
    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 sequences are ever written.
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl OutputSink for FixedSink<'_> {
    fn append_char(&mut self, c: char) -> Result<(), FormatError> {
        let mut utf8 = [0u8; 4];
        self.append_str(c.encode_utf8(&mut utf8))
    }

    fn append_str(&mut self, s: &str) -> Result<(), FormatError> {
        let bytes = s.as_bytes();
        let required = self.len + bytes.len();
        if required > self.buf.len() {
            return Err(FormatError::CapacityExceeded {
                capacity: self.buf.len(),
                required,
            });
        }
        self.buf[self.len..required].copy_from_slice(bytes);
        self.len = required;
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Debug for FixedSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedSink")
            .field("capacity", &self.capacity())
            .field("written", &self.as_str())
            .finish()
    }
}

/// Owned fixed-capacity output, allocated once before the write pass.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedBuffer {
    storage: Box<[u8]>,
    len: usize,
}

impl FixedBuffer {
    pub(crate) fn from_parts(storage: Box<[u8]>, len: usize) -> Self {
        debug_assert!(len <= storage.len());
        Self { storage, len }
    }

    /// Capacity the buffer was allocated with.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Length of the converted output in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Converted output bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Converted output as text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Copy the output into an owned `String`.
    pub fn into_string(self) -> String {
        self.as_str().to_owned()
    }
}

impl AsRef<str> for FixedBuffer {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FixedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FixedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuffer")
            .field("capacity", &self.capacity())
            .field("output", &self.as_str())
            .finish()
    }
}

impl PartialEq<str> for FixedBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FixedBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ── Counting ────────────────────────────────────────────────────────────

/// Sink that only tracks how many bytes would be written.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSink {
    len: usize,
}

impl CountingSink {
    /// Create a sink at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for CountingSink {
    fn append_char(&mut self, c: char) -> Result<(), FormatError> {
        self.len += c.len_utf8();
        Ok(())
    }

    fn append_str(&mut self, s: &str) -> Result<(), FormatError> {
        self.len += s.len();
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }
}
