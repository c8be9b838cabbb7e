//! C FFI bindings for fmtconv.
//!
//! All functions accept null-terminated C strings. Functions returning
//! `*mut c_char` hand back heap-allocated strings that the caller MUST free
//! with `fmtconv_free()`. Functions returning `isize` report a byte count on
//! success and one of the negative `FMTCONV_ERR_*` codes on failure.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use fmtconv_core::{CapacityPolicy, Diagnostic, FormatError, convert, estimate_capacity, lint};
use serde::Serialize;

/// A pointer argument was NULL or not valid UTF-8.
pub const FMTCONV_ERR_INVALID_ARG: isize = -1;
/// The format string is malformed or has no destination equivalent.
pub const FMTCONV_ERR_FORMAT: isize = -2;
/// The output (plus its NUL terminator) does not fit the caller's buffer.
pub const FMTCONV_ERR_CAPACITY: isize = -3;
/// The call panicked; the panic was caught at the boundary.
pub const FMTCONV_ERR_PANIC: isize = -4;

// ── Envelopes ───────────────────────────────────────────────────────────

/// JSON result of [`fmtconv_convert`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ConvertEnvelope {
    Converted {
        ok: bool,
        output: String,
        notes: Vec<Diagnostic>,
    },
    Failed {
        ok: bool,
        diagnostics: Vec<Diagnostic>,
    },
}

impl ConvertEnvelope {
    fn build(source: &str) -> Self {
        let result = convert(source).and_then(|output| Ok((output, lint(source)?)));
        match result {
            Ok((output, notes)) => ConvertEnvelope::Converted {
                ok: true,
                output,
                notes,
            },
            Err(err) => ConvertEnvelope::Failed {
                ok: false,
                diagnostics: vec![Diagnostic::from(&err)],
            },
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Convert a C string pointer to a Rust `&str`. Returns `None` if null or invalid UTF-8.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Allocate a C string from a Rust string. Returns null on failure.
fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(|c| c.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Serialize a value to a JSON C string.
fn to_json_c<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => to_c_string(&json),
        Err(_) => ptr::null_mut(),
    }
}

fn panic_payload_to_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "unknown panic payload".to_string()
}

/// Run a string-returning entrypoint and convert panics into a JSON error.
fn guard_ffi_json<F>(f: F) -> *mut c_char
where
    F: FnOnce() -> *mut c_char,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(ptr) => ptr,
        Err(payload) => {
            let out = serde_json::json!({
                "ok": false,
                "error": "ffi_panic",
                "message": panic_payload_to_message(payload),
            });
            to_json_c(&out)
        }
    }
}

/// Run a count-returning entrypoint and map panics to [`FMTCONV_ERR_PANIC`].
fn guard_ffi_len<F>(f: F) -> isize
where
    F: FnOnce() -> isize,
{
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(FMTCONV_ERR_PANIC)
}

/// Run an FFI free function and swallow panics to prevent unwind across FFI.
fn guard_ffi_void<F>(f: F)
where
    F: FnOnce(),
{
    let _ = catch_unwind(AssertUnwindSafe(f));
}

fn error_code(err: &FormatError) -> isize {
    if err.is_input_error() {
        FMTCONV_ERR_FORMAT
    } else {
        FMTCONV_ERR_CAPACITY
    }
}

fn byte_count(n: usize) -> isize {
    isize::try_from(n).unwrap_or(FMTCONV_ERR_CAPACITY)
}

// ── Public API ──────────────────────────────────────────────────────────

/// Convert a printf format string. Returns a JSON string:
/// `{ "ok": true, "output": ..., "notes": [...] }` on success or
/// `{ "ok": false, "diagnostics": [...] }` on failure.
///
/// The caller MUST free the returned pointer with `fmtconv_free()`.
/// Returns NULL on invalid input.
///
/// # Safety
///
/// `source` must be a valid, null-terminated C string pointer (or NULL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fmtconv_convert(source: *const c_char) -> *mut c_char {
    guard_ffi_json(|| {
        let Some(source) = (unsafe { cstr_to_str(source) }) else {
            return ptr::null_mut();
        };
        to_json_c(&ConvertEnvelope::build(source))
    })
}

/// Convert a printf format string into caller-provided storage.
///
/// Writes the converted text followed by a NUL terminator into `buf`, which
/// holds `capacity` bytes. Returns the length of the text (excluding the
/// NUL). On failure returns a negative `FMTCONV_ERR_*` code and, if
/// `capacity > 0`, leaves an empty string in `buf`.
///
/// Use [`fmtconv_estimate`] to size `buf` exactly.
///
/// # Safety
///
/// `source` must be a valid, null-terminated C string pointer (or NULL).
/// `buf` must be NULL or point to at least `capacity` writable bytes that
/// are not accessed by anything else during the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fmtconv_convert_into(
    source: *const c_char,
    buf: *mut c_char,
    capacity: usize,
) -> isize {
    guard_ffi_len(|| {
        let Some(source) = (unsafe { cstr_to_str(source) }) else {
            return FMTCONV_ERR_INVALID_ARG;
        };
        if buf.is_null() {
            return FMTCONV_ERR_INVALID_ARG;
        }
        if capacity == 0 {
            return FMTCONV_ERR_CAPACITY;
        }
        let storage = unsafe { std::slice::from_raw_parts_mut(buf.cast::<u8>(), capacity) };

        // Reserve the last byte for the terminator.
        match fmtconv_core::convert_into(source, &mut storage[..capacity - 1]) {
            Ok(len) => {
                storage[len] = 0;
                byte_count(len)
            }
            Err(err) => {
                storage[0] = 0;
                error_code(&err)
            }
        }
    })
}

/// Number of bytes [`fmtconv_convert_into`] needs for `source`, including
/// the NUL terminator. Returns a negative `FMTCONV_ERR_*` code if `source`
/// does not convert.
///
/// # Safety
///
/// `source` must be a valid, null-terminated C string pointer (or NULL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fmtconv_estimate(source: *const c_char) -> isize {
    guard_ffi_len(|| {
        let Some(source) = (unsafe { cstr_to_str(source) }) else {
            return FMTCONV_ERR_INVALID_ARG;
        };
        match estimate_capacity(source, CapacityPolicy::Exact) {
            Ok(len) => byte_count(len + 1),
            Err(err) => error_code(&err),
        }
    })
}

/// Explain a diagnostic code. Returns the explanation as a C string, or NULL if unknown.
///
/// The caller MUST free the returned pointer with `fmtconv_free()`.
///
/// # Safety
///
/// `id` must be a valid, null-terminated C string pointer (or NULL).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fmtconv_explain(id: *const c_char) -> *mut c_char {
    guard_ffi_json(|| {
        let Some(id) = (unsafe { cstr_to_str(id) }) else {
            return ptr::null_mut();
        };
        fmtconv_core::explain(id).map_or(ptr::null_mut(), to_c_string)
    })
}

// ── Free ─────────────────────────────────────────────────────────────

/// Free a string previously returned by any `fmtconv_*` function.
///
/// Passing NULL is safe (no-op).
///
/// # Safety
///
/// `ptr` must be a pointer previously returned by a `fmtconv_*` function,
/// or NULL. Each pointer must be freed exactly once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn fmtconv_free(ptr: *mut c_char) {
    guard_ffi_void(|| {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    /// Take ownership of a returned string and free it.
    fn take(ptr: *mut c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_owned();
        unsafe { fmtconv_free(ptr) };
        Some(s)
    }

    fn convert_json(source: &str) -> serde_json::Value {
        let src = c(source);
        let out = take(unsafe { fmtconv_convert(src.as_ptr()) }).expect("non-null result");
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn convert_success_envelope() {
        let json = convert_json("Percentage = %.2f%%\n");
        assert_eq!(json["ok"], true);
        assert_eq!(json["output"], "Percentage = {d:.2}%\n");
        assert_eq!(json["notes"], serde_json::json!([]));
    }

    #[test]
    fn convert_failure_envelope() {
        let json = convert_json("%.d");
        assert_eq!(json["ok"], false);
        assert_eq!(json["diagnostics"][0]["id"], "FMT1003");
    }

    #[test]
    fn convert_null_returns_null() {
        assert!(unsafe { fmtconv_convert(ptr::null()) }.is_null());
    }

    #[test]
    fn convert_into_exact_buffer() {
        let src = c("counter = %d");
        let needed = unsafe { fmtconv_estimate(src.as_ptr()) };
        assert_eq!(needed, 14);

        let mut buf = vec![0x7f as c_char; needed as usize];
        let n = unsafe { fmtconv_convert_into(src.as_ptr(), buf.as_mut_ptr(), buf.len()) };
        assert_eq!(n, 13);
        let out = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(out.to_str().unwrap(), "counter = {d}");
    }

    #[test]
    fn convert_into_one_byte_short() {
        let src = c("counter = %d");
        let mut buf = [0x7f as c_char; 13];
        let n = unsafe { fmtconv_convert_into(src.as_ptr(), buf.as_mut_ptr(), buf.len()) };
        assert_eq!(n, FMTCONV_ERR_CAPACITY);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn convert_into_errors() {
        let bad = c("%--d");
        let mut buf = [0 as c_char; 32];
        let n = unsafe { fmtconv_convert_into(bad.as_ptr(), buf.as_mut_ptr(), buf.len()) };
        assert_eq!(n, FMTCONV_ERR_FORMAT);

        let ok = c("%d");
        let n = unsafe { fmtconv_convert_into(ok.as_ptr(), ptr::null_mut(), 8) };
        assert_eq!(n, FMTCONV_ERR_INVALID_ARG);
        let n = unsafe { fmtconv_convert_into(ok.as_ptr(), buf.as_mut_ptr(), 0) };
        assert_eq!(n, FMTCONV_ERR_CAPACITY);
    }

    #[test]
    fn estimate_reports_format_errors() {
        let bad = c("%08");
        assert_eq!(unsafe { fmtconv_estimate(bad.as_ptr()) }, FMTCONV_ERR_FORMAT);
        assert_eq!(
            unsafe { fmtconv_estimate(ptr::null()) },
            FMTCONV_ERR_INVALID_ARG
        );
    }

    #[test]
    fn explain_known_and_unknown() {
        let known = c("FMT1001");
        assert!(take(unsafe { fmtconv_explain(known.as_ptr()) }).is_some());
        let unknown = c("FMT9999");
        assert!(take(unsafe { fmtconv_explain(unknown.as_ptr()) }).is_none());
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { fmtconv_free(ptr::null_mut()) };
    }
}
