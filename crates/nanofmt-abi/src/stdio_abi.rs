//! The two `extern "C"` entry points this crate exposes, shaped after
//! `frankenlibc-abi/src/stdio_abi.rs`'s own `snprintf`/`vsnprintf`
//! family: parse the format's arguments out of a real variadic call,
//! then hand them to `nanofmt-core` exactly as `glibc-rs-harness`-style
//! callers would expect a `vsnprintf` replacement to behave.
//!
//! Both functions take a *reference* format separately from the format
//! actually rendered, per spec.md §6's `render_to_sink`/`render_to_buffer`
//! signature -- a caller with no distinct reference format (the common
//! case, matching real `vsnprintf`) passes the same pointer twice.

use core::ffi::{CStr, c_char, c_int};

use nanofmt_core::infer::TypeVector;
use nanofmt_core::render::render_to_buffer;
use nanofmt_core::verify::verify;

use crate::transcoder::Utf8Utf16Transcoder;
use crate::va_puller::{RawWordPuller, extract_raw_words};

/// Slot capacity for both entry points here, matching spec.md §4.2's
/// 64-argument cap. Independent of any `EngineConfig` a native Rust
/// caller of `nanofmt-core` might choose for itself.
const MAX_ARGS: usize = 64;

/// Check that `format` (or `reference` itself if `format` is null)
/// demands no argument `reference` doesn't already establish. Returns
/// nonzero (true) or zero (false), never panicking on a malformed or
/// non-UTF-8 input -- a format this crate can't even parse as a C
/// string is treated as failing verification, not as undefined
/// behavior.
///
/// # Safety
/// `reference` must be non-null and point to a nul-terminated string.
/// `format`, if non-null, must likewise be nul-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nanofmt_verify(reference: *const c_char, format: *const c_char) -> c_int {
    if reference.is_null() {
        return 0;
    }
    let reference = unsafe { CStr::from_ptr(reference) }.to_bytes();
    let format = if format.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(format) }.to_bytes())
    };

    verify::<u8, MAX_ARGS>(reference, format) as c_int
}

/// Render `reference`'s (or `format`'s, if non-null) directives, pulling
/// arguments from the real variadic call, into `buf` bounded by `size`,
/// nul-terminated within it exactly as `npf_vsnprintf`/`vsnprintf` do.
/// Returns the untruncated formatted length. Like `render_to_buffer`
/// itself, any verification or binding failure renders as 0 rather than
/// a negative error code or a panic (spec.md §7) -- including a
/// `reference` too malformed to even infer a slot count from, which is
/// caught here before a real variadic argument is ever extracted.
///
/// # Safety
/// `reference` must be non-null and nul-terminated; `format`, if
/// non-null, likewise. `buf` must be valid for `size` bytes if `size >
/// 0` (a null `buf` with `size == 0` is accepted, matching `snprintf`).
/// The variadic arguments supplied by the caller must match the shapes
/// `reference` infers, in order -- exactly the trust a real `vsnprintf`
/// places in its caller.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nanofmt_vsnprintf(
    buf: *mut c_char,
    size: usize,
    reference: *const c_char,
    format: *const c_char,
    mut args: ...
) -> c_int {
    if reference.is_null() {
        return 0;
    }
    let reference_bytes = unsafe { CStr::from_ptr(reference) }.to_bytes();
    let format_bytes = if format.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(format) }.to_bytes())
    };

    let mut types = TypeVector::<MAX_ARGS>::new();
    let used_max = match nanofmt_core::infer::infer(reference_bytes, true, &mut types) {
        Ok(n) => n,
        Err(_) => return 0,
    };

    let words = unsafe { extract_raw_words::<MAX_ARGS>(&types, used_max, &mut args) };
    let mut puller = RawWordPuller::new(&words[..used_max]);
    let transcoder = Utf8Utf16Transcoder;

    let n = if buf.is_null() || size == 0 {
        let mut sink = nanofmt_core::render::CountingSink::default();
        nanofmt_core::render::render_to_sink::<u8, _, _, MAX_ARGS>(
            &mut sink,
            reference_bytes,
            format_bytes,
            &mut puller,
            Some(&transcoder),
        )
    } else {
        let out = unsafe { core::slice::from_raw_parts_mut(buf as *mut u8, size) };
        render_to_buffer::<u8, _, MAX_ARGS>(
            out,
            reference_bytes,
            format_bytes,
            &mut puller,
            Some(&transcoder),
        )
    };
    n as c_int
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn verify_accepts_matching_reference() {
        let reference = CString::new("%d %s").unwrap();
        let rc = unsafe { nanofmt_verify(reference.as_ptr(), core::ptr::null()) };
        assert_eq!(rc, 1);
    }

    #[test]
    fn verify_rejects_mismatched_candidate() {
        let reference = CString::new("%d %s").unwrap();
        let candidate = CString::new("%s %d").unwrap();
        let rc = unsafe { nanofmt_verify(reference.as_ptr(), candidate.as_ptr()) };
        assert_eq!(rc, 0);
    }

    #[test]
    fn verify_rejects_null_reference() {
        let rc = unsafe { nanofmt_verify(core::ptr::null(), core::ptr::null()) };
        assert_eq!(rc, 0);
    }
}
