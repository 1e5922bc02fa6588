//! Exercises the ABI crate's collaborators composed together, the way
//! `nanofmt_vsnprintf` itself composes them -- without invoking the
//! crate's genuinely variadic `extern "C"` entry point, which has no
//! safe way to be driven from ordinary Rust test code (the teacher's
//! own `frankenlibc-abi/tests/` carries no test touching its `printf`
//! family either, for the same reason).

use std::ffi::CString;

use nanofmt_abi::stdio_abi::nanofmt_verify;
use nanofmt_abi::va_puller::RawWord;
use nanofmt_abi::{RawWordPuller, Utf8Utf16Transcoder};
use nanofmt_core::render::render_to_buffer;

const CAP: usize = 64;

#[test]
fn ffi_verify_accepts_a_self_consistent_reference() {
    let reference = CString::new("count=%d name=%s").unwrap();
    let rc = unsafe { nanofmt_verify(reference.as_ptr(), std::ptr::null()) };
    assert_eq!(rc, 1);
}

#[test]
fn ffi_verify_rejects_a_type_mismatched_candidate() {
    let reference = CString::new("%d %s").unwrap();
    let candidate = CString::new("%s %d").unwrap();
    let rc = unsafe { nanofmt_verify(reference.as_ptr(), candidate.as_ptr()) };
    assert_eq!(rc, 0);
}

#[test]
fn ffi_verify_rejects_null_reference_without_panicking() {
    assert_eq!(unsafe { nanofmt_verify(std::ptr::null(), std::ptr::null()) }, 0);
}

#[test]
fn renders_through_raw_word_puller_like_a_real_va_list_would() {
    // Emulates what `extract_raw_words` would have pulled from a real
    // variadic call for `"%d of %d: %s"` with arguments (3, 10, "done").
    let words = [RawWord::Int(3), RawWord::Int(10), RawWord::Int(b"done\0".as_ptr() as u64)];
    let mut puller = RawWordPuller::new(&words);
    let transcoder = Utf8Utf16Transcoder;

    let mut buf = [0u8; 64];
    let n = render_to_buffer::<u8, _, CAP>(
        &mut buf,
        b"%d of %d: %s",
        None,
        &mut puller,
        Some(&transcoder),
    );

    assert_eq!(n, 13);
    assert_eq!(&buf[..n as usize], b"3 of 10: done");
}

#[test]
fn float_slot_is_read_from_the_float_word_not_reinterpreted_as_int_bits() {
    // A real va_list pulls floats from the SSE register class; mixing
    // that up with the integer class would read garbage, not merely a
    // wrong value -- this guards the `is_float_family` dispatch inside
    // `extract_raw_words`/`RawWordPuller` stays the right way around.
    let words = [RawWord::Float(2.5)];
    let mut puller = RawWordPuller::new(&words);

    let mut buf = [0u8; 32];
    let n = render_to_buffer::<u8, _, CAP>(&mut buf, b"%.1f", None, &mut puller, None);

    assert_eq!(n, 3);
    assert_eq!(&buf[..3], b"2.5");
}
