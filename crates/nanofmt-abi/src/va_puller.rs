//! Adapts a real C variadic argument stream into `nanofmt_core::ArgPuller`.
//!
//! Grounded on `frankenlibc-abi/src/stdio_abi.rs`'s `extract_va_args!`
//! macro: rather than interleaving `va_arg` calls with formatting (as
//! `original_source/nanoprintf.h`'s `npf_vpprintf` does directly in C),
//! every slot the reference format's inference pass claims is pulled
//! from the `VaList` eagerly, up front, into a fixed `[RawWord; CAP]`
//! buffer -- typed `Int`/`Float` per slot so the right register class is
//! read (a `va_list`'s floating-point arguments come from the SSE
//! registers, not the general-purpose ones; getting this wrong reads
//! garbage, it does not merely misformat). `nanofmt-core`'s own
//! inference/bind split makes this natural: `infer::infer` over the
//! reference format already produces exactly the per-slot type
//! knowledge this extraction needs, before any value is touched.

use core::ffi::{CStr, VaList, c_char};

use nanofmt_core::infer::TypeVector;
use nanofmt_core::source::ArgPuller;
use nanofmt_core::spec::ConvFamily;
use nanofmt_core::types::{IntWidth, WritebackTarget};
use nanofmt_core::value::{StrPayload, Writeback};

/// One argument slot's raw representation, extracted but not yet
/// interpreted. `Int` covers every family that isn't a float conversion
/// -- including string/pointer/writeback, which are really addresses
/// but share the integer register class with plain integers in the
/// platform calling convention this crate targets.
#[derive(Debug, Clone, Copy)]
pub enum RawWord {
    Int(u64),
    Float(f64),
}

/// Pull `used_max` raw words out of `args`, one per slot of `types`,
/// typed by each slot's conversion family. `CAP` must be large enough to
/// hold `used_max` words; the caller (`stdio_abi`) sizes it to match the
/// `TypeVector` it inferred against.
///
/// # Safety
/// `args` must be a live `VaList` whose underlying variadic call
/// actually supplied `used_max` arguments shaped the way `types`
/// describes (the caller of the original `extern "C"` function is
/// trusted for this, exactly as a real `vsnprintf` trusts its caller).
pub unsafe fn extract_raw_words<const CAP: usize>(
    types: &TypeVector<CAP>,
    used_max: usize,
    args: &mut VaList<'_>,
) -> [RawWord; CAP] {
    let mut out = [RawWord::Int(0); CAP];
    for (i, slot) in out.iter_mut().enumerate().take(used_max) {
        let t = types.get(i);
        *slot = if is_float_family(t.family) {
            RawWord::Float(unsafe { args.arg::<f64>() })
        } else {
            RawWord::Int(unsafe { args.arg::<u64>() })
        };
    }
    out
}

fn is_float_family(family: ConvFamily) -> bool {
    matches!(
        family,
        ConvFamily::FloatDec | ConvFamily::FloatSci | ConvFamily::FloatShortest | ConvFamily::FloatHex
    )
}

/// An `ArgPuller` over an already-extracted `[RawWord]` buffer. Strings
/// and writeback targets reinterpret their `Int` word as a raw pointer
/// at pull time -- this is the one place in the crate an address
/// crosses from "opaque u64" to "dereferenced pointer", and only
/// because the directive driving this particular pull was already
/// inferred (by `nanofmt-core`, in the prior pass) to want a string or
/// writeback slot at this position.
pub struct RawWordPuller<'a> {
    words: &'a [RawWord],
    cursor: usize,
}

impl<'a> RawWordPuller<'a> {
    pub fn new(words: &'a [RawWord]) -> Self {
        RawWordPuller { words, cursor: 0 }
    }

    fn next_int(&mut self) -> u64 {
        let w = self.words[self.cursor];
        self.cursor += 1;
        match w {
            RawWord::Int(v) => v,
            RawWord::Float(f) => f.to_bits(),
        }
    }

    fn next_float(&mut self) -> f64 {
        let w = self.words[self.cursor];
        self.cursor += 1;
        match w {
            RawWord::Float(f) => f,
            RawWord::Int(v) => f64::from_bits(v),
        }
    }
}

impl<'a> ArgPuller<'a, u8> for RawWordPuller<'a> {
    fn pull_int(&mut self, _width: IntWidth) -> i64 {
        self.next_int() as i64
    }

    fn pull_float(&mut self) -> f64 {
        self.next_float()
    }

    fn pull_char(&mut self) -> u32 {
        self.next_int() as u32
    }

    fn pull_str(&mut self) -> StrPayload<'a, u8> {
        let ptr = self.next_int() as usize as *const c_char;
        if ptr.is_null() {
            return StrPayload::Native(b"(null)");
        }
        // SAFETY: `ptr` was bound by a slot the reference format
        // inferred as `%s`/`%ls`; its caller is trusted to have supplied
        // a valid nul-terminated narrow string there (spec.md §1 excludes
        // this trust boundary from the engine's own scope).
        let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
        StrPayload::Native(bytes)
    }

    fn pull_pointer(&mut self) -> usize {
        self.next_int() as usize
    }

    fn pull_writeback(&mut self, target: WritebackTarget) -> Writeback<'a> {
        let ptr = self.next_int() as usize;
        // SAFETY: as `pull_str` above -- the slot was inferred `%n`, and
        // the caller is trusted to have supplied a writable pointer of
        // the matching width.
        unsafe {
            match target {
                WritebackTarget::I8 => Writeback::I8(&mut *(ptr as *mut i8)),
                WritebackTarget::I16 => Writeback::I16(&mut *(ptr as *mut i16)),
                WritebackTarget::I32 => Writeback::I32(&mut *(ptr as *mut i32)),
                WritebackTarget::I64 => Writeback::I64(&mut *(ptr as *mut i64)),
                WritebackTarget::ISize => Writeback::ISize(&mut *(ptr as *mut isize)),
                WritebackTarget::F64 => Writeback::F64(&mut *(ptr as *mut f64)),
            }
        }
    }
}
