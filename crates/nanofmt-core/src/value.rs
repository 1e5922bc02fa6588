//! The pulled-argument value representation (spec.md §4.2 "argument
//! value"). Unlike `types::ArgType`, which is inferred without ever
//! touching a value, `ArgValue` is what the binder (`bind.rs`) actually
//! reads out of an `ArgPuller` once a slot's type is known -- there is
//! no runtime tag to check, since the `ArgType` computed in pass 1 IS
//! the tag (spec.md §4.2: "no runtime reflection").

use crate::unit::CodeUnit;

/// A single bound argument value.
///
/// Not `Clone`/`Copy`: the `Writeback` variant carries an exclusive
/// `&mut` reference into caller storage, which can never be duplicated.
/// Callers building a fixed-size array of these (`bind`'s `out` slice)
/// should use `core::array::from_fn` rather than the `[expr; N]` repeat
/// form, which requires `Copy`.
#[derive(Debug)]
pub enum ArgValue<'a, U: CodeUnit> {
    /// A character, widened to a codepoint regardless of source width.
    Char(u32),
    /// A string payload. Not assumed nul-terminated: the renderer stops
    /// at `precision` code units, or at the slice's end, whichever comes
    /// first (spec.md §4.7, "`%s` without precision formats until a nul").
    /// A puller backed by a real C string locates the nul itself and
    /// hands back a slice that ends there.
    ///
    /// `StrPayload::Foreign` covers spec.md §4.7's "if the source
    /// encoding differs from the sink's code-unit size" case -- an `%s`
    /// pulling a narrow `char*` while rendering to a wide (`u16`) sink,
    /// or an `%ls` pulling a wide string while rendering to a byte sink.
    /// The renderer only reaches that branch through the `Transcoder`
    /// seam (`render.rs`); the in-crate `SliceArgPuller` never produces
    /// it, since a caller using that path already controls both the
    /// string's width and the sink's.
    Str(StrPayload<'a, U>),
    Pointer(usize),
    /// The raw pulled bit pattern, sign-extended to 64 bits. The
    /// renderer reinterprets it per the directive's conversion family
    /// (`%d` signed, `%u`/`%x`/`%o`/`%b` unsigned) and narrows it per
    /// `types::IntWidth` before converting to digits.
    Int(i64),
    /// Always widened to `f64`; see `types::FloatWidth`'s doc comment.
    Float(f64),
    Writeback(Writeback<'a>),
}

/// A string argument as pulled by the binder: either already in the
/// engine's native code-unit width, or in the *other* width, pending
/// transcoding by the renderer (spec.md §4.7).
#[derive(Debug, Clone, Copy)]
pub enum StrPayload<'a, U: CodeUnit> {
    Native(&'a [U]),
    Foreign(ForeignStr<'a>),
}

/// A string supplied in a code-unit width foreign to the engine's own
/// `U`. `Utf8` covers a narrow `%s` argument rendered to a `u16` sink;
/// `Utf16` covers a wide `%ls` argument rendered to a `u8` sink.
#[derive(Debug, Clone, Copy)]
pub enum ForeignStr<'a> {
    Utf8(&'a [u8]),
    Utf16(&'a [u16]),
}

/// A `%n` target: a mutable reference to caller storage of one of the
/// widths `types::WritebackTarget` enumerates. The `F64` variant exists
/// only because `L` is a legal (if unusual) length modifier on `%n`,
/// pointing at a `double` (spec.md §8: preserved verbatim, treated as
/// implementation-defined).
#[derive(Debug)]
pub enum Writeback<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    ISize(&'a mut isize),
    F64(&'a mut f64),
}

impl Writeback<'_> {
    /// Store the emitted byte count so far, truncated to the target's width.
    pub fn store(&mut self, count: i64) {
        match self {
            Writeback::I8(r) => **r = count as i8,
            Writeback::I16(r) => **r = count as i16,
            Writeback::I32(r) => **r = count as i32,
            Writeback::I64(r) => **r = count,
            Writeback::ISize(r) => **r = count as isize,
            Writeback::F64(r) => **r = count as f64,
        }
    }
}
