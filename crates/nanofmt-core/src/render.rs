//! Pass 2: the rendering driver (spec.md §4.7), grounded on
//! `original_source/nanoprintf.h`'s `npf_vpprintf` for the directive
//! walk and `npf_vsnprintf`/`npf_bufputc` for the buffer-sink variant.
//!
//! Composes the other passes in order: `verify::verify_infer` (runs
//! inference over the reference, and -- if a distinct untrusted format
//! was supplied -- checks it against the resulting type vector without
//! accepting any new binding), `bind::bind` (pulls one value per slot
//! from the caller's `ArgPuller`), then walks the format actually being
//! rendered a second time, directive by directive, writing to a `Sink`.
//!
//! Padding, sign, and prefix assembly follow `npf_vpprintf`'s own
//! three-way branch (zero-padded right-justify / space-padded
//! right-justify / left-justify-or-none) exactly, including its
//! quirks: a `'0'` flag is silently ignored on `%c` (only `%s`'s is
//! cleared at parse time, per `spec.rs`), alt-form `%o` bakes its extra
//! `'0'` directly into the digit count rather than staging a separate
//! prefix, and `prec_pad` is skipped for `%f`/`%F` specifically (not
//! the other float families) because their precision is already baked
//! into the digit buffer by `floatconv::render_float_rev`.

use crate::bind::bind;
use crate::intconv::render_uint_rev;
use crate::floatconv::render_float_rev;
use crate::source::ArgPuller;
use crate::spec::{ConvFamily, FormatFlags, FormatSpec, Precision, Width, parse_format_spec};
use crate::types::declared_int_width;
use crate::unit::{CodeUnit, is_ascii};
use crate::value::{ArgValue, ForeignStr, StrPayload};
use crate::verify::{VerifyError, verify_infer};

/// Where formatted output goes. The only collaborator the engine
/// requires of its caller (spec.md §2): a buffered writer, a socket
/// wrapper, a `Vec`-backed adapter in an allocator-having caller -- all
/// of that lives outside this crate.
pub trait Sink<U: CodeUnit> {
    fn emit(&mut self, unit: U);
}

/// A sink that only counts what would have been written, discarding
/// the units themselves. Useful for a dry-run length computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingSink {
    pub count: usize,
}

impl<U: CodeUnit> Sink<U> for CountingSink {
    fn emit(&mut self, _unit: U) {
        self.count += 1;
    }
}

/// A sink that writes into a caller-owned `&mut [U]`, bounded the way
/// `npf_bufputc` is: once the buffer fills, further `emit` calls are
/// silently dropped rather than panicking or growing. `render_to_buffer`
/// is built on this.
pub struct SliceSink<'a, U> {
    buf: &'a mut [U],
    cur: usize,
}

impl<'a, U: CodeUnit> SliceSink<'a, U> {
    pub fn new(buf: &'a mut [U]) -> Self {
        SliceSink { buf, cur: 0 }
    }

    /// Units actually written so far (bounded by the buffer's length).
    pub fn written(&self) -> usize {
        self.cur
    }
}

impl<'a, U: CodeUnit> Sink<U> for SliceSink<'a, U> {
    fn emit(&mut self, unit: U) {
        if self.cur < self.buf.len() {
            self.buf[self.cur] = unit;
            self.cur += 1;
        }
    }
}

/// The codepoint-transcoding collaborator (spec.md §4.7's "if the
/// source encoding differs from the sink's code-unit size"). Only
/// invoked when a bound argument is `StrPayload::Foreign`; a caller
/// that never mixes code-unit widths between its arguments and its
/// sink never needs to supply one. Concrete implementations (backed by
/// a real UTF-8/UTF-16 decoder) live in `nanofmt-abi`, not here -- this
/// crate only defines the seam.
pub trait Transcoder {
    /// Decode `bytes` as UTF-8, calling `emit` with each codepoint in order.
    fn utf8_codepoints(&self, bytes: &[u8], emit: &mut dyn FnMut(u32));
    /// Decode `units` as UTF-16, calling `emit` with each codepoint in order.
    fn utf16_codepoints(&self, units: &[u16], emit: &mut dyn FnMut(u32));
}

/// Why a render attempt failed closed (spec.md §7: rendering never
/// panics on a bad format; it returns 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// `format` demanded an argument shape `reference` didn't establish,
    /// or `reference` was itself internally inconsistent.
    Verification(VerifyError),
    /// A slot inside `1..=used_max` was never bound -- unreachable in
    /// practice once `verify_infer` has succeeded, but `bind` checks
    /// again rather than trusting that invariant silently.
    Gap,
    /// A `%s`/`%ls` argument needed transcoding (its code-unit width
    /// doesn't match the sink's) but no `Transcoder` was supplied.
    Transcoding,
}

// Integer digit conversions never need more than 64 code units: the
// widest possible expansion of a 64-bit value is `%b` of `u64::MAX`
// (64 binary digits); octal's alt-form extra `'0'` adds at most one
// more, well inside this. Not tied to `EngineConfig::SCRATCH_LEN`,
// which governs only the float buffer (see `config.rs`'s doc comment).
const INT_SCRATCH: usize = 64;
// Float conversions: enough for the default precision (6) and any
// reasonable explicit one; an extreme precision legitimately degrades
// to `floatconv`'s `"err"` special value rather than growing this.
const FLOAT_SCRATCH: usize = 64;

/// Verify `format` (or `reference` itself, if `format` is `None`)
/// against `reference`, bind one argument per referenced slot from
/// `puller`, and render the result to `sink`. Returns the number of
/// code units that would have been written, exactly as a real
/// `vprintf` return value would -- including units a bounded `sink`
/// (e.g. `SliceSink`) silently dropped. Returns 0 on any verification,
/// binding, or transcoding failure, never panicking (spec.md §7).
pub fn render_to_sink<'a, U, S, P, const CAP: usize>(
    sink: &mut S,
    reference: &[U],
    format: Option<&[U]>,
    puller: &mut P,
    transcoder: Option<&dyn Transcoder>,
) -> i32
where
    U: CodeUnit,
    S: Sink<U>,
    P: ArgPuller<'a, U>,
{
    try_render::<U, S, P, CAP>(sink, reference, format, puller, transcoder).unwrap_or(0)
}

/// As `render_to_sink`, but writing into a caller-owned `&mut [U]`
/// buffer and guaranteeing nul termination within it, the way
/// `npf_vsnprintf` does: the formatted text (and a best-effort nul) is
/// written bounded by `buf`'s length, then `buf`'s last unit is forced
/// to nul regardless, so truncated output is still a valid
/// nul-terminated string. The returned count is the *untruncated*
/// length, as with `render_to_sink`.
pub fn render_to_buffer<'a, U, P, const CAP: usize>(
    buf: &mut [U],
    reference: &[U],
    format: Option<&[U]>,
    puller: &mut P,
    transcoder: Option<&dyn Transcoder>,
) -> i32
where
    U: CodeUnit,
    P: ArgPuller<'a, U>,
{
    let mut sink = SliceSink::new(&mut *buf);
    let n = render_to_sink::<U, SliceSink<'_, U>, P, CAP>(&mut sink, reference, format, puller, transcoder);
    sink.emit(U::from_ascii(0));
    if let Some(last) = buf.len().checked_sub(1) {
        buf[last] = U::from_ascii(0);
    }
    n
}

fn try_render<'a, U, S, P, const CAP: usize>(
    sink: &mut S,
    reference: &[U],
    format: Option<&[U]>,
    puller: &mut P,
    transcoder: Option<&dyn Transcoder>,
) -> Result<i32, RenderError>
where
    U: CodeUnit,
    S: Sink<U>,
    P: ArgPuller<'a, U>,
{
    let (types, used_max) =
        verify_infer::<U, CAP>(reference, format).map_err(RenderError::Verification)?;

    let mut values: [ArgValue<'a, U>; CAP] = core::array::from_fn(|_| ArgValue::Int(0));
    bind(&types, used_max, puller, &mut values).map_err(|_| RenderError::Gap)?;

    let walked = format.unwrap_or(reference);
    render_walk(sink, walked, &mut values[..used_max], transcoder)
}

/// Walk `format` left to right, emitting literal code units verbatim
/// and dispatching each `%…` directive to `render_directive`. Mirrors
/// `npf_vpprintf`'s own top-level loop: an unparseable directive (a
/// syntax error, or an unrecognized conversion letter) emits the `%`
/// itself literally and resumes scanning from the next code unit.
fn render_walk<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    format: &[U],
    values: &mut [ArgValue<'_, U>],
    transcoder: Option<&dyn Transcoder>,
) -> Result<i32, RenderError> {
    let mut count: i64 = 0;
    let mut seq = 0usize;
    let mut pos = 0usize;

    while pos < format.len() {
        if !is_ascii(format[pos], b'%') {
            sink.emit(format[pos]);
            count += 1;
            pos += 1;
            continue;
        }

        let directive = &format[pos + 1..];
        match parse_format_spec::<U>(directive) {
            None => {
                sink.emit(format[pos]);
                count += 1;
                pos += 1;
            }
            Some((fs, consumed)) => {
                pos += 1 + consumed;
                render_directive(sink, &fs, values, &mut seq, transcoder, &mut count)?;
            }
        }
    }

    Ok(count as i32)
}

fn resolve_order(explicit: Option<usize>, seq: &mut usize) -> usize {
    match explicit {
        Some(v) => v,
        None => {
            *seq += 1;
            *seq
        }
    }
}

fn get_plain_int<U: CodeUnit>(values: &[ArgValue<'_, U>], idx: usize) -> i64 {
    match &values[idx - 1] {
        ArgValue::Int(v) => *v,
        _ => 0,
    }
}

/// Resolve the pad character for a field-width directive (spec.md §4.7
/// "field width"), faithfully including two `npf_vpprintf` quirks:
/// - a `'0'` flag on a conversion that isn't eligible for zero-padding
///   (`%c` -- `%s` already clears the flag itself at parse time)
///   produces *no* padding at all, not even space padding;
/// - a zero value with an explicit zero precision demotes `'0'`-pad to
///   space-pad rather than suppressing padding outright (there being
///   no digits to protect a `'0'`-pad from colliding with).
fn compute_pad_c(width_active: bool, leading_zero_pad: bool, zero_pad_eligible: bool, suppress_zero_pad: bool) -> Option<u8> {
    if !width_active {
        return None;
    }
    if leading_zero_pad {
        if zero_pad_eligible {
            if suppress_zero_pad { Some(b' ') } else { Some(b'0') }
        } else {
            None
        }
    } else {
        Some(b' ')
    }
}

fn emit_fill<U: CodeUnit, S: Sink<U>>(sink: &mut S, unit: U, n: usize, count: &mut i64) {
    for _ in 0..n {
        sink.emit(unit);
        *count += 1;
    }
}

fn emit_ascii<U: CodeUnit, S: Sink<U>>(sink: &mut S, b: u8, count: &mut i64) {
    sink.emit(U::from_ascii(b));
    *count += 1;
}

fn emit_ascii_slice<U: CodeUnit, S: Sink<U>>(sink: &mut S, bytes: &[u8], count: &mut i64) {
    for &b in bytes {
        emit_ascii(sink, b, count);
    }
}

/// Emit `digits[..len]` back to front -- every digit buffer in this
/// crate (`intconv::render_uint_rev`, `floatconv::render_float_rev`,
/// including its special `"FNI"`/`"RRE"`-spelled `inf`/`err` results)
/// is stored least-significant/reverse-first for exactly this reason.
fn emit_digits_rev<U: CodeUnit, S: Sink<U>>(sink: &mut S, digits: &[u8], count: &mut i64) {
    for &b in digits.iter().rev() {
        emit_ascii(sink, b, count);
    }
}

fn render_directive<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    spec: &FormatSpec,
    values: &mut [ArgValue<'_, U>],
    seq: &mut usize,
    transcoder: Option<&dyn Transcoder>,
    count: &mut i64,
) -> Result<(), RenderError> {
    if spec.conv == ConvFamily::Percent {
        emit_ascii(sink, b'%', count);
        return Ok(());
    }

    // Resolution order matters: it must match `infer::infer`'s shared
    // sequential cursor exactly (width, then precision, then the
    // directive's own argument), or a bare `*`/sequential order would
    // read back a different slot than inference bound it to.
    let mut left_justified = spec.flags.left_justified;
    let mut width_active = false;
    let mut field_width = 0usize;
    match spec.width {
        Width::None => {}
        Width::Literal(n) => {
            width_active = true;
            field_width = n;
        }
        Width::Star { explicit_order } => {
            width_active = true;
            let idx = resolve_order(explicit_order, seq);
            let v = get_plain_int(values, idx);
            if v < 0 {
                left_justified = true;
                field_width = v.unsigned_abs() as usize;
            } else {
                field_width = v as usize;
            }
        }
    }

    let prec_opt: Option<usize> = match spec.precision {
        Precision::None => None,
        Precision::Literal(n) => Some(n),
        Precision::Star { explicit_order } => {
            let idx = resolve_order(explicit_order, seq);
            let v = get_plain_int(values, idx);
            if v < 0 { None } else { Some(v as usize) }
        }
    };

    let order = resolve_order(if spec.order == 0 { None } else { Some(spec.order) }, seq);

    match spec.conv {
        ConvFamily::Writeback => {
            if let ArgValue::Writeback(wb) = &mut values[order - 1] {
                wb.store(*count);
            }
            Ok(())
        }
        ConvFamily::Char => render_char(
            sink,
            &values[order - 1],
            spec.flags,
            width_active,
            field_width,
            left_justified,
            count,
        ),
        ConvFamily::Str => render_str(
            sink,
            &values[order - 1],
            width_active,
            field_width,
            left_justified,
            prec_opt,
            transcoder,
            count,
        ),
        ConvFamily::SignedInt => render_signed(
            sink,
            &values[order - 1],
            spec,
            width_active,
            field_width,
            left_justified,
            prec_opt,
            count,
        ),
        ConvFamily::UnsignedInt | ConvFamily::Octal | ConvFamily::HexInt | ConvFamily::Binary => render_unsigned(
            sink,
            &values[order - 1],
            spec,
            width_active,
            field_width,
            left_justified,
            prec_opt,
            count,
        ),
        ConvFamily::Pointer => render_pointer(
            sink,
            &values[order - 1],
            spec.flags.leading_zero_pad,
            width_active,
            field_width,
            left_justified,
            count,
        ),
        ConvFamily::FloatDec | ConvFamily::FloatSci | ConvFamily::FloatShortest | ConvFamily::FloatHex => render_float(
            sink,
            &values[order - 1],
            spec,
            width_active,
            field_width,
            left_justified,
            prec_opt,
            count,
        ),
        ConvFamily::Percent => unreachable!("handled above"),
    }
}

fn render_char<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    flags: FormatFlags,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    count: &mut i64,
) -> Result<(), RenderError> {
    let cp = match value {
        ArgValue::Char(c) => *c,
        _ => 0,
    };
    let unit = U::from_u32_lossy(cp);

    let pad_c = compute_pad_c(width_active, flags.leading_zero_pad, false, false);
    let field_pad = match pad_c {
        Some(_) => field_width.saturating_sub(1),
        None => 0,
    };

    if let Some(c) = pad_c {
        if !left_justified {
            emit_fill(sink, U::from_ascii(c), field_pad, count);
        }
        sink.emit(unit);
        *count += 1;
        if left_justified {
            emit_fill(sink, U::from_ascii(c), field_pad, count);
        }
    } else {
        sink.emit(unit);
        *count += 1;
    }
    Ok(())
}

fn render_str<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    precision: Option<usize>,
    transcoder: Option<&dyn Transcoder>,
    count: &mut i64,
) -> Result<(), RenderError> {
    let payload: StrPayload<'_, U> = match value {
        ArgValue::Str(p) => *p,
        _ => return Ok(()),
    };

    match payload {
        StrPayload::Native(s) => {
            let n = match precision {
                Some(p) => core::cmp::min(p, s.len()),
                None => s.len(),
            };
            let field_pad = if width_active { field_width.saturating_sub(n) } else { 0 };
            if !left_justified {
                emit_fill(sink, U::from_ascii(b' '), field_pad, count);
            }
            for &u in &s[..n] {
                sink.emit(u);
                *count += 1;
            }
            if left_justified {
                emit_fill(sink, U::from_ascii(b' '), field_pad, count);
            }
            Ok(())
        }
        StrPayload::Foreign(f) => {
            let tc = transcoder.ok_or(RenderError::Transcoding)?;
            let max = precision.unwrap_or(usize::MAX);

            let mut seen = 0usize;
            let mut out_units = 0usize;
            visit_foreign(&f, tc, |cp| {
                if seen < max {
                    out_units += U::codepoint_len(cp);
                }
                seen += 1;
            });

            let field_pad = if width_active { field_width.saturating_sub(out_units) } else { 0 };
            if !left_justified {
                emit_fill(sink, U::from_ascii(b' '), field_pad, count);
            }

            let mut i = 0usize;
            visit_foreign(&f, tc, |cp| {
                if i < max {
                    U::encode_codepoint(cp, &mut |u| {
                        sink.emit(u);
                        *count += 1;
                    });
                }
                i += 1;
            });

            if left_justified {
                emit_fill(sink, U::from_ascii(b' '), field_pad, count);
            }
            Ok(())
        }
    }
}

fn visit_foreign(f: &ForeignStr<'_>, tc: &dyn Transcoder, mut visit: impl FnMut(u32)) {
    match f {
        ForeignStr::Utf8(b) => tc.utf8_codepoints(b, &mut visit),
        ForeignStr::Utf16(u) => tc.utf16_codepoints(u, &mut visit),
    }
}

/// Assemble and emit a numeric conversion's sign, prefix, precision
/// padding, digits, and field-width padding, in exactly
/// `npf_vpprintf`'s order. `prefix` is the unconditional 2-byte
/// `"0x"`/`"0X"`/`"0b"`/`"0B"` staged separately from the digit buffer
/// (octal's alt-form extra `'0'` is folded into `digits` instead, by
/// the caller, so it has no separate prefix here).
#[allow(clippy::too_many_arguments)]
fn finish_numeric<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    sign: Option<u8>,
    prefix: &[u8],
    digits_rev: &[u8],
    prec_opt: Option<usize>,
    suppress_zero_pad: bool,
    leading_zero_pad: bool,
    exclude_prec_pad: bool,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    count: &mut i64,
) -> Result<(), RenderError> {
    let digit_count = digits_rev.len();
    let prec_pad = if exclude_prec_pad {
        0
    } else {
        match prec_opt {
            Some(p) => p.saturating_sub(digit_count),
            None => 0,
        }
    };

    let pad_c = compute_pad_c(width_active, leading_zero_pad, true, suppress_zero_pad);

    let sign_len = usize::from(sign.is_some());
    let content_len = sign_len + prefix.len() + prec_pad + digit_count;
    let field_pad = if width_active {
        field_width.saturating_sub(content_len)
    } else {
        0
    };

    match (left_justified, pad_c) {
        (false, Some(b'0')) => {
            if let Some(s) = sign {
                emit_ascii(sink, s, count);
            }
            emit_ascii_slice(sink, prefix, count);
            emit_fill(sink, U::from_ascii(b'0'), field_pad, count);
            emit_fill(sink, U::from_ascii(b'0'), prec_pad, count);
            emit_digits_rev(sink, digits_rev, count);
        }
        (false, Some(_)) => {
            emit_fill(sink, U::from_ascii(b' '), field_pad, count);
            emit_ascii_slice(sink, prefix, count);
            if let Some(s) = sign {
                emit_ascii(sink, s, count);
            }
            emit_fill(sink, U::from_ascii(b'0'), prec_pad, count);
            emit_digits_rev(sink, digits_rev, count);
        }
        (_, _) => {
            emit_ascii_slice(sink, prefix, count);
            if let Some(s) = sign {
                emit_ascii(sink, s, count);
            }
            emit_fill(sink, U::from_ascii(b'0'), prec_pad, count);
            emit_digits_rev(sink, digits_rev, count);
            if left_justified {
                if let Some(c) = pad_c {
                    emit_fill(sink, U::from_ascii(c), field_pad, count);
                }
            }
        }
    }
    Ok(())
}

fn narrow_signed(raw: i64, width: crate::types::IntWidth) -> i64 {
    use crate::types::IntWidth;
    match width {
        IntWidth::I8 => raw as i8 as i64,
        IntWidth::I16 => raw as i16 as i64,
        IntWidth::I32 => raw as i32 as i64,
        IntWidth::I64 | IntWidth::ISize => raw,
    }
}

fn narrow_unsigned(raw: i64, width: crate::types::IntWidth) -> u64 {
    use crate::types::IntWidth;
    match width {
        IntWidth::I8 => raw as u8 as u64,
        IntWidth::I16 => raw as u16 as u64,
        IntWidth::I32 => raw as u32 as u64,
        IntWidth::I64 | IntWidth::ISize => raw as u64,
    }
}

#[allow(clippy::too_many_arguments)]
fn render_signed<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    spec: &FormatSpec,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    prec_opt: Option<usize>,
    count: &mut i64,
) -> Result<(), RenderError> {
    let raw = match value {
        ArgValue::Int(v) => *v,
        _ => 0,
    };
    let v = narrow_signed(raw, declared_int_width(spec.length));
    let negative = v < 0;
    let mag: u64 = if negative { (v as i128).unsigned_abs() as u64 } else { v as u64 };
    let sign = if negative { Some(b'-') } else { spec.flags.prepend };

    let zero = mag == 0;
    let explicit_zero_prec = matches!(prec_opt, Some(0));

    let mut digits = [0u8; INT_SCRATCH];
    let digit_count = if zero && explicit_zero_prec {
        0
    } else {
        render_uint_rev(mag, 10, false, &mut digits)
    };

    finish_numeric(
        sink,
        sign,
        &[],
        &digits[..digit_count],
        prec_opt,
        zero && explicit_zero_prec,
        spec.flags.leading_zero_pad,
        false,
        width_active,
        field_width,
        left_justified,
        count,
    )
}

#[allow(clippy::too_many_arguments)]
fn render_unsigned<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    spec: &FormatSpec,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    prec_opt: Option<usize>,
    count: &mut i64,
) -> Result<(), RenderError> {
    let raw = match value {
        ArgValue::Int(v) => *v,
        _ => 0,
    };
    let mag = narrow_unsigned(raw, declared_int_width(spec.length));
    let zero = mag == 0;
    let uppercase = spec.case_adjust == 0;

    let radix: u32 = match spec.conv {
        ConvFamily::Octal => 8,
        ConvFamily::HexInt => 16,
        ConvFamily::Binary => 2,
        _ => 10,
    };

    let explicit_zero_prec = matches!(prec_opt, Some(0));
    let octal_alt_zero_special = zero && explicit_zero_prec && spec.conv == ConvFamily::Octal && spec.flags.alt_form;

    let mut digits = [0u8; INT_SCRATCH];
    let mut digit_count = if zero && explicit_zero_prec && !octal_alt_zero_special {
        0
    } else {
        render_uint_rev(mag, radix, uppercase, &mut digits)
    };

    let mut prefix_buf = [0u8; 2];
    let mut prefix_len = 0usize;

    if !zero && spec.flags.alt_form {
        match spec.conv {
            ConvFamily::Octal => {
                // Bake the leading '0' straight into the (reversed)
                // digit buffer: it becomes the new most-significant
                // digit once read back to front.
                digits[digit_count] = b'0';
                digit_count += 1;
            }
            ConvFamily::HexInt => {
                prefix_buf[0] = b'0';
                prefix_buf[1] = if uppercase { b'X' } else { b'x' };
                prefix_len = 2;
            }
            ConvFamily::Binary => {
                prefix_buf[0] = b'0';
                prefix_buf[1] = if uppercase { b'B' } else { b'b' };
                prefix_len = 2;
            }
            _ => {}
        }
    }

    // The octal alt-form extra '0' forces the effective precision to at
    // least 1, which in turn means pad_c's own zero-precision-suppression
    // check (keyed off the *effective* precision) never fires here --
    // it still '0'-pads even though the user wrote `%#.0o` of a zero value.
    let suppress_zero_pad = zero && explicit_zero_prec && !octal_alt_zero_special;

    finish_numeric(
        sink,
        None,
        &prefix_buf[..prefix_len],
        &digits[..digit_count],
        prec_opt,
        suppress_zero_pad,
        spec.flags.leading_zero_pad,
        false,
        width_active,
        field_width,
        left_justified,
        count,
    )
}

fn render_pointer<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    leading_zero_pad: bool,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    count: &mut i64,
) -> Result<(), RenderError> {
    let ptr = match value {
        ArgValue::Pointer(p) => *p as u64,
        _ => 0,
    };
    let mut digits = [0u8; INT_SCRATCH];
    let digit_count = render_uint_rev(ptr, 16, false, &mut digits);

    finish_numeric(
        sink,
        None,
        b"0x",
        &digits[..digit_count],
        None,
        false,
        leading_zero_pad,
        false,
        width_active,
        field_width,
        left_justified,
        count,
    )
}

#[allow(clippy::too_many_arguments)]
fn render_float<U: CodeUnit, S: Sink<U>>(
    sink: &mut S,
    value: &ArgValue<'_, U>,
    spec: &FormatSpec,
    width_active: bool,
    field_width: usize,
    left_justified: bool,
    prec_opt: Option<usize>,
    count: &mut i64,
) -> Result<(), RenderError> {
    let f = match value {
        ArgValue::Float(v) => *v,
        _ => 0.0,
    };
    // A `.*`-precision that resolved negative at render time demotes to
    // "as if absent" (spec.md §3), which for a float conversion means
    // no fraction digits at all (alt_form still forces the point).
    let precision = prec_opt.unwrap_or(0);
    let uppercase = spec.case_adjust == 0;
    let negative = f.is_sign_negative();
    let zero = f == 0.0;

    let mut buf = [0u8; FLOAT_SCRATCH];
    let result = render_float_rev(&mut buf, precision, spec.flags.alt_form, uppercase, f);

    let sign = if negative { Some(b'-') } else { spec.flags.prepend };
    let exclude_prec_pad = spec.conv == ConvFamily::FloatDec;

    let explicit_zero_prec = matches!(prec_opt, Some(0));

    finish_numeric(
        sink,
        sign,
        &[],
        &buf[..result.len],
        prec_opt,
        zero && explicit_zero_prec,
        spec.flags.leading_zero_pad,
        exclude_prec_pad,
        width_active,
        field_width,
        left_justified,
        count,
    )
}
