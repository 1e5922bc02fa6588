//! The argument type descriptor (spec.md §3 glossary: "pair `(conv,
//! length_modifier)`"). Two descriptors are *compatible* if either (a)
//! they are bit-identical, or (b) they share conversion family and
//! their argument storage sizes match (spec.md §4.4, grounded on
//! `npf_arg_sizeof`/`npf_is_int` in `original_source/nanoprintf.h`).
//!
//! The descriptor keeps the *exact* length modifier, not a coarsened
//! storage bucket: nanoprintf's binder (`npf_verify_and_assign_values`)
//! pulls each slot from the `va_list` using the length modifier stored
//! in the type vector at the moment the slot was first bound (the
//! reference format's own directive), never the one a later compatible
//! directive happens to spell it with. `StorageWidth` below exists only
//! to decide *compatibility* between two descriptors that share a
//! family but differ in length modifier -- it is never itself stored.
//!
//! Conversion families are already coarse by the time a directive is
//! parsed -- `d`/`i` share one family, `x`/`X` another -- but `%d` and
//! `%u` do NOT: nanoprintf keeps `SIGNED_INT` and `UNSIGNED_INT` as
//! distinct `conv_spec` tags, so a slot bound by one is never
//! satisfied by the other, even though both pull an `int`-sized value.

use crate::spec::{ConvFamily, FormatSpec, LengthMod};

/// The storage-size bucket a directive's length modifier maps to,
/// *within* a single conversion family. Only the integer families
/// (`d/i`, `u`, `o`, `x/X`, `b/B`) actually vary by length modifier, per
/// `npf_arg_sizeof`'s table: `h`/`hh`/no-modifier/`L` all pull a plain
/// `int`, while `l`/`ll`/`j`/`z`/`t` pull a wider word (a real `long`'s
/// width is platform-dependent; this crate assumes the common LP64
/// convention of 8 bytes, consistent with the "long"-length-modifier
/// subtleties spec.md's Non-goals exclude from exact reporting).
/// Every other family (string, pointer, char, writeback, float) pulls a
/// pointer- or double-sized value regardless of length modifier, so
/// they all share `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageWidth {
    /// `sizeof(int)`.
    Four,
    /// `sizeof(long)` / `sizeof(long long)` / `intmax_t` / `ssize_t` /
    /// `ptrdiff_t`, assumed equal-width.
    Eight,
    /// Pointer-sized, double-sized, or otherwise invariant across
    /// length modifiers for this family.
    Other,
}

pub fn storage_width_of(family: ConvFamily, length: LengthMod) -> StorageWidth {
    use ConvFamily::*;
    match family {
        SignedInt | UnsignedInt | Octal | HexInt | Binary => match length {
            LengthMod::None | LengthMod::Hh | LengthMod::H | LengthMod::BigL => StorageWidth::Four,
            LengthMod::L | LengthMod::Ll | LengthMod::J | LengthMod::Z | LengthMod::T => {
                StorageWidth::Eight
            }
        },
        _ => StorageWidth::Other,
    }
}

/// The shape a bound argument slot must have (spec.md §3: "pair
/// `(conv, length_modifier)`"). `infer::infer` is the only code that
/// compares two of these for *compatibility*; everywhere else (the
/// binder, the renderer) reads `length` directly to know how wide an
/// argument to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgType {
    pub family: ConvFamily,
    pub length: LengthMod,
}

impl ArgType {
    /// The sentinel for "slot not yet bound": nanoprintf reuses
    /// `conv_spec == PERCENT` for this, since `%%` itself never
    /// consumes a slot and so can never legitimately appear as a bound
    /// type. `infer.rs` relies on this to detect a fresh slot.
    pub const EMPTY: ArgType = ArgType {
        family: ConvFamily::Percent,
        length: LengthMod::None,
    };

    pub fn is_empty(self) -> bool {
        self == ArgType::EMPTY
    }

    /// `true` for any directive that pulls a signed-integer bit pattern
    /// via `%d`/`%i`, at any length modifier (spec.md §4.3: star
    /// width/precision slots must bind to a plain signed int).
    /// Grounded on `npf_is_int`: every length modifier it recognizes
    /// satisfies `sizeof(int) <= sizeof(target)` on realistic
    /// platforms, so the check reduces to the conversion family alone.
    pub fn is_plain_signed_int(self) -> bool {
        self.family == ConvFamily::SignedInt
    }

    /// Two descriptors are compatible when they are bit-identical, or
    /// share a family and agree on storage size (spec.md §3/§4.4).
    /// `self` is the slot's already-bound descriptor; `want` is what a
    /// new directive on the same slot demands.
    pub fn compatible_with(self, want: ArgType) -> bool {
        if self.family != want.family {
            return false;
        }
        self.length == want.length
            || storage_width_of(self.family, self.length) == storage_width_of(want.family, want.length)
    }
}

/// Derive the `ArgType` a parsed directive demands. Callers must skip
/// `%%` themselves before calling this (it consumes no slot); calling
/// it on a percent directive returns `ArgType::EMPTY`, which would
/// otherwise be indistinguishable from an unbound slot.
pub fn arg_type_of(spec: &FormatSpec) -> ArgType {
    ArgType {
        family: spec.conv,
        length: spec.length,
    }
}

/// Declared width for *rendering* an integer directive: how many low
/// bits of the pulled value actually get converted to digits. This is
/// independent of `StorageWidth` above (a `%hhd` pulls the same
/// `int`-sized storage as `%d` but only displays its low byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    /// `j`/`z`/`t`: pointer/size_t-sized.
    ISize,
}

pub fn declared_int_width(length: LengthMod) -> IntWidth {
    match length {
        LengthMod::Hh => IntWidth::I8,
        LengthMod::H => IntWidth::I16,
        LengthMod::None | LengthMod::BigL => IntWidth::I32,
        LengthMod::L | LengthMod::Ll => IntWidth::I64,
        LengthMod::J | LengthMod::Z | LengthMod::T => IntWidth::ISize,
    }
}

/// `*`/`N$`-style width and precision arguments are always pulled as a
/// plain `int` (spec.md §3 doesn't allow a length modifier on `*`).
pub const STAR_ARG_WIDTH: IntWidth = IntWidth::I32;

/// The declared target type of a `%n` writeback slot, used by the
/// binder to select which `Writeback` variant to pull (spec.md §8
/// scenario note: "Writing back via `%n` into a `double*` (length
/// modifier `L`) ... implementation-defined", grounded on
/// `npf_arg_sizeof`'s `WRITEBACK` case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritebackTarget {
    I8,
    I16,
    I32,
    I64,
    ISize,
    F64,
}

pub fn writeback_target(length: LengthMod) -> WritebackTarget {
    match length {
        LengthMod::Hh => WritebackTarget::I8,
        LengthMod::H => WritebackTarget::I16,
        LengthMod::None => WritebackTarget::I32,
        LengthMod::L => WritebackTarget::I64,
        LengthMod::Ll => WritebackTarget::I64,
        LengthMod::BigL => WritebackTarget::F64,
        LengthMod::J | LengthMod::Z | LengthMod::T => WritebackTarget::I64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_format_spec;

    fn arg_type(s: &str) -> ArgType {
        let (spec, _) = parse_format_spec::<u8>(s.as_bytes()).expect("parses");
        arg_type_of(&spec)
    }

    #[test]
    fn plain_int_is_four_bytes() {
        assert_eq!(
            arg_type("d"),
            ArgType {
                family: ConvFamily::SignedInt,
                length: LengthMod::None,
            }
        );
    }

    #[test]
    fn signed_and_unsigned_are_distinct_families() {
        // %d and %u are NOT interchangeable: nanoprintf keeps their
        // conv_spec tags distinct even though both pull a plain int.
        assert_ne!(arg_type("d"), arg_type("u"));
        assert!(!arg_type("d").compatible_with(arg_type("u")));
    }

    #[test]
    fn hh_and_h_share_storage_with_plain_int() {
        assert!(arg_type("d").compatible_with(arg_type("hhd")));
        assert!(arg_type("d").compatible_with(arg_type("hd")));
        assert_eq!(arg_type("hhd").family, arg_type("d").family);
    }

    #[test]
    fn ll_and_z_widen_storage() {
        assert!(!arg_type("d").compatible_with(arg_type("lld")));
        assert!(!arg_type("d").compatible_with(arg_type("zd")));
        assert!(arg_type("lld").compatible_with(arg_type("zd")));
    }

    #[test]
    fn hex_and_octal_are_distinct_families_too() {
        assert_ne!(arg_type("x").family, arg_type("o").family);
    }

    #[test]
    fn float_families_are_distinct() {
        assert_ne!(arg_type("f").family, arg_type("e").family);
        assert_ne!(arg_type("e").family, arg_type("g").family);
    }

    #[test]
    fn string_char_pointer_storage_is_other() {
        assert_eq!(storage_width_of(arg_type("s").family, arg_type("s").length), StorageWidth::Other);
        assert_eq!(storage_width_of(arg_type("c").family, arg_type("c").length), StorageWidth::Other);
        assert_eq!(storage_width_of(arg_type("p").family, arg_type("p").length), StorageWidth::Other);
    }

    #[test]
    fn empty_sentinel_is_percent() {
        assert!(ArgType::EMPTY.is_empty());
        assert_eq!(ArgType::EMPTY.family, ConvFamily::Percent);
    }

    #[test]
    fn plain_signed_int_recognized_for_star_binding() {
        assert!(arg_type("d").is_plain_signed_int());
        assert!(!arg_type("u").is_plain_signed_int());
        // a length-modified signed int is still "is_int" per nanoprintf,
        // since sizeof(int) <= sizeof(target) holds for every modifier.
        assert!(arg_type("hhd").is_plain_signed_int());
        assert!(arg_type("lld").is_plain_signed_int());
    }

    #[test]
    fn writeback_target_mapping() {
        assert_eq!(writeback_target(LengthMod::None), WritebackTarget::I32);
        assert_eq!(writeback_target(LengthMod::Hh), WritebackTarget::I8);
        assert_eq!(writeback_target(LengthMod::H), WritebackTarget::I16);
        assert_eq!(writeback_target(LengthMod::L), WritebackTarget::I64);
        assert_eq!(writeback_target(LengthMod::BigL), WritebackTarget::F64);
    }
}
