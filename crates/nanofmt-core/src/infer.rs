//! Pass 1: argument-type inference (spec.md §4.3), grounded on
//! `original_source/nanoprintf.h`'s `npf_format_to_npf_arg_type`.
//!
//! Walks a format string left to right, assigning each directive (and
//! each `*`-indirected width/precision) to a 1-based argument slot --
//! either the slot it names explicitly (`N$`/`*N$`) or the next
//! unclaimed slot in a single shared sequential counter, in the order
//! encountered. `accept_new_param` controls whether an unbound slot may
//! be bound to a new type here (`true`, building the type vector fresh)
//! or must already match what a prior call bound it to (`false`, the
//! mode `verify` uses to check a candidate format against a reference's
//! already-built vector).

use crate::spec::{ConvFamily, LengthMod, Precision, Width, parse_format_spec};
use crate::types::ArgType;
use crate::unit::CodeUnit;

/// Why inference failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferError {
    /// A directive (or `*`/`N$` indirection) named a slot beyond the
    /// type vector's capacity.
    ArgumentOutOfRange,
    /// A `*`/`N$` width or precision indirection named a slot already
    /// bound to something other than a plain signed int.
    StarArgumentNotInt,
    /// A slot was already bound to an incompatible type (spec.md §4.4).
    TypeMismatch,
}

/// A fixed-capacity vector of inferred argument slot types (spec.md §4.2:
/// "bounded-stack", max 64 positional arguments). `CAP` is independent of
/// `EngineConfig::MAX_ARGS` by design (see `config.rs`'s doc comment) --
/// keeping it consistent with a chosen `EngineConfig` is the caller's
/// responsibility.
#[derive(Debug, Clone, Copy)]
pub struct TypeVector<const CAP: usize = 64> {
    slots: [ArgType; CAP],
}

impl<const CAP: usize> Default for TypeVector<CAP> {
    fn default() -> Self {
        TypeVector {
            slots: [ArgType::EMPTY; CAP],
        }
    }
}

impl<const CAP: usize> TypeVector<CAP> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        CAP
    }

    pub fn get(&self, index: usize) -> ArgType {
        self.slots[index]
    }

    pub fn as_slice(&self) -> &[ArgType] {
        &self.slots
    }
}

/// Run pass 1 over `format`, filling in `types`. Returns the highest
/// 1-based slot index actually referenced (`used_max`; 0 if the format
/// consumes no arguments at all).
pub fn infer<U: CodeUnit, const CAP: usize>(
    format: &[U],
    accept_new_param: bool,
    types: &mut TypeVector<CAP>,
) -> Result<usize, InferError> {
    let nargs = CAP;
    let mut n = 0usize; // shared sequential cursor for un-numbered slots
    let mut used_max = 0usize;
    let mut cur = 0usize;

    while cur < format.len() {
        if format[cur].as_ascii() != Some(b'%') {
            cur += 1;
            continue;
        }
        let directive = &format[cur + 1..];
        let (fs, fs_len) = match parse_format_spec(directive) {
            Some(parsed) => parsed,
            None => {
                cur += 1;
                continue;
            }
        };
        cur += 1 + fs_len;

        if fs.conv == ConvFamily::Percent {
            continue;
        }

        // Star-indirected field width: claims a slot that must already
        // be (or become) a plain signed int.
        if let Width::Star { explicit_order } = fs.width {
            let idx = match explicit_order {
                Some(v) => v,
                None => {
                    n += 1;
                    n
                }
            };
            if idx == 0 || idx > nargs {
                return Err(InferError::ArgumentOutOfRange);
            }
            used_max = used_max.max(idx);
            bind_plain_int_slot(types, idx - 1, accept_new_param)?;
        }

        // Star-indirected precision: same rule.
        if let Precision::Star { explicit_order } = fs.precision {
            let idx = match explicit_order {
                Some(v) => v,
                None => {
                    n += 1;
                    n
                }
            };
            if idx == 0 || idx > nargs {
                return Err(InferError::ArgumentOutOfRange);
            }
            used_max = used_max.max(idx);
            bind_plain_int_slot(types, idx - 1, accept_new_param)?;
        }

        // The directive's own argument.
        let order = if fs.order == 0 {
            n += 1;
            n
        } else {
            fs.order
        };
        if order > nargs {
            return Err(InferError::ArgumentOutOfRange);
        }
        used_max = used_max.max(order);

        let want = crate::types::arg_type_of(&fs);
        let slot = &mut types.slots[order - 1];
        if accept_new_param && slot.is_empty() {
            *slot = want;
        }
        if !slot.compatible_with(want) {
            return Err(InferError::TypeMismatch);
        }
    }

    Ok(used_max)
}

fn bind_plain_int_slot<const CAP: usize>(
    types: &mut TypeVector<CAP>,
    index: usize,
    accept_new_param: bool,
) -> Result<(), InferError> {
    let slot = &mut types.slots[index];
    if accept_new_param && slot.is_empty() {
        *slot = ArgType {
            family: ConvFamily::SignedInt,
            length: LengthMod::None,
        };
    }
    if !slot.is_plain_signed_int() {
        return Err(InferError::StarArgumentNotInt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_sequential() {
        let mut types = TypeVector::<8>::new();
        let used = infer("%d %s".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 2);
        assert_eq!(types.get(0).family, ConvFamily::SignedInt);
        assert_eq!(types.get(1).family, ConvFamily::Str);
    }

    #[test]
    fn positional_reorder() {
        let mut types = TypeVector::<8>::new();
        let used = infer("%2$s %1$d".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 2);
        assert_eq!(types.get(0).family, ConvFamily::SignedInt);
        assert_eq!(types.get(1).family, ConvFamily::Str);
    }

    #[test]
    fn star_width_claims_a_slot() {
        let mut types = TypeVector::<8>::new();
        // "%*d" : slot 1 is the width (int), slot 2 is the value.
        let used = infer("%*d".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 2);
        assert!(types.get(0).is_plain_signed_int());
        assert_eq!(types.get(1).family, ConvFamily::SignedInt);
    }

    #[test]
    fn star_precision_on_non_int_rejected() {
        let mut types = TypeVector::<8>::new();
        // slot 1 is bound to Str by the first directive, then reused as
        // a `*` precision source for the second -- incompatible.
        let err = infer("%1$s %.*1$d".as_bytes(), true, &mut types).unwrap_err();
        assert_eq!(err, InferError::StarArgumentNotInt);
    }

    #[test]
    fn type_conflict_same_slot_different_family() {
        let mut types = TypeVector::<8>::new();
        let err = infer("%1$d %1$s".as_bytes(), true, &mut types).unwrap_err();
        assert_eq!(err, InferError::TypeMismatch);
    }

    #[test]
    fn signed_unsigned_on_same_slot_is_a_conflict() {
        let mut types = TypeVector::<8>::new();
        let err = infer("%1$d %1$u".as_bytes(), true, &mut types).unwrap_err();
        assert_eq!(err, InferError::TypeMismatch);
    }

    #[test]
    fn differing_length_mod_same_storage_is_compatible() {
        let mut types = TypeVector::<8>::new();
        // hh and no-modifier both pull a plain int: compatible.
        let used = infer("%1$hhd %1$d".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 1);
    }

    #[test]
    fn out_of_range_order_rejected() {
        let mut types = TypeVector::<2>::new();
        let err = infer("%3$d".as_bytes(), true, &mut types).unwrap_err();
        assert_eq!(err, InferError::ArgumentOutOfRange);
    }

    #[test]
    fn percent_literal_consumes_no_slot() {
        let mut types = TypeVector::<8>::new();
        let used = infer("100%% done: %d".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 1);
    }

    #[test]
    fn accept_new_param_false_requires_preexisting_binding() {
        let mut types = TypeVector::<8>::new();
        infer("%d".as_bytes(), true, &mut types).unwrap();
        // Re-running without accept_new_param over a format that touches
        // an unbound slot must fail rather than silently bind it.
        let err = infer("%d %s".as_bytes(), false, &mut types).unwrap_err();
        assert_eq!(err, InferError::TypeMismatch);
    }

    #[test]
    fn no_arguments_used_max_zero() {
        let mut types = TypeVector::<8>::new();
        let used = infer("no directives here".as_bytes(), true, &mut types).unwrap();
        assert_eq!(used, 0);
    }
}
