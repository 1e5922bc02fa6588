//! Pass 1.5: the argument binder (spec.md §4.5), grounded on
//! `original_source/nanoprintf.h`'s `npf_verify_and_assign_values`.
//!
//! Walks the slots `1..=used_max` a `TypeVector` already inferred and
//! pulls one value per slot from an `ArgPuller`, in order -- the same
//! order a real `va_list` would be advanced in. There is no type check
//! here: the slot's `ArgType` (family, length modifier) already decided
//! what to pull and at what width; a mismatch between what inference
//! bound and what the puller actually hands back is the puller
//! implementation's problem, not this function's.
//!
//! An unbound slot (`conv == %`) inside `1..=used_max` is a "gap" --
//! spec.md §4.5: "a hard error" -- and `verify` is expected to have
//! already rejected it, but `bind` checks again rather than trusting
//! that invariant silently.

use crate::infer::TypeVector;
use crate::source::ArgPuller;
use crate::spec::ConvFamily;
use crate::types::{ArgType, declared_int_width, writeback_target};
use crate::unit::CodeUnit;
use crate::value::ArgValue;

/// Why binding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// A slot inside `1..=used_max` was never bound by inference.
    Gap,
}

/// Pull `used_max` argument values from `puller`, in slot order, into
/// `out` (`out` must be at least `used_max` long). `types` is the
/// vector `infer::infer` built over the *reference* format -- the
/// format actually rendered may be a distinct, already-`verify`d
/// candidate, but the values are always pulled according to the
/// reference's bound types, never the candidate's own spelling of a
/// compatible-but-different length modifier.
pub fn bind<'a, U: CodeUnit, P: ArgPuller<'a, U>, const CAP: usize>(
    types: &TypeVector<CAP>,
    used_max: usize,
    puller: &mut P,
    out: &mut [ArgValue<'a, U>],
) -> Result<(), BindError> {
    for (i, slot) in out.iter_mut().enumerate().take(used_max) {
        let t = types.get(i);
        if t.is_empty() {
            return Err(BindError::Gap);
        }
        *slot = pull_one(t, puller);
    }
    Ok(())
}

fn pull_one<'a, U: CodeUnit, P: ArgPuller<'a, U>>(t: ArgType, puller: &mut P) -> ArgValue<'a, U> {
    match t.family {
        ConvFamily::Percent => {
            // Unreachable in practice: `bind` rejects an empty slot
            // before calling this, and no live directive ever produces
            // an `ArgType` with family `Percent` (that's the sentinel).
            ArgValue::Int(0)
        }
        ConvFamily::Char => ArgValue::Char(puller.pull_char()),
        ConvFamily::Str => ArgValue::Str(puller.pull_str()),
        ConvFamily::Pointer => ArgValue::Pointer(puller.pull_pointer()),
        ConvFamily::SignedInt
        | ConvFamily::UnsignedInt
        | ConvFamily::Octal
        | ConvFamily::HexInt
        | ConvFamily::Binary => ArgValue::Int(puller.pull_int(declared_int_width(t.length))),
        ConvFamily::FloatDec | ConvFamily::FloatSci | ConvFamily::FloatShortest | ConvFamily::FloatHex => {
            ArgValue::Float(puller.pull_float())
        }
        ConvFamily::Writeback => ArgValue::Writeback(puller.pull_writeback(writeback_target(t.length))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::infer;
    use crate::source::SlotValue;
    use crate::value::Writeback;

    #[test]
    fn pulls_in_slot_order() {
        let mut types = TypeVector::<4>::new();
        let used = infer(b"%d %s", true, &mut types).unwrap();

        let mut slots: [SlotValue<u8>; 2] = [SlotValue::Int(42), SlotValue::Str(b"hi")];
        let mut puller = crate::source::SliceArgPuller::new(&mut slots);

        let mut out: [ArgValue<u8>; 4] = core::array::from_fn(|_| ArgValue::Int(0));
        bind(&types, used, &mut puller, &mut out).unwrap();

        match &out[0] {
            ArgValue::Int(v) => assert_eq!(*v, 42),
            _ => panic!("expected Int"),
        }
        match &out[1] {
            ArgValue::Str(crate::value::StrPayload::Native(v)) => assert_eq!(*v, b"hi"),
            _ => panic!("expected native Str"),
        }
    }

    #[test]
    fn gap_in_used_range_is_rejected() {
        // "%2$d" alone never binds slot 1.
        let mut types = TypeVector::<4>::new();
        let used = infer(b"%2$d", true, &mut types).unwrap();
        assert_eq!(used, 2);

        let mut slots = [SlotValue::Int(7)];
        let mut puller = crate::source::SliceArgPuller::new(&mut slots);
        let mut out: [ArgValue<u8>; 4] = core::array::from_fn(|_| ArgValue::Int(0));
        let err = bind(&types, used, &mut puller, &mut out).unwrap_err();
        assert_eq!(err, BindError::Gap);
    }

    #[test]
    fn writeback_slot_pulls_writeback_value() {
        let mut types = TypeVector::<4>::new();
        let used = infer(b"%n", true, &mut types).unwrap();

        let mut count = 0i32;
        let mut slots = [SlotValue::Writeback(Some(Writeback::I32(&mut count)))];
        let mut puller = crate::source::SliceArgPuller::new(&mut slots);
        let mut out: [ArgValue<u8>; 4] = core::array::from_fn(|_| ArgValue::Int(0));
        bind(&types, used, &mut puller, &mut out).unwrap();

        match &mut out[0] {
            ArgValue::Writeback(wb) => wb.store(9),
            _ => panic!("expected Writeback"),
        }
        assert_eq!(count, 9);
    }
}
