//! Pass 0: the format verifier (spec.md §4.6). Runs inference over the
//! reference format (building a type vector from scratch), then --  if a
//! distinct candidate format is supplied -- runs inference again over
//! it against the *same* type vector with `accept_new_param = false`,
//! so any slot the candidate touches must already have been bound by
//! the reference to an identical-or-compatible type.

use crate::infer::{InferError, TypeVector, infer};
use crate::unit::CodeUnit;

/// Check that `format` (or `reference` itself, if `format` is `None`)
/// demands no argument shape the reference didn't already establish.
///
/// `CAP` bounds how many positional arguments either format may use
/// (spec.md §4.2: max 64). Returns `false` on any inference error --
/// an out-of-range slot, a star-width argument that isn't a plain int,
/// or a type conflict -- never panics on a malformed format string.
pub fn verify<U: CodeUnit, const CAP: usize>(reference: &[U], format: Option<&[U]>) -> bool {
    verify_infer::<U, CAP>(reference, format).is_ok()
}

/// Why verification failed. Wraps `InferError` for the two real passes
/// over `reference`/`format`; `Gap` is verify's own check, run between
/// them (see `verify_infer`'s doc comment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    Reference(InferError),
    Gap,
    Candidate(InferError),
}

/// `verify`'s full algorithm, but returning the populated `TypeVector`
/// and the reference's `used_max` instead of collapsing the result to a
/// bool -- `render.rs` needs both to drive `bind::bind` afterward
/// without re-running inference a third time.
pub fn verify_infer<U: CodeUnit, const CAP: usize>(
    reference: &[U],
    format: Option<&[U]>,
) -> Result<(TypeVector<CAP>, usize), VerifyError> {
    let mut types = TypeVector::<CAP>::new();
    let reference_max = infer(reference, true, &mut types).map_err(VerifyError::Reference)?;

    // A reference that skips an argument number (e.g. "%2$d" alone,
    // leaving slot 1 unbound) can never be rendered: there would be no
    // way to know how many bytes to skip for the untyped argument
    // ahead of it. Reject any gap in `1..=reference_max`.
    if types.as_slice()[..reference_max]
        .iter()
        .any(|t| t.is_empty())
    {
        return Err(VerifyError::Gap);
    }

    if let Some(candidate) = format {
        infer(candidate, false, &mut types).map_err(VerifyError::Candidate)?;
    }

    Ok((types, reference_max))
}
