//! Compile-time configuration of the engine.
//!
//! The per-directive feature toggles of spec.md §6 (field width,
//! precision, float, large length modifiers, binary, writeback, star
//! indirection, positional `n$`) are ordinary Cargo features on this
//! crate (see `Cargo.toml`), checked with `cfg!(feature = "...")` at
//! each branch point in `spec::parse_format_spec` -- the single place
//! directive syntax is recognized -- so a disabled conversion letter or
//! indirection form is simply never matched, and the compiler can fold
//! and eliminate the dead arm. The re-architecture note in spec.md §9
//! calls this out as equivalent to (and, for a Cargo-based target,
//! preferable to) a generic parameter or const struct.
//!
//! The two remaining knobs, maximum positional arguments and scratch
//! buffer size, are genuinely value-shaped rather than feature-shaped
//! (a caller picks a `TypeVector<CAP>` and a scratch array length to
//! match their stack budget), so they are modeled as an `EngineConfig`
//! trait with a `validate()` that checks the cross-feature invariant
//! spec.md §9 calls out explicitly: "float requires precision".

use core::fmt;

/// Runtime-shaped engine limits, validated once at startup.
pub trait EngineConfig {
    /// Maximum positional argument slots (spec.md §6: 64 per call).
    const MAX_ARGS: usize = 64;
    /// Scratch buffer size for float conversion (spec.md §3: ≥23 code
    /// units). Integer conversions (`d`/`u`/`o`/`x`/`b`/`p`) always use a
    /// fixed 64-unit stack buffer in `render.rs` regardless of this
    /// value -- stable Rust has no way to size a local array from an
    /// associated trait constant, and 64 is a hard requirement (the
    /// widest possible `%b` expansion of a 64-bit value), not a tunable
    /// one. This constant only governs `floatconv::render_float_rev`'s
    /// buffer, where a too-small value legitimately (and harmlessly)
    /// degrades extreme-magnitude floats to the `"err"` special value,
    /// matching `original_source/nanoprintf.h`'s own
    /// `NANOPRINTF_CONVERSION_BUFFER_SIZE` behavior.
    const SCRATCH_LEN: usize = 32;

    /// Check the invariants spec.md §9 requires to hold before any
    /// directive is parsed: float conversions need precision support,
    /// the scratch buffer is large enough for the longest digit run,
    /// and at least one argument slot exists.
    fn validate() -> Result<(), ConfigError> {
        if cfg!(feature = "float") && !cfg!(feature = "precision") {
            return Err(ConfigError::FloatRequiresPrecision);
        }
        if Self::SCRATCH_LEN < 23 {
            return Err(ConfigError::ScratchTooSmall);
        }
        if Self::MAX_ARGS == 0 {
            return Err(ConfigError::NoArgumentSlots);
        }
        Ok(())
    }
}

/// Defaults matching spec.md exactly: 64 argument slots, a 32-unit
/// scratch buffer (spec.md's minimum of 23 plus headroom for `%b` of a
/// 64-bit value plus sign/prefix).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfig;

impl EngineConfig for DefaultConfig {}

/// A tighter configuration representative of a small embedded target:
/// 16 argument slots, the minimum legal scratch buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactConfig;

impl EngineConfig for CompactConfig {
    const MAX_ARGS: usize = 16;
    const SCRATCH_LEN: usize = 23;
}

/// A configuration invariant was violated at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The `float` feature is enabled without `precision`.
    FloatRequiresPrecision,
    /// `SCRATCH_LEN` is below the 23-code-unit minimum spec.md §3 requires.
    ScratchTooSmall,
    /// `MAX_ARGS` is zero.
    NoArgumentSlots,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::FloatRequiresPrecision => {
                "float conversions require precision support (enable the \"precision\" feature)"
            }
            ConfigError::ScratchTooSmall => "scratch buffer must be at least 23 code units",
            ConfigError::NoArgumentSlots => "at least one argument slot is required",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert_eq!(DefaultConfig::validate(), Ok(()));
    }

    #[test]
    fn compact_config_validates() {
        assert_eq!(CompactConfig::validate(), Ok(()));
    }

    struct TooSmall;
    impl EngineConfig for TooSmall {
        const SCRATCH_LEN: usize = 10;
    }

    #[test]
    fn rejects_undersized_scratch() {
        assert_eq!(TooSmall::validate(), Err(ConfigError::ScratchTooSmall));
    }

    struct NoSlots;
    impl EngineConfig for NoSlots {
        const MAX_ARGS: usize = 0;
    }

    #[test]
    fn rejects_zero_slots() {
        assert_eq!(NoSlots::validate(), Err(ConfigError::NoArgumentSlots));
    }
}
