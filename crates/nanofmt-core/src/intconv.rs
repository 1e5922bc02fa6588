//! Integer-to-digit-string reverse conversion (spec.md §4.7 "integer
//! conversion"), grounded on `original_source/nanoprintf.h`'s
//! `npf_utoa_rev`: repeatedly divide by the output radix, writing the
//! least-significant digit first into the front of a scratch buffer, so
//! the digits land in reverse order and the caller reverses (or
//! equivalently, indexes from the end) to get the final string.

/// Render `value` (already unsigned -- the renderer has sign-adjusted
/// and masked to the directive's declared width) into `out` in radix
/// `radix` (2, 8, 10, or 16), least-significant digit first. Returns the
/// number of digits written, always at least 1 (so `0` renders as `"0"`,
/// not the empty string).
///
/// `out` must be at least 64 code units long to hold a 64-bit value in
/// binary; callers size their scratch buffers accordingly
/// (`EngineConfig::SCRATCH_LEN`).
pub fn render_uint_rev(mut value: u64, radix: u32, uppercase: bool, out: &mut [u8]) -> usize {
    debug_assert!(matches!(radix, 2 | 8 | 10 | 16));
    let digits = if uppercase {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut n = 0;
    loop {
        let digit = (value % radix as u64) as usize;
        out[n] = digits[digit];
        n += 1;
        value /= radix as u64;
        if value == 0 {
            break;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Render then un-reverse into a fixed buffer, for comparison against
    /// an expected forward-order ASCII string.
    fn forward(value: u64, radix: u32, uppercase: bool) -> ([u8; 64], usize) {
        let mut rev = [0u8; 64];
        let n = render_uint_rev(value, radix, uppercase, &mut rev);
        let mut out = [0u8; 64];
        for i in 0..n {
            out[i] = rev[n - 1 - i];
        }
        (out, n)
    }

    fn assert_renders_to(value: u64, radix: u32, uppercase: bool, expected: &str) {
        let (out, n) = forward(value, radix, uppercase);
        assert_eq!(&out[..n], expected.as_bytes());
    }

    #[test]
    fn zero_renders_as_single_digit() {
        assert_renders_to(0, 10, false, "0");
    }

    #[test]
    fn decimal() {
        assert_renders_to(12345, 10, false, "12345");
    }

    #[test]
    fn hex_lower_and_upper() {
        assert_renders_to(0xdead_beef, 16, false, "deadbeef");
        assert_renders_to(0xdead_beef, 16, true, "DEADBEEF");
    }

    #[test]
    fn octal_and_binary() {
        assert_renders_to(8, 8, false, "10");
        assert_renders_to(5, 2, false, "101");
    }

    #[test]
    fn max_u64() {
        assert_renders_to(u64::MAX, 10, false, "18446744073709551615");
    }
}
