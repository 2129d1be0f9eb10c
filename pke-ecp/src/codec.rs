//! Conversion between [`BigUint`] and the engine's fixed-width operands.

use crate::{Error, Result, Word};
use num_bigint::BigUint;
use zeroize::Zeroize;

/// Write `value` into `out`, least significant word first.
///
/// Words of `out` above the value's most significant word are zeroed. If a
/// nonzero word of `value` would not fit, `out` is wiped and
/// [`Error::BufferTooSmall`] is returned.
pub fn encode_le(value: &BigUint, out: &mut [Word]) -> Result<()> {
    let mut digits = value.iter_u32_digits();

    for word in out.iter_mut() {
        *word = digits.next().unwrap_or(0);
    }

    if digits.any(|digit| digit != 0) {
        out.zeroize();
        return Err(Error::BufferTooSmall);
    }

    Ok(())
}

/// Read a little-endian operand back into a [`BigUint`].
///
/// The result is normalised: high zero words do not survive.
pub fn decode_le(buf: &[Word]) -> BigUint {
    BigUint::from_slice(buf)
}

/// Like [`decode_le`], but overwrites `dst` in place.
pub fn decode_le_into(dst: &mut BigUint, buf: &[Word]) {
    dst.assign_from_slice(buf);
}

/// Parse a big-endian hex string into an `N`-word little-endian operand.
///
/// Intended for `const` parameter tables; malformed input fails the build.
pub const fn le_words<const N: usize>(hex: &str) -> [Word; N] {
    let bytes = hex.as_bytes();
    assert!(bytes.len() <= N * 8, "hex string exceeds operand width");

    let mut words = [0; N];
    let mut i = 0;

    while i < bytes.len() {
        let nibble = match bytes[bytes.len() - 1 - i] {
            c @ b'0'..=b'9' => c - b'0',
            c @ b'a'..=b'f' => c - b'a' + 10,
            c @ b'A'..=b'F' => c - b'A' + 10,
            _ => panic!("invalid hex digit"),
        };

        words[i / 8] |= (nibble as Word) << ((i % 8) * 4);
        i += 1;
    }

    words
}
