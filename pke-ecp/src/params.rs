//! Curve domain parameters in the engine's operand layout.
//!
//! Every multi-word value is a little-endian [`Word`] slice of exactly
//! [`word_len`]`(bits)` words. Alongside the curve equation, each record
//! carries the two Montgomery-multiplication constants the engine needs:
//!
//! - `p_h`: `R² mod p`, where `R = 2^(32 · word_len)`
//! - `p_n1`: `-p⁻¹ mod 2³²`

use crate::{Word, codec::le_words, word_len};

/// Parameters of a short Weierstrass curve `y² = x³ + ax + b` over `GF(p)`.
#[derive(Debug, Eq, PartialEq)]
pub struct WeierstrassParams {
    /// Bit length of `p`.
    pub bits: usize,

    /// Field modulus.
    pub p: &'static [Word],

    /// `R² mod p`.
    pub p_h: &'static [Word],

    /// `-p⁻¹ mod 2³²`.
    pub p_n1: Word,

    /// Curve coefficient `a`.
    pub a: &'static [Word],

    /// Curve coefficient `b`.
    pub b: &'static [Word],
}

impl WeierstrassParams {
    /// Operand length in words.
    pub const fn word_len(&self) -> usize {
        word_len(self.bits)
    }
}

/// Parameters of a Montgomery curve `y² = x³ + Ax² + x` over `GF(p)`.
#[derive(Debug, Eq, PartialEq)]
pub struct MontgomeryParams {
    /// Bit length of `p`.
    pub bits: usize,

    /// Field modulus.
    pub p: &'static [Word],

    /// `R² mod p`.
    pub p_h: &'static [Word],

    /// `-p⁻¹ mod 2³²`.
    pub p_n1: Word,

    /// Ladder constant `(A - 2) / 4`.
    pub a24: &'static [Word],
}

impl MontgomeryParams {
    /// Operand length in words.
    pub const fn word_len(&self) -> usize {
        word_len(self.bits)
    }
}

/// NIST P-192 (secp192r1).
pub static SECP192R1: WeierstrassParams = WeierstrassParams {
    bits: 192,
    p: &le_words::<6>("fffffffffffffffffffffffffffffffeffffffffffffffff"),
    p_h: &le_words::<6>("000000000000000100000000000000020000000000000001"),
    p_n1: 0x0000_0001,
    a: &le_words::<6>("fffffffffffffffffffffffffffffffefffffffffffffffc"),
    b: &le_words::<6>("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
};

/// secp192k1.
pub static SECP192K1: WeierstrassParams = WeierstrassParams {
    bits: 192,
    p: &le_words::<6>("fffffffffffffffffffffffffffffffffffffffeffffee37"),
    p_h: &le_words::<6>("0000000000000000000000000000000100002392013c4fd1"),
    p_n1: 0x7446_d879,
    a: &le_words::<6>("000000000000000000000000000000000000000000000000"),
    b: &le_words::<6>("000000000000000000000000000000000000000000000003"),
};

/// NIST P-224 (secp224r1).
pub static SECP224R1: WeierstrassParams = WeierstrassParams {
    bits: 224,
    p: &le_words::<7>("ffffffffffffffffffffffffffffffff000000000000000000000001"),
    p_h: &le_words::<7>("00000000fffffffffffffffffffffffe000000000000000000000001"),
    p_n1: 0xffff_ffff,
    a: &le_words::<7>("fffffffffffffffffffffffffffffffefffffffffffffffffffffffe"),
    b: &le_words::<7>("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
};

/// secp224k1.
pub static SECP224K1: WeierstrassParams = WeierstrassParams {
    bits: 224,
    p: &le_words::<7>("fffffffffffffffffffffffffffffffffffffffffffffffeffffe56d"),
    p_h: &le_words::<7>("00000000000000000000000000000000000000010000352602c23069"),
    p_n1: 0x198d_139b,
    a: &le_words::<7>("00000000000000000000000000000000000000000000000000000000"),
    b: &le_words::<7>("00000000000000000000000000000000000000000000000000000005"),
};

/// NIST P-256 (secp256r1).
pub static SECP256R1: WeierstrassParams = WeierstrassParams {
    bits: 256,
    p: &le_words::<8>("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
    p_h: &le_words::<8>("00000004fffffffdfffffffffffffffefffffffbffffffff0000000000000003"),
    p_n1: 0x0000_0001,
    a: &le_words::<8>("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
    b: &le_words::<8>("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
};

/// secp256k1.
pub static SECP256K1: WeierstrassParams = WeierstrassParams {
    bits: 256,
    p: &le_words::<8>("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
    p_h: &le_words::<8>("000000000000000000000000000000000000000000000001000007a2000e90a1"),
    p_n1: 0xd225_3531,
    a: &le_words::<8>("0000000000000000000000000000000000000000000000000000000000000000"),
    b: &le_words::<8>("0000000000000000000000000000000000000000000000000000000000000007"),
};

/// brainpoolP256r1.
pub static BRAINPOOL_P256R1: WeierstrassParams = WeierstrassParams {
    bits: 256,
    p: &le_words::<8>("a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377"),
    p_h: &le_words::<8>("4717aa21e5957fa8a1ecdacd6b1ac8075cce4c26614d4f4d8cfedf7ba6465b6c"),
    p_n1: 0xcefd_89b9,
    a: &le_words::<8>("7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9"),
    b: &le_words::<8>("26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6"),
};

/// Curve25519.
pub static CURVE25519: MontgomeryParams = MontgomeryParams {
    bits: 255,
    p: &le_words::<8>("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
    p_h: &le_words::<8>("00000000000000000000000000000000000000000000000000000000000005a4"),
    p_n1: 0x286b_ca1b,
    a24: &le_words::<8>("000000000000000000000000000000000000000000000000000000000001db41"),
};
