//! Curve groups as seen by the caller, and their classification.

use crate::{Word, codec::{decode_le, le_words}, word_len};
use num_bigint::BigUint;
use num_traits::One;

/// Named curve identifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum GroupId {
    /// NIST P-192.
    Secp192r1,
    /// NIST P-224.
    Secp224r1,
    /// NIST P-256.
    Secp256r1,
    /// NIST P-384.
    Secp384r1,
    /// NIST P-521.
    Secp521r1,
    /// brainpoolP256r1.
    BrainpoolP256r1,
    /// Curve25519.
    Curve25519,
    /// secp192k1.
    Secp192k1,
    /// secp224k1.
    Secp224k1,
    /// secp256k1.
    Secp256k1,
}

impl GroupId {
    /// Every known identifier.
    pub const ALL: [GroupId; 10] = [
        GroupId::Secp192r1,
        GroupId::Secp224r1,
        GroupId::Secp256r1,
        GroupId::Secp384r1,
        GroupId::Secp521r1,
        GroupId::BrainpoolP256r1,
        GroupId::Curve25519,
        GroupId::Secp192k1,
        GroupId::Secp224k1,
        GroupId::Secp256k1,
    ];
}

/// Curve shape, derived from the generator's coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Family {
    /// Group not initialised.
    None,
    /// `y² = x³ + ax + b`
    ShortWeierstrass,
    /// `y² = x³ + ax² + x`, used with X-only arithmetic.
    Montgomery,
}

/// Curve point with optional coordinates.
///
/// A coordinate of `None` is unset. Results produced by this crate are
/// affine with `z = 1`; for Montgomery curves `y` is set to zero and carries
/// no meaning.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AffinePoint {
    /// x-coordinate
    pub x: Option<BigUint>,

    /// y-coordinate
    pub y: Option<BigUint>,

    /// z-coordinate
    pub z: Option<BigUint>,
}

impl AffinePoint {
    /// Affine point `(x, y)`.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(BigUint::one()),
        }
    }

    /// X-only point, as used on Montgomery curves.
    pub fn from_x(x: BigUint) -> Self {
        Self {
            x: Some(x),
            y: None,
            z: Some(BigUint::one()),
        }
    }
}

/// Elliptic curve group description.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveGroup {
    id: GroupId,
    pbits: usize,
    generator: AffinePoint,
}

impl CurveGroup {
    /// Describe a group by hand.
    ///
    /// The generator's coordinates decide the [`Family`]; pass
    /// `AffinePoint::default()` for an uninitialised group.
    pub fn new(id: GroupId, pbits: usize, generator: AffinePoint) -> Self {
        Self {
            id,
            pbits,
            generator,
        }
    }

    /// Standard domain description of a named curve.
    pub fn load(id: GroupId) -> Self {
        let (pbits, generator) = match id {
            GroupId::Secp192r1 => (192, affine(&SECP192R1_G)),
            GroupId::Secp224r1 => (224, affine(&SECP224R1_G)),
            GroupId::Secp256r1 => (256, affine(&SECP256R1_G)),
            GroupId::Secp384r1 => (384, affine(&SECP384R1_G)),
            GroupId::Secp521r1 => (521, affine(&SECP521R1_G)),
            GroupId::BrainpoolP256r1 => (256, affine(&BRAINPOOL_P256R1_G)),
            GroupId::Curve25519 => (255, AffinePoint::from_x(decode_le(&CURVE25519_GX))),
            GroupId::Secp192k1 => (192, affine(&SECP192K1_G)),
            GroupId::Secp224k1 => (224, affine(&SECP224K1_G)),
            GroupId::Secp256k1 => (256, affine(&SECP256K1_G)),
        };

        Self::new(id, pbits, generator)
    }

    /// Curve identifier.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Bit length of the field prime.
    pub fn pbits(&self) -> usize {
        self.pbits
    }

    /// Operand length in words for this group.
    pub fn word_len(&self) -> usize {
        word_len(self.pbits)
    }

    /// Base point.
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Classify the group from its generator.
    pub fn family(&self) -> Family {
        match (&self.generator.x, &self.generator.y) {
            (None, _) => Family::None,
            (Some(_), None) => Family::Montgomery,
            (Some(_), Some(_)) => Family::ShortWeierstrass,
        }
    }
}

type Generator<const N: usize> = ([Word; N], [Word; N]);

fn affine<const N: usize>((x, y): &Generator<N>) -> AffinePoint {
    AffinePoint::new(decode_le(x), decode_le(y))
}

static SECP192R1_G: Generator<6> = (
    le_words("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
    le_words("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
);

static SECP192K1_G: Generator<6> = (
    le_words("db4ff10ec057e9ae26b07d0280b7f4341da5d1b1eae06c7d"),
    le_words("9b2f2f6d9c5628a7844163d015be86344082aa88d95e2f9d"),
);

static SECP224R1_G: Generator<7> = (
    le_words("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
    le_words("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
);

static SECP224K1_G: Generator<7> = (
    le_words("a1455b334df099df30fc28a169a467e9e47075a90f7e650eb6b7a45c"),
    le_words("7e089fed7fba344282cafbd6f7e319f7c0b0bd59e2ca4bdb556d61a5"),
);

static SECP256R1_G: Generator<8> = (
    le_words("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    le_words("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
);

static SECP256K1_G: Generator<8> = (
    le_words("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
    le_words("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
);

static BRAINPOOL_P256R1_G: Generator<8> = (
    le_words("8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262"),
    le_words("547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997"),
);

static SECP384R1_G: Generator<12> = (
    le_words(
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
    ),
    le_words(
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
    ),
);

static SECP521R1_G: Generator<17> = (
    le_words(
        "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
    ),
    le_words(
        "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650",
    ),
);

/// u = 9
static CURVE25519_GX: [Word; 8] = le_words("9");
