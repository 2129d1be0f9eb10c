//! [`Engine`] implemented in software.
//!
//! Textbook affine arithmetic over [`BigUint`] and the RFC 7748 ladder. It
//! is variable time and therefore only suitable for hosts without a public
//! key engine where timing is not a concern, and for exercising the
//! dispatcher.

use crate::{
    Engine, Fault, Word,
    codec::{decode_le, encode_le},
    params::{MontgomeryParams, WeierstrassParams},
    word_len,
};
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Software engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct SoftEngine;

impl SoftEngine {
    /// Create a new software engine.
    pub const fn new() -> Self {
        Self
    }
}

impl Engine for SoftEngine {
    fn point_on_curve(
        &mut self,
        curve: &WeierstrassParams,
        x: &[Word],
        y: &[Word],
    ) -> Result<bool, Fault> {
        let curve = Weierstrass::new(curve);
        let field = &curve.field;
        field.check_width(x)?;
        field.check_width(y)?;

        let (x, y) = (decode_le(x), decode_le(y));
        if x >= field.p || y >= field.p {
            return Ok(false);
        }

        Ok(curve.contains(&x, &y))
    }

    fn point_multiply(
        &mut self,
        curve: &WeierstrassParams,
        k: &[Word],
        x: &mut [Word],
        y: &mut [Word],
    ) -> Result<(), Fault> {
        let curve = Weierstrass::new(curve);
        curve.field.check_width(k)?;
        let point = curve.load(x, y)?;

        let product = curve.mul(&decode_le(k), &point);
        curve.store(&product, x, y)
    }

    fn x_only_multiply(
        &mut self,
        curve: &MontgomeryParams,
        k: &[Word],
        x: &mut [Word],
    ) -> Result<(), Fault> {
        let curve = Montgomery::new(curve);
        curve.field.check_width(k)?;
        curve.field.check_width(x)?;

        let u = curve.ladder(&decode_le(k), &decode_le(x));
        curve.field.store(&u, x)
    }

    fn point_add(
        &mut self,
        curve: &WeierstrassParams,
        x1: &mut [Word],
        y1: &mut [Word],
        x2: &[Word],
        y2: &[Word],
    ) -> Result<(), Fault> {
        let curve = Weierstrass::new(curve);
        let lhs = curve.load(x1, y1)?;
        let rhs = curve.load(x2, y2)?;

        let sum = curve.add(&lhs, &rhs);
        curve.store(&sum, x1, y1)
    }
}

/// `GF(p)`
struct Field {
    p: BigUint,
    len: usize,
}

impl Field {
    fn new(bits: usize, p: &[Word]) -> Self {
        Self {
            p: decode_le(p),
            len: word_len(bits),
        }
    }

    fn check_width(&self, operand: &[Word]) -> Result<(), Fault> {
        if operand.len() == self.len {
            Ok(())
        } else {
            Err(Fault::OperandWidth)
        }
    }

    fn load(&self, operand: &[Word]) -> Result<BigUint, Fault> {
        self.check_width(operand)?;
        let value = decode_le(operand);
        if value >= self.p {
            return Err(Fault::OperandOutOfRange);
        }
        Ok(value)
    }

    fn store(&self, value: &BigUint, operand: &mut [Word]) -> Result<(), Fault> {
        encode_le(value, operand).map_err(|_| Fault::OperandWidth)
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + &self.p - b) % &self.p
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// Inverse by Fermat's little theorem; zero maps to zero.
    fn invert(&self, a: &BigUint) -> BigUint {
        a.modpow(&(&self.p - 2u32), &self.p)
    }
}

/// Affine point, `None` being the point at infinity.
type Point = Option<(BigUint, BigUint)>;

struct Weierstrass {
    field: Field,
    a: BigUint,
    b: BigUint,
}

impl Weierstrass {
    fn new(params: &WeierstrassParams) -> Self {
        Self {
            field: Field::new(params.bits, params.p),
            a: decode_le(params.a),
            b: decode_le(params.b),
        }
    }

    /// `y² = x³ + ax + b`
    fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        let rhs = f.add(&f.mul(&f.add(&f.square(x), &self.a), x), &self.b);
        f.square(y) == rhs
    }

    fn load(&self, x: &[Word], y: &[Word]) -> Result<Point, Fault> {
        let (x, y) = (self.field.load(x)?, self.field.load(y)?);
        if !self.contains(&x, &y) {
            return Err(Fault::NotOnCurve);
        }
        Ok(Some((x, y)))
    }

    fn store(&self, point: &Point, x: &mut [Word], y: &mut [Word]) -> Result<(), Fault> {
        let (px, py) = point.as_ref().ok_or(Fault::PointAtInfinity)?;
        self.field.store(px, x)?;
        self.field.store(py, y)
    }

    fn double(&self, point: &Point) -> Point {
        let (x, y) = point.as_ref()?;
        if y.is_zero() {
            return None;
        }

        let f = &self.field;
        let numerator = f.add(&f.mul(&BigUint::from(3u8), &f.square(x)), &self.a);
        let lambda = f.mul(&numerator, &f.invert(&f.add(y, y)));
        Some(self.chord(&lambda, x, y, x))
    }

    fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (None, _) => return rhs.clone(),
            (_, None) => return lhs.clone(),
            (Some(p), Some(q)) => (p, q),
        };

        let f = &self.field;
        if x1 == x2 {
            if f.add(y1, y2).is_zero() {
                return None;
            }
            return self.double(lhs);
        }

        let lambda = f.mul(&f.sub(y2, y1), &f.invert(&f.sub(x2, x1)));
        Some(self.chord(&lambda, x1, y1, x2))
    }

    /// Third intersection of the line of slope `lambda` through `(x1, y1)`,
    /// reflected: `x3 = λ² - x1 - x2`, `y3 = λ(x1 - x3) - y1`.
    fn chord(
        &self,
        lambda: &BigUint,
        x1: &BigUint,
        y1: &BigUint,
        x2: &BigUint,
    ) -> (BigUint, BigUint) {
        let f = &self.field;
        let x3 = f.sub(&f.sub(&f.square(lambda), x1), x2);
        let y3 = f.sub(&f.mul(lambda, &f.sub(x1, &x3)), y1);
        (x3, y3)
    }

    /// Double-and-add, most significant bit first.
    fn mul(&self, k: &BigUint, point: &Point) -> Point {
        let mut acc = None;
        for bit in bits_msb_first(k) {
            acc = self.double(&acc);
            if bit {
                acc = self.add(&acc, point);
            }
        }
        acc
    }
}

struct Montgomery {
    field: Field,
    bits: usize,
    a24: BigUint,
}

impl Montgomery {
    fn new(params: &MontgomeryParams) -> Self {
        Self {
            field: Field::new(params.bits, params.p),
            bits: params.bits,
            a24: decode_le(params.a24),
        }
    }

    /// RFC 7748 § 5 ladder. Bits of `u` above the field width are ignored and
    /// the scalar is used as given.
    fn ladder(&self, k: &BigUint, u: &BigUint) -> BigUint {
        let f = &self.field;
        let mask = (BigUint::one() << self.bits) - 1u32;
        let x1 = (u & &mask) % &f.p;

        let (mut x2, mut z2) = (BigUint::one(), BigUint::zero());
        let (mut x3, mut z3) = (x1.clone(), BigUint::one());

        for bit in bits_msb_first(k) {
            if bit {
                core::mem::swap(&mut x2, &mut x3);
                core::mem::swap(&mut z2, &mut z3);
            }

            let a = f.add(&x2, &z2);
            let aa = f.square(&a);
            let b = f.sub(&x2, &z2);
            let bb = f.square(&b);
            let e = f.sub(&aa, &bb);
            let c = f.add(&x3, &z3);
            let d = f.sub(&x3, &z3);
            let da = f.mul(&d, &a);
            let cb = f.mul(&c, &b);

            x3 = f.square(&f.add(&da, &cb));
            z3 = f.mul(&x1, &f.square(&f.sub(&da, &cb)));
            z2 = f.mul(&e, &f.add(&aa, &f.mul(&self.a24, &e)));
            x2 = f.mul(&aa, &bb);

            if bit {
                core::mem::swap(&mut x2, &mut x3);
                core::mem::swap(&mut z2, &mut z3);
            }
        }

        f.mul(&x2, &f.invert(&z2))
    }
}

/// Bits of `k` from the most significant word down. Leading zero bits of the
/// top word are included; both algorithms above treat them as no-ops.
fn bits_msb_first(k: &BigUint) -> impl Iterator<Item = bool> {
    let digits: Vec<u32> = k.to_u32_digits();
    digits
        .into_iter()
        .rev()
        .flat_map(|digit| (0..u32::BITS).rev().map(move |i| (digit >> i) & 1 == 1))
}
