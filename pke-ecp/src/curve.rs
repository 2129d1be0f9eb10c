//! Curve families and the engine operations each of them offers.

use crate::{
    AffinePoint, CurveGroup, Engine, Error, Fault, Family, Registry, Result, Word,
    codec::decode_le,
    params::{MontgomeryParams, WeierstrassParams},
};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Engine operation exposed per curve family.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Capability {
    /// Public key validation.
    Verify,
    /// Scalar multiplication.
    Multiply,
    /// Point addition.
    Add,
}

/// A registered curve, resolved to its engine parameters.
#[derive(Copy, Clone, Debug)]
pub enum Curve {
    /// Short Weierstrass curve: full `(x, y)` arithmetic.
    ShortWeierstrass(&'static WeierstrassParams),
    /// Montgomery curve: X-only multiplication, nothing else.
    Montgomery(&'static MontgomeryParams),
}

impl Curve {
    /// Classify `group` and look it up in `registry`.
    pub fn resolve(registry: &Registry, group: &CurveGroup) -> Option<Self> {
        match group.family() {
            Family::ShortWeierstrass => registry
                .short_weierstrass(group.id())
                .map(Curve::ShortWeierstrass),
            Family::Montgomery => registry.montgomery(group.id()).map(Curve::Montgomery),
            Family::None => None,
        }
    }

    /// Operand length in words.
    pub fn word_len(&self) -> usize {
        match self {
            Curve::ShortWeierstrass(params) => params.word_len(),
            Curve::Montgomery(params) => params.word_len(),
        }
    }

    /// Do points of this curve carry a y-coordinate?
    pub fn has_y(&self) -> bool {
        matches!(self, Curve::ShortWeierstrass(_))
    }

    /// Is `capability` offered for this curve?
    pub fn supports(&self, capability: Capability) -> bool {
        match self {
            Curve::ShortWeierstrass(_) => true,
            Curve::Montgomery(_) => capability == Capability::Multiply,
        }
    }

    /// Fail with [`Error::UnsupportedFeature`] unless `capability` is offered.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            debug!("{:?} is not offered for {:?}", capability, self);
            Err(Error::UnsupportedFeature)
        }
    }

    /// Ask the engine whether `(x, y)` is on the curve.
    pub fn verify<E: Engine>(&self, engine: &mut E, x: &[Word], y: &[Word]) -> Result<()> {
        match self {
            Curve::ShortWeierstrass(params) => match engine.point_on_curve(params, x, y) {
                Ok(true) => Ok(()),
                Ok(false) => Err(Error::InvalidKey),
                Err(fault) => {
                    warn!("point verification fault: {}", fault);
                    Err(Error::UnsupportedFeature)
                }
            },
            Curve::Montgomery(_) => Err(Error::UnsupportedFeature),
        }
    }

    /// `(x, y) = k · (x, y)`; on Montgomery curves only `x` is used.
    pub fn multiply<E: Engine>(
        &self,
        engine: &mut E,
        k: &[Word],
        x: &mut [Word],
        y: &mut [Word],
    ) -> Result<()> {
        let status = match self {
            Curve::ShortWeierstrass(params) => engine.point_multiply(params, k, x, y),
            Curve::Montgomery(params) => engine.x_only_multiply(params, k, x),
        };

        status.map_err(accel_failed)
    }

    /// `(x1, y1) = (x1, y1) + (x2, y2)`
    pub fn add<E: Engine>(
        &self,
        engine: &mut E,
        x1: &mut [Word],
        y1: &mut [Word],
        x2: &[Word],
        y2: &[Word],
    ) -> Result<()> {
        match self {
            Curve::ShortWeierstrass(params) => engine
                .point_add(params, x1, y1, x2, y2)
                .map_err(accel_failed),
            Curve::Montgomery(_) => Err(Error::UnsupportedFeature),
        }
    }

    /// Build the caller-facing result from engine operands.
    pub fn output(&self, x: &[Word], y: &[Word]) -> AffinePoint {
        let y = match self {
            Curve::ShortWeierstrass(_) => decode_le(y),
            Curve::Montgomery(_) => BigUint::zero(),
        };

        AffinePoint {
            x: Some(decode_le(x)),
            y: Some(y),
            z: Some(BigUint::one()),
        }
    }
}

fn accel_failed(fault: Fault) -> Error {
    warn!("engine fault: {}", fault);
    Error::HardwareAccelFailed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GroupId, params};

    #[test]
    fn resolve_by_family() {
        let registry = Registry::builtin();

        let curve = Curve::resolve(&registry, &CurveGroup::load(GroupId::Secp256k1)).unwrap();
        assert!(matches!(curve, Curve::ShortWeierstrass(p) if core::ptr::eq(p, &params::SECP256K1)));

        let curve = Curve::resolve(&registry, &CurveGroup::load(GroupId::Curve25519)).unwrap();
        assert!(matches!(curve, Curve::Montgomery(_)));

        assert!(Curve::resolve(&registry, &CurveGroup::load(GroupId::Secp384r1)).is_none());
    }

    #[test]
    fn uninitialised_group_does_not_resolve() {
        let registry = Registry::builtin();
        let group = CurveGroup::new(GroupId::Secp256r1, 256, AffinePoint::default());
        assert!(Curve::resolve(&registry, &group).is_none());
    }

    #[test]
    fn montgomery_capabilities() {
        let curve = Curve::Montgomery(&params::CURVE25519);
        assert!(curve.supports(Capability::Multiply));
        assert_eq!(curve.require(Capability::Verify), Err(Error::UnsupportedFeature));
        assert_eq!(curve.require(Capability::Add), Err(Error::UnsupportedFeature));
        assert!(!curve.has_y());
    }

    #[test]
    fn weierstrass_capabilities() {
        let curve = Curve::ShortWeierstrass(&params::SECP192R1);
        for capability in [Capability::Verify, Capability::Multiply, Capability::Add] {
            assert!(curve.require(capability).is_ok());
        }
        assert_eq!(curve.word_len(), 6);
    }

    #[test]
    fn montgomery_output_has_zero_y() {
        let curve = Curve::Montgomery(&params::CURVE25519);
        let point = curve.output(&[9, 0], &[0xffff_ffff, 0]);
        assert_eq!(point.x, Some(BigUint::from(9u32)));
        assert_eq!(point.y, Some(BigUint::zero()));
        assert_eq!(point.z, Some(BigUint::one()));
    }
}
