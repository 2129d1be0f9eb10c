//! Accelerated point operations.
//!
//! Each operation classifies the group, resolves its engine parameters,
//! encodes the operands into fixed-width scratch buffers, runs the engine
//! calls inside a single [`Accelerator::lock`] section and decodes the result
//! before the section ends. Scratch buffers may hold secret scalars and are
//! wiped on every exit path.
//!
//! [`Error::UnsupportedFeature`] means the request was not attempted and the
//! caller should fall back to software.

use crate::{
    Accelerator, AffinePoint, Capability, Curve, CurveGroup, Engine, Error, MAX_OPERAND_WORDS,
    Registry, Result, Word,
    codec::encode_le,
    guard::{DefaultMutex, EngineMutex},
};
use num_bigint::BigUint;
use zeroize::Zeroize;

/// Routes point operations for registered curves to an accelerator.
pub struct Dispatcher<'a, E, M = DefaultMutex<E>> {
    registry: &'a Registry,
    accelerator: &'a Accelerator<E, M>,
}

impl<'a, E: Engine, M: EngineMutex<E>> Dispatcher<'a, E, M> {
    /// Serve the curves of `registry` with `accelerator`.
    pub fn new(registry: &'a Registry, accelerator: &'a Accelerator<E, M>) -> Self {
        Self {
            registry,
            accelerator,
        }
    }

    /// Check that `point` lies on the curve of `group`.
    ///
    /// Short Weierstrass curves only. The engine's verdict maps to `Ok(())`
    /// or [`Error::InvalidKey`]; an engine fault is reported as
    /// [`Error::UnsupportedFeature`].
    pub fn verify_public_key(&self, group: &CurveGroup, point: &AffinePoint) -> Result<()> {
        self.verify_public_key_with(&mut Scratch::new(), group, point)
    }

    /// Compute `m · point`.
    ///
    /// On Montgomery curves only `point.x` is used and the result's `y` is
    /// zero.
    pub fn scalar_multiply(
        &self,
        group: &CurveGroup,
        m: &BigUint,
        point: &AffinePoint,
    ) -> Result<AffinePoint> {
        self.scalar_multiply_with(&mut Scratch::new(), group, m, point)
    }

    /// Compute `m · p + n · q` without releasing the accelerator in between.
    ///
    /// Short Weierstrass curves only.
    pub fn double_scalar_multiply_add(
        &self,
        group: &CurveGroup,
        m: &BigUint,
        p: &AffinePoint,
        n: &BigUint,
        q: &AffinePoint,
    ) -> Result<AffinePoint> {
        self.double_scalar_multiply_add_with(&mut Scratch::new(), group, m, p, n, q)
    }

    fn verify_public_key_with(
        &self,
        scratch: &mut Scratch,
        group: &CurveGroup,
        point: &AffinePoint,
    ) -> Result<()> {
        let x = point.x.as_ref().ok_or(Error::InvalidInput)?;
        let curve = self.resolve(group)?;
        curve.require(Capability::Verify)?;
        let y = point.y.as_ref().ok_or(Error::InvalidInput)?;

        scratch.wipe_after(curve.word_len(), |ops| {
            encode_le(x, ops.x1)?;
            encode_le(y, ops.y1)?;

            self.accelerator
                .lock(|engine| curve.verify(engine, ops.x1, ops.y1))
        })
    }

    fn scalar_multiply_with(
        &self,
        scratch: &mut Scratch,
        group: &CurveGroup,
        m: &BigUint,
        point: &AffinePoint,
    ) -> Result<AffinePoint> {
        let x = point.x.as_ref().ok_or(Error::InvalidInput)?;
        let curve = self.resolve(group)?;
        curve.require(Capability::Multiply)?;
        let y = y_coordinate(&curve, point)?;

        scratch.wipe_after(curve.word_len(), |ops| {
            encode_le(m, ops.k1)?;
            encode_le(x, ops.x1)?;
            if let Some(y) = y {
                encode_le(y, ops.y1)?;
            }

            self.accelerator.lock(|engine| -> Result<AffinePoint> {
                curve.multiply(engine, ops.k1, ops.x1, ops.y1)?;
                Ok(curve.output(ops.x1, ops.y1))
            })
        })
    }

    fn double_scalar_multiply_add_with(
        &self,
        scratch: &mut Scratch,
        group: &CurveGroup,
        m: &BigUint,
        p: &AffinePoint,
        n: &BigUint,
        q: &AffinePoint,
    ) -> Result<AffinePoint> {
        let px = p.x.as_ref().ok_or(Error::InvalidInput)?;
        let qx = q.x.as_ref().ok_or(Error::InvalidInput)?;
        let curve = self.resolve(group)?;
        curve.require(Capability::Multiply)?;
        curve.require(Capability::Add)?;
        let py = p.y.as_ref().ok_or(Error::InvalidInput)?;
        let qy = q.y.as_ref().ok_or(Error::InvalidInput)?;

        scratch.wipe_after(curve.word_len(), |ops| {
            encode_le(m, ops.k1)?;
            encode_le(px, ops.x1)?;
            encode_le(py, ops.y1)?;
            encode_le(n, ops.k2)?;
            encode_le(qx, ops.x2)?;
            encode_le(qy, ops.y2)?;

            self.accelerator.lock(|engine| -> Result<AffinePoint> {
                curve.multiply(engine, ops.k1, ops.x1, ops.y1)?;
                curve.multiply(engine, ops.k2, ops.x2, ops.y2)?;
                curve.add(engine, ops.x1, ops.y1, ops.x2, ops.y2)?;
                Ok(curve.output(ops.x1, ops.y1))
            })
        })
    }

    /// Width check, classification and registry lookup.
    fn resolve(&self, group: &CurveGroup) -> Result<Curve> {
        let word_len = group.word_len();
        if word_len > E::MAX_OPERAND_WORDS.min(MAX_OPERAND_WORDS) {
            debug!("{:?}: {} word operands exceed the engine", group.id(), word_len);
            return Err(Error::UnsupportedFeature);
        }

        let Some(curve) = Curve::resolve(self.registry, group) else {
            debug!("{:?} ({:?}) is not registered", group.id(), group.family());
            return Err(Error::UnsupportedFeature);
        };

        if curve.word_len() != word_len {
            debug!("{:?}: group and parameter widths differ", group.id());
            return Err(Error::UnsupportedFeature);
        }

        Ok(curve)
    }
}

/// The y-coordinate, if the curve uses one.
fn y_coordinate<'p>(curve: &Curve, point: &'p AffinePoint) -> Result<Option<&'p BigUint>> {
    if !curve.has_y() {
        return Ok(None);
    }
    point.y.as_ref().map(Some).ok_or(Error::InvalidInput)
}

/// Operand buffers for one operation.
///
/// Sized for the widest operand the crate supports; only the first
/// `word_len` words of each buffer are handed to the engine.
struct Scratch {
    k1: [Word; MAX_OPERAND_WORDS],
    k2: [Word; MAX_OPERAND_WORDS],
    x1: [Word; MAX_OPERAND_WORDS],
    y1: [Word; MAX_OPERAND_WORDS],
    x2: [Word; MAX_OPERAND_WORDS],
    y2: [Word; MAX_OPERAND_WORDS],
}

/// Views of [`Scratch`] truncated to the operand length.
struct Operands<'s> {
    k1: &'s mut [Word],
    k2: &'s mut [Word],
    x1: &'s mut [Word],
    y1: &'s mut [Word],
    x2: &'s mut [Word],
    y2: &'s mut [Word],
}

impl Scratch {
    const fn new() -> Self {
        Self {
            k1: [0; MAX_OPERAND_WORDS],
            k2: [0; MAX_OPERAND_WORDS],
            x1: [0; MAX_OPERAND_WORDS],
            y1: [0; MAX_OPERAND_WORDS],
            x2: [0; MAX_OPERAND_WORDS],
            y2: [0; MAX_OPERAND_WORDS],
        }
    }

    /// Run `f` on operands of `len` words, then wipe everything.
    fn wipe_after<R>(
        &mut self,
        len: usize,
        f: impl FnOnce(Operands<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = f(Operands {
            k1: &mut self.k1[..len],
            k2: &mut self.k2[..len],
            x1: &mut self.x1[..len],
            y1: &mut self.y1[..len],
            x2: &mut self.x2[..len],
            y2: &mut self.y2[..len],
        });
        self.zeroize();
        result
    }

    #[cfg(test)]
    fn is_zeroed(&self) -> bool {
        [&self.k1, &self.k2, &self.x1, &self.y1, &self.x2, &self.y2]
            .iter()
            .all(|buf| buf.iter().all(|&word| word == 0))
    }
}

impl Zeroize for Scratch {
    fn zeroize(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.x1.zeroize();
        self.y1.zeroize();
        self.x2.zeroize();
        self.y2.zeroize();
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Fault, GroupId, SoftEngine,
        params::{MontgomeryParams, WeierstrassParams},
    };

    /// Software engine that faults on its `fail_at`-th call.
    struct FaultyEngine {
        inner: SoftEngine,
        calls: usize,
        fail_at: usize,
        saw_scalar: bool,
    }

    impl FaultyEngine {
        fn new(fail_at: usize) -> Self {
            Self {
                inner: SoftEngine::new(),
                calls: 0,
                fail_at,
                saw_scalar: false,
            }
        }

        fn step(&mut self) -> core::result::Result<(), Fault> {
            self.calls += 1;
            if self.calls == self.fail_at {
                Err(Fault::Device(0xdead))
            } else {
                Ok(())
            }
        }
    }

    impl Engine for FaultyEngine {
        fn point_on_curve(
            &mut self,
            curve: &WeierstrassParams,
            x: &[Word],
            y: &[Word],
        ) -> core::result::Result<bool, Fault> {
            self.step()?;
            self.inner.point_on_curve(curve, x, y)
        }

        fn point_multiply(
            &mut self,
            curve: &WeierstrassParams,
            k: &[Word],
            x: &mut [Word],
            y: &mut [Word],
        ) -> core::result::Result<(), Fault> {
            self.saw_scalar |= k.iter().any(|&word| word != 0);
            self.step()?;
            self.inner.point_multiply(curve, k, x, y)
        }

        fn x_only_multiply(
            &mut self,
            curve: &MontgomeryParams,
            k: &[Word],
            x: &mut [Word],
        ) -> core::result::Result<(), Fault> {
            self.saw_scalar |= k.iter().any(|&word| word != 0);
            self.step()?;
            self.inner.x_only_multiply(curve, k, x)
        }

        fn point_add(
            &mut self,
            curve: &WeierstrassParams,
            x1: &mut [Word],
            y1: &mut [Word],
            x2: &[Word],
            y2: &[Word],
        ) -> core::result::Result<(), Fault> {
            self.step()?;
            self.inner.point_add(curve, x1, y1, x2, y2)
        }
    }

    /// Engine limited to 256-bit operands.
    struct NarrowEngine(SoftEngine);

    impl Engine for NarrowEngine {
        const MAX_OPERAND_WORDS: usize = 8;

        fn point_on_curve(
            &mut self,
            curve: &WeierstrassParams,
            x: &[Word],
            y: &[Word],
        ) -> core::result::Result<bool, Fault> {
            self.0.point_on_curve(curve, x, y)
        }

        fn point_multiply(
            &mut self,
            curve: &WeierstrassParams,
            k: &[Word],
            x: &mut [Word],
            y: &mut [Word],
        ) -> core::result::Result<(), Fault> {
            self.0.point_multiply(curve, k, x, y)
        }

        fn x_only_multiply(
            &mut self,
            curve: &MontgomeryParams,
            k: &[Word],
            x: &mut [Word],
        ) -> core::result::Result<(), Fault> {
            self.0.x_only_multiply(curve, k, x)
        }

        fn point_add(
            &mut self,
            curve: &WeierstrassParams,
            x1: &mut [Word],
            y1: &mut [Word],
            x2: &[Word],
            y2: &[Word],
        ) -> core::result::Result<(), Fault> {
            self.0.point_add(curve, x1, y1, x2, y2)
        }
    }

    fn p256() -> CurveGroup {
        CurveGroup::load(GroupId::Secp256r1)
    }

    #[test]
    fn every_failing_step_aborts_double_scalar() {
        let registry = Registry::builtin();
        let group = p256();
        let g = group.generator().clone();
        let (m, n) = (BigUint::from(2u32), BigUint::from(3u32));

        for fail_at in 1..=3 {
            let accelerator = Accelerator::new(FaultyEngine::new(fail_at));
            let dispatcher = Dispatcher::new(&registry, &accelerator);
            let mut scratch = Scratch::new();

            let result =
                dispatcher.double_scalar_multiply_add_with(&mut scratch, &group, &m, &g, &n, &g);

            assert_eq!(result, Err(Error::HardwareAccelFailed));
            assert!(scratch.is_zeroed());

            let engine = accelerator.into_inner();
            assert_eq!(engine.calls, fail_at);
            assert!(engine.saw_scalar);
        }
    }

    #[test]
    fn failing_multiply_wipes_scratch() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(FaultyEngine::new(1));
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        let group = CurveGroup::load(GroupId::Curve25519);
        let result = dispatcher.scalar_multiply_with(
            &mut scratch,
            &group,
            &BigUint::from(0x1234_5678u32),
            group.generator(),
        );

        assert_eq!(result, Err(Error::HardwareAccelFailed));
        assert!(scratch.is_zeroed());
        assert!(accelerator.into_inner().saw_scalar);
    }

    #[test]
    fn verify_fault_means_fallback() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(FaultyEngine::new(1));
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        let group = p256();
        let result = dispatcher.verify_public_key_with(&mut scratch, &group, group.generator());

        assert_eq!(result, Err(Error::UnsupportedFeature));
        assert!(scratch.is_zeroed());
    }

    #[test]
    fn oversized_scalar_is_rejected_before_the_engine() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(FaultyEngine::new(usize::MAX));
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        let group = CurveGroup::load(GroupId::Secp192r1);
        let scalar = BigUint::from(1u32) << 192usize;
        let result =
            dispatcher.scalar_multiply_with(&mut scratch, &group, &scalar, group.generator());

        assert_eq!(result, Err(Error::BufferTooSmall));
        assert!(scratch.is_zeroed());
        assert_eq!(accelerator.into_inner().calls, 0);
    }

    #[test]
    fn late_oversized_operand_wipes_earlier_ones() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(FaultyEngine::new(usize::MAX));
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        // `m`, `p` and `q` are encoded before `n` overflows.
        let group = p256();
        let g = group.generator().clone();
        let n = BigUint::from(1u32) << 256usize;
        let result = dispatcher.double_scalar_multiply_add_with(
            &mut scratch,
            &group,
            &BigUint::from(0xdead_beefu32),
            &g,
            &n,
            &g,
        );

        assert_eq!(result, Err(Error::BufferTooSmall));
        assert!(scratch.is_zeroed());
        assert_eq!(accelerator.into_inner().calls, 0);
    }

    #[test]
    fn invalid_key_wipes_scratch() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(FaultyEngine::new(usize::MAX));
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        let group = p256();
        let x = group.generator().x.clone().unwrap();
        let off_curve = AffinePoint::new(x.clone(), x);
        let result = dispatcher.verify_public_key_with(&mut scratch, &group, &off_curve);

        assert_eq!(result, Err(Error::InvalidKey));
        assert!(scratch.is_zeroed());
        assert_eq!(accelerator.into_inner().calls, 1);
    }

    #[test]
    fn success_also_wipes_scratch() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(SoftEngine::new());
        let dispatcher = Dispatcher::new(&registry, &accelerator);
        let mut scratch = Scratch::new();

        let group = p256();
        let g = group.generator();
        let result = dispatcher
            .scalar_multiply_with(&mut scratch, &group, &BigUint::from(1u32), g)
            .unwrap();

        assert_eq!(&result, g);
        assert!(scratch.is_zeroed());
    }

    #[test]
    fn engine_width_limit() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(NarrowEngine(SoftEngine::new()));
        let dispatcher = Dispatcher::new(&registry, &accelerator);

        let group = p256();
        assert!(dispatcher.verify_public_key(&group, group.generator()).is_ok());

        // Registered, but wider than the engine allows.
        let wide = CurveGroup::new(GroupId::Secp256r1, 288, group.generator().clone());
        assert_eq!(
            dispatcher.verify_public_key(&wide, group.generator()),
            Err(Error::UnsupportedFeature)
        );
    }

    #[test]
    fn mismatched_width_is_unsupported() {
        let registry = Registry::builtin();
        let accelerator = Accelerator::new(SoftEngine::new());
        let dispatcher = Dispatcher::new(&registry, &accelerator);

        let group = p256();
        let narrow = CurveGroup::new(GroupId::Secp256r1, 192, group.generator().clone());
        assert_eq!(
            dispatcher.scalar_multiply(&narrow, &BigUint::from(1u32), group.generator()),
            Err(Error::UnsupportedFeature)
        );
    }
}
