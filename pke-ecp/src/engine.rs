//! Contract between the dispatcher and a public key engine.
//!
//! Operands are little-endian [`Word`] slices, all of the curve's
//! [`word_len`](crate::word_len). Results are written back in place.

use crate::{
    Word,
    params::{MontgomeryParams, WeierstrassParams},
};
use core::fmt::{self, Display};

/// Widest operand the engine accepts, in words (512 bits).
pub const MAX_OPERAND_WORDS: usize = 16;

/// Fault reported by an engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Fault {
    /// An input point is not on the curve.
    NotOnCurve,

    /// The result is the point at infinity, which has no affine form.
    PointAtInfinity,

    /// An operand is not reduced modulo `p`.
    OperandOutOfRange,

    /// Operand slices do not match the curve's word length.
    OperandWidth,

    /// Device specific status code.
    Device(u32),
}

impl Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::NotOnCurve => f.write_str("point not on curve"),
            Fault::PointAtInfinity => f.write_str("point at infinity"),
            Fault::OperandOutOfRange => f.write_str("operand out of range"),
            Fault::OperandWidth => f.write_str("operand width mismatch"),
            Fault::Device(code) => write!(f, "device status {code:#x}"),
        }
    }
}

/// Fixed-function elliptic curve engine.
///
/// Implementations are driven through an [`Accelerator`](crate::Accelerator),
/// which guarantees exclusive access for the duration of each dispatched
/// operation.
pub trait Engine {
    /// Widest operand this engine accepts, in words.
    const MAX_OPERAND_WORDS: usize = MAX_OPERAND_WORDS;

    /// Is `(x, y)` on the curve?
    fn point_on_curve(
        &mut self,
        curve: &WeierstrassParams,
        x: &[Word],
        y: &[Word],
    ) -> Result<bool, Fault>;

    /// `(x, y) = k · (x, y)`
    fn point_multiply(
        &mut self,
        curve: &WeierstrassParams,
        k: &[Word],
        x: &mut [Word],
        y: &mut [Word],
    ) -> Result<(), Fault>;

    /// `x = x(k · P)` where `x(P) = x`, by Montgomery ladder.
    fn x_only_multiply(
        &mut self,
        curve: &MontgomeryParams,
        k: &[Word],
        x: &mut [Word],
    ) -> Result<(), Fault>;

    /// `(x1, y1) = (x1, y1) + (x2, y2)`
    fn point_add(
        &mut self,
        curve: &WeierstrassParams,
        x1: &mut [Word],
        y1: &mut [Word],
        x2: &[Word],
        y2: &[Word],
    ) -> Result<(), Fault>;
}
