//! Error type

use core::fmt::{self, Display};

/// Result type with the `pke-ecp` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Outcome of a dispatched point operation that did not succeed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A required argument (e.g. a point coordinate) is missing.
    InvalidInput,

    /// The curve is not recognised, its operands are wider than the engine
    /// accepts, or the operation is not offered for its curve family.
    ///
    /// Callers are expected to fall back to a software implementation.
    UnsupportedFeature,

    /// The engine found that the point does not lie on the curve.
    InvalidKey,

    /// The engine reported a fault during a multiplication or addition.
    HardwareAccelFailed,

    /// A value does not fit into a fixed-width operand buffer.
    BufferTooSmall,
}

impl Error {
    /// Is this the "not handled here, try software" outcome?
    pub fn is_fallback(self) -> bool {
        self == Error::UnsupportedFeature
    }

    /// Equivalent mbedTLS error code, for C shims wrapping this crate.
    pub fn code(self) -> i32 {
        match self {
            Error::InvalidInput => -0x4F80,
            Error::UnsupportedFeature => -0x0072,
            Error::InvalidKey => -0x4C80,
            Error::HardwareAccelFailed => -0x0070,
            Error::BufferTooSmall => -0x0008,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidInput => "invalid input",
            Error::UnsupportedFeature => "operation not supported by the engine",
            Error::InvalidKey => "point is not on the curve",
            Error::HardwareAccelFailed => "engine failure",
            Error::BufferTooSmall => "value too large for operand buffer",
        })
    }
}

impl core::error::Error for Error {}
