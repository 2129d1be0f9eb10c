#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod codec;
pub mod curve;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod group;
pub mod guard;
pub mod params;
pub mod registry;
pub mod soft;

pub use num_bigint::BigUint;

pub use crate::{
    curve::{Capability, Curve},
    dispatch::Dispatcher,
    engine::{Engine, Fault, MAX_OPERAND_WORDS},
    error::{Error, Result},
    group::{AffinePoint, CurveGroup, Family, GroupId},
    guard::{Accelerator, DefaultMutex, EngineMutex},
    params::{MontgomeryParams, WeierstrassParams},
    registry::Registry,
    soft::SoftEngine,
};

/// Operand word exchanged with the engine.
///
/// Operands are arrays of words in little-endian order: word 0 carries the
/// least significant 32 bits.
pub type Word = u32;

/// Number of [`Word`]s needed for an operand of `bits` bits.
pub const fn word_len(bits: usize) -> usize {
    bits.div_ceil(Word::BITS as usize)
}
