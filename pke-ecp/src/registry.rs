//! Mapping from group identifiers to engine parameter records.

use crate::{
    GroupId,
    params::{self, MontgomeryParams, WeierstrassParams},
};
use alloc::vec::Vec;

/// Set of curves the engine is able to serve.
///
/// Short Weierstrass and Montgomery records live in separate tables, so an
/// identifier only ever resolves within its own family. Tables are small and
/// searched linearly.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    short_weierstrass: Vec<(GroupId, &'static WeierstrassParams)>,
    montgomery: Vec<(GroupId, &'static MontgomeryParams)>,
}

impl Registry {
    /// Empty registry: every operation falls back.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every curve in [`params`].
    pub fn builtin() -> Self {
        Self::new()
            .with_weierstrass(GroupId::Secp256r1, &params::SECP256R1)
            .with_weierstrass(GroupId::Secp256k1, &params::SECP256K1)
            .with_weierstrass(GroupId::BrainpoolP256r1, &params::BRAINPOOL_P256R1)
            .with_weierstrass(GroupId::Secp224r1, &params::SECP224R1)
            .with_weierstrass(GroupId::Secp224k1, &params::SECP224K1)
            .with_weierstrass(GroupId::Secp192r1, &params::SECP192R1)
            .with_weierstrass(GroupId::Secp192k1, &params::SECP192K1)
            .with_montgomery(GroupId::Curve25519, &params::CURVE25519)
    }

    /// Add (or replace) a short Weierstrass curve.
    pub fn with_weierstrass(mut self, id: GroupId, params: &'static WeierstrassParams) -> Self {
        match self.short_weierstrass.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => entry.1 = params,
            None => self.short_weierstrass.push((id, params)),
        }
        self
    }

    /// Add (or replace) a Montgomery curve.
    pub fn with_montgomery(mut self, id: GroupId, params: &'static MontgomeryParams) -> Self {
        match self.montgomery.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => entry.1 = params,
            None => self.montgomery.push((id, params)),
        }
        self
    }

    /// Look up a short Weierstrass curve.
    pub fn short_weierstrass(&self, id: GroupId) -> Option<&'static WeierstrassParams> {
        self.short_weierstrass
            .iter()
            .find(|(known, _)| *known == id)
            .map(|&(_, params)| params)
    }

    /// Look up a Montgomery curve.
    pub fn montgomery(&self, id: GroupId) -> Option<&'static MontgomeryParams> {
        self.montgomery
            .iter()
            .find(|(known, _)| *known == id)
            .map(|&(_, params)| params)
    }

    /// Identifiers served by this registry, Weierstrass curves first.
    pub fn supported(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.short_weierstrass
            .iter()
            .map(|(id, _)| *id)
            .chain(self.montgomery.iter().map(|(id, _)| *id))
    }

    /// Is `id` served in either family?
    pub fn contains(&self, id: GroupId) -> bool {
        self.supported().any(|known| known == id)
    }
}
