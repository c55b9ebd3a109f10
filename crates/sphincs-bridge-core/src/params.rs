//! Fixed SPHINCS+ parameter configuration.
//!
//! The bridge runs with exactly one parameter set for its whole lifetime:
//! SPHINCS+-SHA256-256f-robust from the round 3 submission. Every key and
//! signature crossing the boundary is sized by this configuration.
//!
//! Neither the PEM envelope nor the raw key bytes record which set produced
//! them. Callers must pair a key with the configuration it was generated
//! under; [`crate::codec::deserialize_private_key`] rejects keys whose length
//! or internal consistency does not fit.

use serde::Serialize;

use crate::sphincs;

/// Underlying hash family of a parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HashFunction {
    /// SHA-256, with MGF1-SHA-256 for masks and the message digest.
    Sha256,
}

/// Tweakable hash construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HashingVariant {
    /// Unmasked tweakable hash. Described for completeness; the engine
    /// refuses configurations that ask for it.
    Simple,
    /// Inputs are XORed with an MGF1 bitmask derived from `PK.seed` and the
    /// node address before hashing.
    Robust,
}

/// Parameter sets the engine can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ParameterSet {
    /// SPHINCS+-SHA256-256f.
    Sha256_256f,
}

/// Immutable description of a parameter set and its wire sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterConfiguration {
    /// Which parameter set the engine dispatches to.
    pub set: ParameterSet,
    /// Human-readable name (`"SPHINCS+-SHA256-256f-robust"`).
    pub name: &'static str,
    /// Hash family.
    pub hash: HashFunction,
    /// Tweakable hash construction.
    pub variant: HashingVariant,
    /// Claimed classical security in bits.
    pub security_bits: u16,
    /// Security parameter `n` (hash output length in bytes).
    pub n: usize,
    /// Total hypertree height `h`.
    pub total_height: u8,
    /// Number of hypertree layers `d`.
    pub layers: u8,
    /// Serialized public key length in bytes.
    pub public_key_len: usize,
    /// Serialized private key length in bytes.
    pub private_key_len: usize,
    /// Serialized signature length in bytes.
    pub signature_len: usize,
}

/// SPHINCS+-SHA256-256f, robust variant.
pub static SHA256_256F_ROBUST: ParameterConfiguration = ParameterConfiguration {
    set: ParameterSet::Sha256_256f,
    name: "SPHINCS+-SHA256-256f-robust",
    hash: HashFunction::Sha256,
    variant: HashingVariant::Robust,
    security_bits: 256,
    n: sphincs::N,
    total_height: 68,
    layers: 17,
    public_key_len: sphincs::PUBLIC_KEY_BYTES,
    private_key_len: sphincs::SECRET_KEY_BYTES,
    signature_len: sphincs::SIGNATURE_BYTES,
};

/// The configuration every entry point uses.
#[must_use]
pub fn fixed() -> &'static ParameterConfiguration {
    &SHA256_256F_ROBUST
}
