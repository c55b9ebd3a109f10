//! SPHINCS+ signature engine facade.
//!
//! This module provides:
//! - [`generate_keypair`]: fresh keypair from OS randomness
//! - [`sign`]: randomized signature over an arbitrary message
//! - [`sign_deterministic`]: the same construction with `PK.seed` as the
//!   randomizer input
//! - [`verify`]: library-level verification (never exposed to the host)
//!
//! The hash-tree construction lives in [`crate::sphincs`]; this layer checks
//! configurations, moves bytes in and out of it and maps its failures onto
//! [`BridgeError`].

use crate::error::BridgeError;
use crate::memory::SecretBuffer;
use crate::params::{HashingVariant, ParameterConfiguration, ParameterSet};
use crate::sphincs;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Offset of the embedded `PK.seed || PK.root` inside a private key.
const EMBEDDED_PK_OFFSET: usize = sphincs::SECRET_KEY_BYTES - sphincs::PUBLIC_KEY_BYTES;

/// Offset of `PK.root` inside a private key.
const EMBEDDED_ROOT_OFFSET: usize = EMBEDDED_PK_OFFSET + sphincs::N;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// SPHINCS+ private key bytes bound to the configuration they belong to.
///
/// Stored in a [`SecretBuffer`] (zeroized on drop). Intentionally does not
/// implement `Serialize` or `Clone`; the only way out is
/// [`crate::codec::serialize_private_key`].
pub struct SphincsPrivateKey {
    pub(crate) config: &'static ParameterConfiguration,
    pub(crate) bytes: SecretBuffer,
}

impl SphincsPrivateKey {
    pub(crate) const fn new(config: &'static ParameterConfiguration, bytes: SecretBuffer) -> Self {
        Self { config, bytes }
    }

    /// Configuration the key was generated or decoded under.
    #[must_use]
    pub const fn config(&self) -> &'static ParameterConfiguration {
        self.config
    }
}

impl fmt::Debug for SphincsPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SphincsPrivateKey(***)")
    }
}

/// SPHINCS+ public key. Safe to share.
#[must_use = "public key must be returned to the caller"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SphincsPublicKey {
    pub(crate) config: &'static ParameterConfiguration,
    pub(crate) bytes: Vec<u8>,
}

impl SphincsPublicKey {
    pub(crate) const fn new(config: &'static ParameterConfiguration, bytes: Vec<u8>) -> Self {
        Self { config, bytes }
    }

    /// Raw public key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Detached SPHINCS+ signature.
#[must_use = "signature must be returned to the caller"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SphincsSignature {
    pub(crate) config: &'static ParameterConfiguration,
    pub(crate) bytes: Vec<u8>,
}

impl SphincsSignature {
    pub(crate) const fn new(config: &'static ParameterConfiguration, bytes: Vec<u8>) -> Self {
        Self { config, bytes }
    }

    /// Raw signature bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Keypair produced by [`generate_keypair`].
pub struct SphincsKeyPair {
    /// Private half (zeroized on drop).
    pub private: SphincsPrivateKey,
    /// Public half.
    pub public: SphincsPublicKey,
}

impl fmt::Debug for SphincsKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SphincsKeyPair")
            .field("private", &self.private)
            .field("public", &self.public)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Generate a SPHINCS+ keypair under `config`.
///
/// Each call draws a fresh 96-byte seed from the OS CSPRNG, so two calls
/// yield independent keypairs.
///
/// # Errors
///
/// Returns [`BridgeError::KeyGeneration`] if the configuration is not
/// supported or the randomness source is unavailable.
pub fn generate_keypair(
    config: &'static ParameterConfiguration,
) -> Result<SphincsKeyPair, BridgeError> {
    ensure_supported(config).map_err(BridgeError::KeyGeneration)?;

    match config.set {
        ParameterSet::Sha256_256f => {
            let mut seed = Zeroizing::new([0u8; sphincs::SEED_BYTES]);
            OsRng
                .try_fill_bytes(seed.as_mut_slice())
                .map_err(|e| BridgeError::KeyGeneration(e.to_string()))?;

            let sk = sphincs::seed_keypair(&seed);
            let private = SphincsPrivateKey::new(config, SecretBuffer::new(sk.as_slice()));
            let public = SphincsPublicKey::new(config, sk[EMBEDDED_PK_OFFSET..].to_vec());
            Ok(SphincsKeyPair { private, public })
        }
    }
}

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Sign `message` with `private_key`.
///
/// Any message is accepted, including the empty one. The randomizer input
/// comes from the OS CSPRNG: repeated calls over the same message produce
/// different, equally valid signatures. The key is only borrowed.
///
/// # Errors
///
/// Returns [`BridgeError::Signing`] if the key belongs to another
/// configuration, has the wrong length, or no randomness is available.
pub fn sign(
    config: &'static ParameterConfiguration,
    message: &[u8],
    private_key: &SphincsPrivateKey,
) -> Result<SphincsSignature, BridgeError> {
    let mut optrand = [0u8; sphincs::N];
    OsRng
        .try_fill_bytes(&mut optrand)
        .map_err(|e| BridgeError::Signing(e.to_string()))?;
    sign_with_randomizer(config, message, private_key, &optrand)
}

/// Sign `message` without fresh randomness.
///
/// `PK.seed` stands in for the randomizer input, so the same key and
/// message always give the same signature.
///
/// # Errors
///
/// Same as [`sign`], minus the randomness failure.
pub fn sign_deterministic(
    config: &'static ParameterConfiguration,
    message: &[u8],
    private_key: &SphincsPrivateKey,
) -> Result<SphincsSignature, BridgeError> {
    let pk_seed: [u8; sphincs::N] = private_key
        .bytes
        .expose()
        .get(EMBEDDED_PK_OFFSET..EMBEDDED_ROOT_OFFSET)
        .and_then(|seed| seed.try_into().ok())
        .ok_or_else(|| {
            BridgeError::Signing(format!(
                "private key is {} bytes (expected {})",
                private_key.bytes.len(),
                config.private_key_len
            ))
        })?;
    sign_with_randomizer(config, message, private_key, &pk_seed)
}

fn sign_with_randomizer(
    config: &'static ParameterConfiguration,
    message: &[u8],
    private_key: &SphincsPrivateKey,
    optrand: &[u8; sphincs::N],
) -> Result<SphincsSignature, BridgeError> {
    if private_key.config != config {
        return Err(BridgeError::Signing(format!(
            "private key belongs to {}, not {}",
            private_key.config.name, config.name
        )));
    }
    ensure_supported(config).map_err(BridgeError::Signing)?;

    match config.set {
        ParameterSet::Sha256_256f => {
            let sk = load_private_key(private_key.bytes.expose()).map_err(BridgeError::Signing)?;
            let sig = sphincs::sign(message, sk, optrand)?;
            tracing::debug!(
                parameter_set = config.name,
                message_len = message.len(),
                "message signed"
            );
            Ok(SphincsSignature::new(config, sig))
        }
    }
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

/// Verify `signature` over `message` against `public_key`.
///
/// # Errors
///
/// Returns [`BridgeError::Verification`] if any input has the wrong size
/// or the signature does not verify.
pub fn verify(
    config: &'static ParameterConfiguration,
    message: &[u8],
    signature: &SphincsSignature,
    public_key: &SphincsPublicKey,
) -> Result<(), BridgeError> {
    ensure_supported(config).map_err(BridgeError::Verification)?;

    if public_key.bytes.len() != config.public_key_len {
        return Err(BridgeError::Verification(format!(
            "public key is {} bytes (expected {})",
            public_key.bytes.len(),
            config.public_key_len
        )));
    }
    if signature.bytes.len() != config.signature_len {
        return Err(BridgeError::Verification(format!(
            "signature is {} bytes (expected {})",
            signature.bytes.len(),
            config.signature_len
        )));
    }

    match config.set {
        ParameterSet::Sha256_256f => {
            if sphincs::verify(message, &signature.bytes, &public_key.bytes) {
                Ok(())
            } else {
                Err(BridgeError::Verification(
                    "signature does not match message and public key".to_string(),
                ))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

/// Check that private key bytes are coherent.
///
/// Recomputes `PK.root` from `SK.seed` and `PK.seed` over the top hypertree
/// layer only and compares it with the embedded root. A flipped bit in any
/// of those three fields diverges. `SK.prf` only feeds the randomizer and
/// cannot be checked this way.
pub(crate) fn check_private_key_consistency(
    config: &'static ParameterConfiguration,
    bytes: &[u8],
) -> Result<(), String> {
    ensure_supported(config)?;

    match config.set {
        ParameterSet::Sha256_256f => {
            let sk = load_private_key(bytes)?;
            let sk_seed = &sk[..sphincs::N];
            let pk_seed = &sk[EMBEDDED_PK_OFFSET..EMBEDDED_ROOT_OFFSET];
            let embedded_root = &sk[EMBEDDED_ROOT_OFFSET..];

            if sphincs::root_from_seeds(sk_seed, pk_seed).as_slice() == embedded_root {
                Ok(())
            } else {
                Err("private key does not match its embedded public key".to_string())
            }
        }
    }
}

fn ensure_supported(config: &ParameterConfiguration) -> Result<(), String> {
    match config.variant {
        HashingVariant::Robust => Ok(()),
        HashingVariant::Simple => Err(format!(
            "{}: simple tweakable hashing is not supported",
            config.name
        )),
    }
}

fn load_private_key(bytes: &[u8]) -> Result<&[u8; sphincs::SECRET_KEY_BYTES], String> {
    bytes.try_into().map_err(|_| {
        format!(
            "private key is {} bytes (expected {})",
            bytes.len(),
            sphincs::SECRET_KEY_BYTES
        )
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn generate_keypair_produces_configured_lengths() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");

        assert_eq!(kp.private.bytes.len(), config.private_key_len);
        assert_eq!(kp.public.as_bytes().len(), config.public_key_len);
        assert!(std::ptr::eq(kp.private.config(), config));
    }

    #[test]
    fn private_key_embeds_public_key() {
        let kp = generate_keypair(params::fixed()).expect("keygen should succeed");
        let sk = kp.private.bytes.expose();
        assert_eq!(&sk[EMBEDDED_PK_OFFSET..], kp.public.as_bytes());
    }

    #[test]
    fn sign_verify_roundtrip() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");
        let message = b"release manifest v2";

        let sig = sign(config, message, &kp.private).expect("signing should succeed");
        assert_eq!(sig.as_bytes().len(), config.signature_len);
        verify(config, message, &sig, &kp.public).expect("verification should succeed");
    }

    #[test]
    fn verify_with_tampered_message_fails() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");

        let sig = sign(config, b"original", &kp.private).expect("signing should succeed");
        let result = verify(config, b"tampered", &sig, &kp.public);
        assert!(matches!(result, Err(BridgeError::Verification(_))));
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");
        let short = SphincsSignature::new(config, vec![0u8; 10]);

        let result = verify(config, b"msg", &short, &kp.public);
        assert!(matches!(result, Err(BridgeError::Verification(_))));
    }

    #[test]
    fn consistency_check_accepts_fresh_key() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");
        check_private_key_consistency(config, kp.private.bytes.expose())
            .expect("fresh key should be consistent");
    }

    #[test]
    fn consistency_check_rejects_flipped_root() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");
        let mut bytes = kp.private.bytes.expose().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let result = check_private_key_consistency(config, &bytes);
        assert!(result.is_err());
    }

    #[test]
    fn consistency_check_rejects_flipped_seeds() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");

        for offset in [0, EMBEDDED_PK_OFFSET] {
            let mut bytes = kp.private.bytes.expose().to_vec();
            bytes[offset] ^= 0x80;
            assert!(
                check_private_key_consistency(config, &bytes).is_err(),
                "flip at {offset} went unnoticed"
            );
        }
    }

    #[test]
    fn consistency_check_cannot_see_prf_key() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");
        let mut bytes = kp.private.bytes.expose().to_vec();
        bytes[sphincs::N] ^= 0x01;

        assert!(check_private_key_consistency(config, &bytes).is_ok());
    }

    #[test]
    fn deterministic_signing_repeats_and_verifies() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");

        let first = sign_deterministic(config, b"msg", &kp.private).unwrap();
        let second = sign_deterministic(config, b"msg", &kp.private).unwrap();
        assert_eq!(first, second);
        verify(config, b"msg", &first, &kp.public).expect("verification should succeed");
    }

    #[test]
    fn randomized_signing_varies() {
        let config = params::fixed();
        let kp = generate_keypair(config).expect("keygen should succeed");

        let first = sign(config, b"msg", &kp.private).unwrap();
        let second = sign(config, b"msg", &kp.private).unwrap();
        assert_ne!(first.as_bytes(), second.as_bytes());
    }

    fn simple_config() -> &'static ParameterConfiguration {
        Box::leak(Box::new(ParameterConfiguration {
            name: "SPHINCS+-SHA256-256f-simple",
            variant: HashingVariant::Simple,
            ..*params::fixed()
        }))
    }

    #[test]
    fn simple_variant_is_refused() {
        let simple = simple_config();
        assert!(matches!(
            generate_keypair(simple),
            Err(BridgeError::KeyGeneration(_))
        ));

        let kp = generate_keypair(params::fixed()).expect("keygen should succeed");
        let bytes = kp.private.bytes.expose();
        let err = check_private_key_consistency(simple, bytes).unwrap_err();
        assert!(err.contains("simple"));

        let key = SphincsPrivateKey::new(simple, SecretBuffer::new(bytes));
        assert!(matches!(
            sign(simple, b"msg", &key),
            Err(BridgeError::Signing(_))
        ));
    }

    #[test]
    fn sign_rejects_wrong_length_key() {
        let config = params::fixed();
        let bogus = SphincsPrivateKey::new(config, SecretBuffer::new(&[0u8; 12]));

        let result = sign(config, b"msg", &bogus);
        assert!(matches!(result, Err(BridgeError::Signing(_))));
    }

    #[test]
    fn private_key_debug_is_masked() {
        let kp = generate_keypair(params::fixed()).expect("keygen should succeed");
        let debug = format!("{kp:?}");

        assert!(debug.contains("SphincsPrivateKey(***)"));
        assert!(!debug.contains("SecretBuffer"));
    }
}
