//! Flat byte encodings and the PEM envelope for SPHINCS+ material.
//!
//! This module provides:
//! - [`serialize_private_key`], [`serialize_public_key`], [`serialize_signature`]
//! - [`deserialize_private_key`], [`deserialize_public_key`], [`deserialize_signature`]
//! - [`wrap_private_key_pem`] / [`unwrap_private_key_pem`]: textual armor
//! - [`public_key_fingerprint`]: short identifier safe for logs
//!
//! # Envelope
//!
//! ```text
//! -----BEGIN SPHINCS+ PRIVATE KEY-----
//! <base64 of the raw private key, 64 columns, LF>
//! -----END SPHINCS+ PRIVATE KEY-----
//! ```
//!
//! The label is part of the file format: it is compared exactly
//! (case-sensitive) on decode and no alternate labels are accepted.
//!
//! # Configuration binding
//!
//! Raw encodings carry no parameter-set tag. Decoding trusts the caller to
//! supply the configuration the material was produced under; a length check
//! and, for private keys, a recomputation of the embedded public root turn a
//! mismatch into [`BridgeError::Deserialization`] instead of a silently
//! broken key.

use crate::engine::{self, SphincsPrivateKey, SphincsPublicKey, SphincsSignature};
use crate::error::BridgeError;
use crate::memory::SecretBuffer;
use crate::params::ParameterConfiguration;
use pem::{EncodeConfig, LineEnding, Pem};
use zeroize::Zeroizing;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// PEM type label of a wrapped private key.
pub const PRIVATE_KEY_PEM_LABEL: &str = "SPHINCS+ PRIVATE KEY";

/// Number of BLAKE3 digest bytes kept in a public key fingerprint.
const FINGERPRINT_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize a private key to its flat byte encoding.
///
/// # Errors
///
/// Returns [`BridgeError::Serialization`] if the key's bytes do not have the
/// length its configuration requires.
pub fn serialize_private_key(key: &SphincsPrivateKey) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
    let bytes = key.bytes.expose();
    expect_len("private key", bytes.len(), key.config.private_key_len)
        .map_err(BridgeError::Serialization)?;
    Ok(Zeroizing::new(bytes.to_vec()))
}

/// Serialize a public key to its flat byte encoding.
///
/// # Errors
///
/// Returns [`BridgeError::Serialization`] on a length mismatch.
pub fn serialize_public_key(key: &SphincsPublicKey) -> Result<Vec<u8>, BridgeError> {
    expect_len("public key", key.bytes.len(), key.config.public_key_len)
        .map_err(BridgeError::Serialization)?;
    Ok(key.bytes.clone())
}

/// Serialize a signature to its flat byte encoding.
///
/// # Errors
///
/// Returns [`BridgeError::Serialization`] on a length mismatch.
pub fn serialize_signature(signature: &SphincsSignature) -> Result<Vec<u8>, BridgeError> {
    expect_len("signature", signature.bytes.len(), signature.config.signature_len)
        .map_err(BridgeError::Serialization)?;
    Ok(signature.bytes.clone())
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Decode a private key produced under `config`.
///
/// # Errors
///
/// Returns [`BridgeError::Deserialization`] if the length is wrong or the
/// public root recomputed from the seeds differs from the embedded one
/// (truncated, corrupted, or generated under another configuration).
pub fn deserialize_private_key(
    config: &'static ParameterConfiguration,
    bytes: &[u8],
) -> Result<SphincsPrivateKey, BridgeError> {
    expect_len("private key", bytes.len(), config.private_key_len)
        .map_err(BridgeError::Deserialization)?;
    engine::check_private_key_consistency(config, bytes).map_err(BridgeError::Deserialization)?;
    Ok(SphincsPrivateKey::new(config, SecretBuffer::new(bytes)))
}

/// Decode a public key produced under `config`.
///
/// # Errors
///
/// Returns [`BridgeError::Deserialization`] on a length mismatch.
pub fn deserialize_public_key(
    config: &'static ParameterConfiguration,
    bytes: &[u8],
) -> Result<SphincsPublicKey, BridgeError> {
    expect_len("public key", bytes.len(), config.public_key_len)
        .map_err(BridgeError::Deserialization)?;
    Ok(SphincsPublicKey::new(config, bytes.to_vec()))
}

/// Decode a signature produced under `config`.
///
/// # Errors
///
/// Returns [`BridgeError::Deserialization`] on a length mismatch.
pub fn deserialize_signature(
    config: &'static ParameterConfiguration,
    bytes: &[u8],
) -> Result<SphincsSignature, BridgeError> {
    expect_len("signature", bytes.len(), config.signature_len)
        .map_err(BridgeError::Deserialization)?;
    Ok(SphincsSignature::new(config, bytes.to_vec()))
}

// ---------------------------------------------------------------------------
// PEM envelope
// ---------------------------------------------------------------------------

/// Frame raw private key bytes as `SPHINCS+ PRIVATE KEY` PEM text.
///
/// Total: every byte sequence, including the empty one, has an envelope.
#[must_use]
pub fn wrap_private_key_pem(bytes: &[u8]) -> Zeroizing<String> {
    // The intermediate `Pem` copy is not zeroized; `pem` offers no hook for it.
    let block = Pem::new(PRIVATE_KEY_PEM_LABEL, bytes.to_vec());
    let config = EncodeConfig::new().set_line_ending(LineEnding::LF);
    Zeroizing::new(pem::encode_config(&block, config))
}

/// Strip the PEM envelope and return the raw private key bytes.
///
/// Accepts text or raw UTF-8 bytes. Leading text before the `BEGIN` line is
/// skipped; only the first block is read.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidEnvelope`] if the input is not PEM or the
/// label is not exactly [`PRIVATE_KEY_PEM_LABEL`].
pub fn unwrap_private_key_pem(text: impl AsRef<[u8]>) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
    let block = pem::parse(text).map_err(|e| BridgeError::InvalidEnvelope(e.to_string()))?;
    if block.tag() != PRIVATE_KEY_PEM_LABEL {
        return Err(BridgeError::InvalidEnvelope(format!(
            "unexpected label {:?}",
            block.tag()
        )));
    }
    Ok(Zeroizing::new(block.into_contents()))
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Short lowercase-hex identifier of a public key (truncated BLAKE3).
///
/// This is the only key-derived value the bridge ever logs.
#[must_use]
pub fn public_key_fingerprint(key: &SphincsPublicKey) -> String {
    let digest = blake3::hash(key.as_bytes());
    data_encoding::HEXLOWER.encode(&digest.as_bytes()[..FINGERPRINT_LEN])
}

fn expect_len(what: &str, got: usize, expected: usize) -> Result<(), String> {
    if got == expected {
        Ok(())
    } else {
        Err(format!("{what} is {got} bytes (expected {expected})"))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
