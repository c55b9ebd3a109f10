//! Error types for `sphincs-bridge-core`.

use thiserror::Error;

/// Errors produced while generating, encoding, or using SPHINCS+ keys.
///
/// Messages are safe to hand to the host: no variant ever carries private
/// key bytes.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host called an entry point with the wrong number of arguments.
    #[error("expected {expected} arguments")]
    ArgumentCount {
        /// Arity the entry point requires.
        expected: usize,
        /// Arity the host supplied.
        got: usize,
    },

    /// A host argument is not a byte array, array buffer, array, or string.
    #[error("argument {position} is not a byte array")]
    ArgumentType {
        /// Zero-based argument index.
        position: usize,
    },

    /// PEM text is malformed or carries the wrong type label.
    ///
    /// The reason is kept for debug logging only; the host always sees
    /// the fixed message.
    #[error("invalid private key PEM")]
    InvalidEnvelope(String),

    /// Key or signature bytes do not decode under the parameter configuration.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A key or signature value is not in a serializable state.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The signature primitive could not produce a keypair.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The signature primitive reported a fault while signing.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A signature does not verify against the given public key.
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// An operation panicked and the panic was contained at the boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Taxonomy name used in structured log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ArgumentCount { .. } => "ArgumentCountError",
            Self::ArgumentType { .. } => "ArgumentTypeError",
            Self::InvalidEnvelope(_) => "InvalidEnvelopeError",
            Self::Deserialization(_) => "DeserializationError",
            Self::Serialization(_) => "SerializationError",
            Self::KeyGeneration(_) => "KeyGenerationError",
            Self::Signing(_) => "SigningError",
            Self::Verification(_) => "VerificationError",
            Self::Internal(_) => "InternalError",
        }
    }
}
