//! Host binding layer: the two entry points the host calls.
//!
//! Both entry points are stateless, single-shot request/response calls.
//! Each returns a [`HostOperationResult`]: success carries the operation's
//! payload, failure carries an [`ErrorPayload`]. Nothing escapes as a
//! panic; the embedding shell flattens the result into the host's untagged
//! `{ error }` convention.
//!
//! Functions are generic over the host's buffer type so the full flow runs
//! natively against `Vec<u8>` as well as against JS typed arrays.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec;
use crate::engine;
use crate::error::BridgeError;
use crate::params;
use crate::transport::{self, HostArgument, HostBuffer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Global name of the key generation entry point.
pub const GENERATE_KEYPAIR_NAME: &str = "GenerateSphincsKeyPair";

/// Global name of the signing entry point.
pub const SIGN_MESSAGE_NAME: &str = "SignMessage";

/// `SignMessage(privateKeyPem, message)`.
pub const SIGN_MESSAGE_ARITY: usize = 2;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Failure shape handed to the host: `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable message. Never contains key material.
    pub error: String,
}

impl From<&BridgeError> for ErrorPayload {
    fn from(err: &BridgeError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Outcome of a host call.
///
/// Serializes untagged, which is exactly the shape hosts see: either the
/// success payload or `{ "error": ... }`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HostOperationResult<T> {
    /// The operation produced its payload.
    Success(T),
    /// The operation failed; the payload explains why.
    Failure(ErrorPayload),
}

impl<T> HostOperationResult<T> {
    /// Returns `true` for [`HostOperationResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Error message, if this is a failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(payload) => Some(&payload.error),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`ErrorPayload`] of a failure.
    pub fn into_result(self) -> Result<T, ErrorPayload> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(payload) => Err(payload),
        }
    }
}

/// Success payload of `GenerateSphincsKeyPair`.
///
/// `Debug` is manually implemented to mask the private key.
pub struct KeyPairPayload<B> {
    /// PEM-framed private key (`SPHINCS+ PRIVATE KEY`).
    pub private_key: Zeroizing<String>,
    /// Raw public key bytes in the host's buffer type.
    pub public_key: B,
}

impl<B: fmt::Debug> fmt::Debug for KeyPairPayload<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairPayload")
            .field("private_key", &"***")
            .field("public_key", &self.public_key)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// `GenerateSphincsKeyPair()`.
///
/// Generates a keypair under the fixed configuration and returns the PEM
/// private key with the raw public key bytes. Nothing is persisted.
pub fn generate_sphincs_keypair<B: HostBuffer>() -> HostOperationResult<KeyPairPayload<B>> {
    contain(GENERATE_KEYPAIR_NAME, || {
        let config = params::fixed();
        let keypair = engine::generate_keypair(config)?;

        let private_bytes = codec::serialize_private_key(&keypair.private)?;
        let private_key = codec::wrap_private_key_pem(&private_bytes);
        let public_bytes = codec::serialize_public_key(&keypair.public)?;

        tracing::info!(
            key_id = %codec::public_key_fingerprint(&keypair.public),
            parameter_set = config.name,
            "keypair generated"
        );

        Ok(KeyPairPayload {
            private_key,
            public_key: transport::copy_to_host(&public_bytes),
        })
    })
}

/// `SignMessage(privateKeyPem, message)`.
///
/// Returns the bare signature bytes on success (not wrapped in an object).
/// Argument count is checked before any argument is read, so a wrong
/// arity never touches key material.
pub fn sign_message<A: HostArgument, B: HostBuffer>(args: &[A]) -> HostOperationResult<B> {
    contain(SIGN_MESSAGE_NAME, || {
        let [private_key_arg, message_arg] = args else {
            return Err(BridgeError::ArgumentCount {
                expected: SIGN_MESSAGE_ARITY,
                got: args.len(),
            });
        };

        let pem_bytes = private_key_arg.read_bytes(0)?;
        let message = message_arg.read_bytes(1)?;

        let private_bytes = codec::unwrap_private_key_pem(pem_bytes.as_slice())?;
        let config = params::fixed();
        let private_key = codec::deserialize_private_key(config, &private_bytes)?;

        let signature = engine::sign(config, &message, &private_key)?;
        let signature_bytes = codec::serialize_signature(&signature)?;

        tracing::debug!(
            message_len = message.len(),
            signature_len = signature_bytes.len(),
            "message signed for host"
        );

        Ok(transport::copy_to_host(&signature_bytes))
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `op`, turning errors and panics into a failure payload.
///
/// Unwinding is unavailable on `wasm32-unknown-unknown` (panics abort), so
/// there the guarantee rests on the operations returning `Result`.
fn contain<T>(
    operation: &'static str,
    op: impl FnOnce() -> Result<T, BridgeError>,
) -> HostOperationResult<T> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(op))
        .unwrap_or_else(|_| Err(BridgeError::Internal(format!("{operation} panicked"))));

    match outcome {
        Ok(value) => HostOperationResult::Success(value),
        Err(err) => {
            if let BridgeError::InvalidEnvelope(reason) = &err {
                tracing::debug!(operation, %reason, "envelope rejected");
            }
            tracing::warn!(operation, kind = err.kind(), error = %err, "host call failed");
            HostOperationResult::Failure(ErrorPayload::from(&err))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_message_rejects_zero_arguments() {
        let result: HostOperationResult<Vec<u8>> = sign_message::<Vec<u8>, _>(&[]);
        assert_eq!(result.error(), Some("expected 2 arguments"));
    }

    #[test]
    fn sign_message_rejects_one_argument() {
        let result: HostOperationResult<Vec<u8>> = sign_message(&[b"x".to_vec()]);
        assert_eq!(result.error(), Some("expected 2 arguments"));
    }

    #[test]
    fn sign_message_rejects_three_arguments() {
        let args = vec![Vec::new(), Vec::new(), Vec::new()];
        let result: HostOperationResult<Vec<u8>> = sign_message(&args);
        assert_eq!(result.error(), Some("expected 2 arguments"));
    }

    #[test]
    fn sign_message_rejects_non_pem_key() {
        let args = vec![b"not a pem".to_vec(), b"hello".to_vec()];
        let result: HostOperationResult<Vec<u8>> = sign_message(&args);
        assert_eq!(result.error(), Some("invalid private key PEM"));
    }

    #[test]
    fn sign_message_rejects_mislabeled_key() {
        let pem = "-----BEGIN WRONG LABEL-----\nAQID\n-----END WRONG LABEL-----\n";
        let args = vec![pem.as_bytes().to_vec(), b"hello".to_vec()];
        let result: HostOperationResult<Vec<u8>> = sign_message(&args);
        assert_eq!(result.error(), Some("invalid private key PEM"));
    }

    #[test]
    fn sign_message_reports_wrong_length_key_as_deserialization() {
        let pem = codec::wrap_private_key_pem(&[0u8; 16]);
        let args = vec![pem.as_bytes().to_vec(), b"hello".to_vec()];
        let result: HostOperationResult<Vec<u8>> = sign_message(&args);

        let message = result.error().expect("must fail");
        assert!(message.starts_with("deserialization failed"), "{message}");
    }

    #[test]
    fn argument_type_errors_surface_position() {
        struct NotBytes;
        impl HostArgument for NotBytes {
            fn read_bytes(&self, position: usize) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
                Err(BridgeError::ArgumentType { position })
            }
        }

        let result: HostOperationResult<Vec<u8>> = sign_message(&[NotBytes, NotBytes]);
        assert_eq!(result.error(), Some("argument 0 is not a byte array"));
    }

    #[test]
    fn panics_are_contained() {
        let result: HostOperationResult<()> = contain("Exploding", || panic!("boom"));
        assert_eq!(result.error(), Some("internal error: Exploding panicked"));
    }

    #[test]
    fn keypair_payload_debug_masks_private_key() {
        let payload = KeyPairPayload {
            private_key: Zeroizing::new("-----BEGIN SPHINCS+ PRIVATE KEY-----".to_string()),
            public_key: vec![1u8, 2],
        };
        let debug = format!("{payload:?}");
        assert!(debug.contains("***"));
        assert!(!debug.contains("BEGIN"));
    }

    #[test]
    fn error_payload_shape() {
        let result: HostOperationResult<Vec<u8>> = sign_message::<Vec<u8>, _>(&[]);
        insta::assert_json_snapshot!(result, @r#"
        {
          "error": "expected 2 arguments"
        }
        "#);
    }

    #[test]
    fn into_result_roundtrip() {
        let ok: HostOperationResult<u8> = HostOperationResult::Success(7);
        assert!(ok.is_success());
        assert_eq!(ok.into_result(), Ok(7));

        let err: HostOperationResult<u8> = HostOperationResult::Failure(ErrorPayload {
            error: "nope".into(),
        });
        assert!(!err.is_success());
        assert_eq!(
            err.into_result(),
            Err(ErrorPayload {
                error: "nope".into()
            })
        );
    }
}
