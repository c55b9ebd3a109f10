//! Integration tests for `GenerateSphincsKeyPair` → `SignMessage`.

use sphincs_bridge_core::binding::{generate_sphincs_keypair, sign_message, HostOperationResult};
use sphincs_bridge_core::codec::{
    deserialize_public_key, deserialize_signature, unwrap_private_key_pem, wrap_private_key_pem,
};
use sphincs_bridge_core::{engine, params};

fn keypair() -> (String, Vec<u8>) {
    let payload = generate_sphincs_keypair::<Vec<u8>>()
        .into_result()
        .expect("keygen should succeed");
    (payload.private_key.to_string(), payload.public_key)
}

/// KeyGenerate → SignMessage("hello world") yields a bare signature of the
/// configured length that verifies against the returned public key.
#[test]
fn hello_world_end_to_end() {
    let config = params::fixed();
    let (private_pem, public_key) = keypair();
    assert_eq!(public_key.len(), config.public_key_len);

    let message = b"hello world".to_vec();
    let args = vec![private_pem.into_bytes(), message.clone()];
    let result: HostOperationResult<Vec<u8>> = sign_message(&args);

    let signature = result.into_result().expect("signing should succeed");
    assert_eq!(signature.len(), config.signature_len);

    let pk = deserialize_public_key(config, &public_key).unwrap();
    let sig = deserialize_signature(config, &signature).unwrap();
    engine::verify(config, &message, &sig, &pk).expect("signature should verify");
}

/// Signature length depends only on the configuration.
#[test]
fn empty_message_signature_has_fixed_length() {
    let config = params::fixed();
    let (private_pem, _) = keypair();

    let empty: HostOperationResult<Vec<u8>> =
        sign_message(&[private_pem.clone().into_bytes(), Vec::new()]);
    let non_empty: HostOperationResult<Vec<u8>> =
        sign_message(&[private_pem.into_bytes(), vec![0xAB; 4096]]);

    let empty = empty.into_result().expect("empty message should sign");
    let non_empty = non_empty.into_result().expect("non-empty message should sign");
    assert_eq!(empty.len(), config.signature_len);
    assert_eq!(non_empty.len(), empty.len());
}

/// A single flipped byte in the wrapped key body is reported as a
/// deserialization failure, never a panic.
#[test]
fn corrupted_private_key_reports_deserialization_failure() {
    let (private_pem, _) = keypair();
    let mut raw = unwrap_private_key_pem(&private_pem).unwrap();
    raw[5] ^= 0x40;
    let corrupted = wrap_private_key_pem(&raw);

    let result: HostOperationResult<Vec<u8>> =
        sign_message(&[corrupted.as_bytes().to_vec(), b"any message".to_vec()]);

    let message = result.error().expect("corrupted key must fail");
    assert!(message.contains("deserialization"), "unexpected error: {message}");
}

/// Arity errors never reach key handling, even with a valid key present.
#[test]
fn wrong_arity_with_valid_key_still_fails_fast() {
    let (private_pem, _) = keypair();
    let args = vec![
        private_pem.into_bytes(),
        b"hello world".to_vec(),
        b"extra".to_vec(),
    ];
    let result: HostOperationResult<Vec<u8>> = sign_message(&args);
    assert_eq!(result.error(), Some("expected 2 arguments"));
}

/// Error messages never echo the private key.
#[test]
fn error_messages_do_not_leak_key_material() {
    let (private_pem, _) = keypair();
    let raw = unwrap_private_key_pem(&private_pem).unwrap();
    let truncated = wrap_private_key_pem(&raw[..raw.len() - 1]);

    let result: HostOperationResult<Vec<u8>> =
        sign_message(&[truncated.as_bytes().to_vec(), b"m".to_vec()]);
    let message = result.error().expect("truncated key must fail");

    let body_line = private_pem.lines().nth(1).unwrap();
    assert!(!message.contains(body_line));
    assert!(!message.contains("SPHINCS+ PRIVATE KEY"));
}
