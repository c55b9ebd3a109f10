//! Integration tests for engine + codec without the host layer.

use sphincs_bridge_core::codec::{
    deserialize_private_key, serialize_private_key, serialize_public_key, serialize_signature,
};
use sphincs_bridge_core::engine::{generate_keypair, sign, verify};
use sphincs_bridge_core::{params, BridgeError};

/// A private key that went through serialize → deserialize still produces
/// signatures that verify against the original public key.
#[test]
fn deserialized_private_key_signs_verifiably() {
    let config = params::fixed();
    let kp = generate_keypair(config).expect("keygen should succeed");

    let raw = serialize_private_key(&kp.private).expect("serialize should succeed");
    let restored = deserialize_private_key(config, &raw).expect("deserialize should succeed");

    let message = b"restored key message";
    let sig = sign(config, message, &restored).expect("signing should succeed");
    verify(config, message, &sig, &kp.public).expect("verification should succeed");
}

/// Signing borrows the key and leaves its encoding untouched.
#[test]
fn signing_does_not_mutate_private_key() {
    let config = params::fixed();
    let kp = generate_keypair(config).expect("keygen should succeed");
    let before = serialize_private_key(&kp.private).expect("serialize should succeed");

    let _sig = sign(config, b"", &kp.private).expect("signing should succeed");

    let after = serialize_private_key(&kp.private).expect("serialize should succeed");
    assert_eq!(before.as_slice(), after.as_slice());
}

/// Cross-key rejection: sign with key A, verify with key B.
#[test]
fn cross_keypair_verification_fails() {
    let config = params::fixed();
    let kp_a = generate_keypair(config).expect("keygen A should succeed");
    let kp_b = generate_keypair(config).expect("keygen B should succeed");

    let sig = sign(config, b"signed with A", &kp_a.private).expect("signing should succeed");
    let result = verify(config, b"signed with A", &sig, &kp_b.public);
    assert!(matches!(result, Err(BridgeError::Verification(_))));
}

/// Serialized lengths match the fixed configuration.
#[test]
fn serialized_lengths_match_configuration() {
    let config = params::fixed();
    let kp = generate_keypair(config).expect("keygen should succeed");
    let sig = sign(config, b"len", &kp.private).expect("signing should succeed");

    assert_eq!(
        serialize_private_key(&kp.private).unwrap().len(),
        config.private_key_len
    );
    assert_eq!(
        serialize_public_key(&kp.public).unwrap().len(),
        config.public_key_len
    );
    assert_eq!(serialize_signature(&sig).unwrap().len(), config.signature_len);
}
