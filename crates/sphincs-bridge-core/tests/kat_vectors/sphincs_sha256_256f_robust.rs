//! SPHINCS+-SHA256-256f-robust (round 3) Known-Answer Tests.
//!
//! Keys are the round 3 128-byte layout `SK.seed | SK.prf | PK.seed | PK.root`
//! with the seed `00 01 02 .. 5f`. Signatures are pinned by their SHA-256
//! and their last 32 bytes (the top-layer authentication path).

use sha2::{Digest, Sha256};
use sphincs_bridge_core::binding::{sign_message, HostOperationResult};
use sphincs_bridge_core::codec::{
    deserialize_private_key, deserialize_public_key, deserialize_signature, wrap_private_key_pem,
};
use sphincs_bridge_core::{engine, params, sphincs};

const EXPECTED_PK: &str = "404142434445464748494a4b4c4d4e4f505152535455565758595a5b5c5d5e5f\
                           55309ac51bfa16b45ab7a4ccc75eb96eeac27162bac4ad8ea237cba5c65ca592";

fn seed() -> [u8; sphincs::SEED_BYTES] {
    let mut seed = [0u8; sphincs::SEED_BYTES];
    seed.iter_mut().zip(0u8..).for_each(|(b, i)| *b = i);
    seed
}

fn optrand() -> [u8; sphincs::N] {
    let mut optrand = [0u8; sphincs::N];
    optrand.iter_mut().zip(0xa0u8..).for_each(|(b, i)| *b = i);
    optrand
}

fn secret_key() -> [u8; sphincs::SECRET_KEY_BYTES] {
    let mut sk = [0u8; sphincs::SECRET_KEY_BYTES];
    sk.copy_from_slice(sphincs::seed_keypair(&seed()).as_slice());
    sk
}

fn sha256_hex(bytes: &[u8]) -> String {
    data_encoding::HEXLOWER.encode(&Sha256::digest(bytes))
}

/// Seed → key pair derivation.
#[test]
fn seed_derives_reference_public_key() {
    let sk = secret_key();
    assert_eq!(&sk[..sphincs::SEED_BYTES], &seed()[..]);
    assert_eq!(
        &sk[sphincs::SEED_BYTES - sphincs::N..],
        hex_to_bytes(EXPECTED_PK).as_slice(),
        "derived public key must match the reference value"
    );
}

/// Fixed randomizer input, message "hello world".
#[test]
fn hello_world_signature_matches_reference() {
    let sig = sphincs::sign(b"hello world", &secret_key(), &optrand()).unwrap();
    assert_eq!(sig.len(), 49_856);

    assert_eq!(
        &sig[..sphincs::N],
        hex_to_bytes("c2054449ef8419e948929ebeab97ebeefcf7f95939945d4172913bbc0fdc4340").as_slice(),
        "randomizer R must match the reference value"
    );
    assert_eq!(
        &sig[sig.len() - sphincs::N..],
        hex_to_bytes("dbc393c52e793804cb2d71959d332daa8b5afb31bcc0cb48a5064f1769cad79e").as_slice()
    );
    assert_eq!(
        sha256_hex(&sig),
        "1d6352cc9e8f519bc38ec7aab3cccb9c7a54be6b17bb20f43f001566ab0e87da"
    );

    assert!(sphincs::verify(b"hello world", &sig, &hex_to_bytes(EXPECTED_PK)));
}

/// Fixed randomizer input, empty message.
#[test]
fn empty_message_signature_matches_reference() {
    let sig = sphincs::sign(b"", &secret_key(), &optrand()).unwrap();

    assert_eq!(
        &sig[..sphincs::N],
        hex_to_bytes("c7c33601a23b27e2fb0cb803a8d455014ec0325ede20f8afb8f73d69db91e0e5").as_slice()
    );
    assert_eq!(
        &sig[sig.len() - sphincs::N..],
        hex_to_bytes("9c61122242eb755a6bcfd98c71cfef8c65aa8fbd45f6a48a49e7391a60d86dc0").as_slice()
    );
    assert_eq!(
        sha256_hex(&sig),
        "8507aae26997abbda067b793887cb3dd114138fae78cef179d095c7a885a3cd5"
    );
}

/// Deterministic mode uses `PK.seed` as the randomizer input.
#[test]
fn deterministic_signature_matches_reference() {
    let config = params::fixed();
    let key = deserialize_private_key(config, &secret_key()).unwrap();
    let sig = engine::sign_deterministic(config, b"hello world", &key).unwrap();

    assert_eq!(
        &sig.as_bytes()[..sphincs::N],
        hex_to_bytes("b0e9c506a90a77698a7fe6f7e456d2b57ebe95337a80a300293f30e8723fb361").as_slice()
    );
    assert_eq!(
        sha256_hex(sig.as_bytes()),
        "84c1904551ca511fbbebc63e40feb03d54595182a93de1d2f861be9530f9ae34"
    );
}

/// A key produced outside this crate, wrapped in the PEM envelope, signs
/// through the host entry point and verifies under the reference public key.
#[test]
fn reference_key_signs_through_host_entry_point() {
    let config = params::fixed();
    let pem = wrap_private_key_pem(&secret_key());

    let result: HostOperationResult<Vec<u8>> =
        sign_message(&[pem.as_bytes().to_vec(), b"hello world".to_vec()]);
    let signature = result.into_result().expect("reference key should sign");

    let pk = deserialize_public_key(config, &hex_to_bytes(EXPECTED_PK)).unwrap();
    let sig = deserialize_signature(config, &signature).unwrap();
    engine::verify(config, b"hello world", &sig, &pk).expect("signature must verify");
}

/// Flipping one signature byte breaks verification.
#[test]
fn tampered_reference_signature_is_rejected() {
    let mut sig = sphincs::sign(b"hello world", &secret_key(), &optrand()).unwrap();
    sig[100] ^= 0x01;
    assert!(!sphincs::verify(b"hello world", &sig, &hex_to_bytes(EXPECTED_PK)));
}

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("valid hex"))
        .collect()
}
