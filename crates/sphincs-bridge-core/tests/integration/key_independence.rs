//! Independence of generated keypairs.

use std::collections::HashSet;

use sphincs_bridge_core::binding::generate_sphincs_keypair;
use sphincs_bridge_core::codec::unwrap_private_key_pem;

const TRIALS: usize = 32;

/// Repeated `GenerateSphincsKeyPair` calls never produce the same private
/// key or public key.
#[test]
fn generated_keys_are_unique() {
    let mut private_keys = HashSet::new();
    let mut public_keys = HashSet::new();

    for _ in 0..TRIALS {
        let payload = generate_sphincs_keypair::<Vec<u8>>()
            .into_result()
            .expect("keygen should succeed");
        let raw = unwrap_private_key_pem(payload.private_key.as_bytes()).unwrap();

        assert!(private_keys.insert(raw.to_vec()), "duplicate private key");
        assert!(public_keys.insert(payload.public_key), "duplicate public key");
    }
}
