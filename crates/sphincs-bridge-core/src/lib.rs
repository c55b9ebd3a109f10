//! `sphincs-bridge-core`: SPHINCS+ key generation, encoding and signing
//! behind a host-agnostic boundary.
//!
//! This crate is the audit target: no JavaScript, no I/O, no global mutable
//! state. The WebAssembly shell (`sphincs-bridge-wasm`) only adapts host
//! values and flattens [`HostOperationResult`] for JavaScript.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod params;

pub mod sphincs;

pub mod engine;

pub mod codec;

pub mod transport;

pub mod binding;

pub mod settings;

pub use binding::{
    generate_sphincs_keypair, sign_message, ErrorPayload, HostOperationResult, KeyPairPayload,
    GENERATE_KEYPAIR_NAME, SIGN_MESSAGE_ARITY, SIGN_MESSAGE_NAME,
};
pub use codec::{
    deserialize_private_key, deserialize_public_key, deserialize_signature,
    public_key_fingerprint, serialize_private_key, serialize_public_key, serialize_signature,
    unwrap_private_key_pem, wrap_private_key_pem, PRIVATE_KEY_PEM_LABEL,
};
pub use engine::{
    generate_keypair, sign, sign_deterministic, verify, SphincsKeyPair, SphincsPrivateKey,
    SphincsPublicKey, SphincsSignature,
};
pub use error::BridgeError;
pub use memory::SecretBuffer;
pub use params::{HashFunction, HashingVariant, ParameterConfiguration, ParameterSet};
pub use settings::BridgeSettings;
pub use transport::{copy_to_host, copy_to_native, HostArgument, HostBuffer};
