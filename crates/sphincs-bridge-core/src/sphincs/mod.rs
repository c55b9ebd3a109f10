//! SPHINCS+-SHA256-256f-robust (round 3).
//!
//! Stateless hash-based signatures built from a hypertree of `LAYERS` WOTS+
//! Merkle trees topped over a FORS few-time signature. Every hash goes
//! through the robust tweakable hash in [`hash`], which masks its input with
//! an MGF1 stream keyed on `PK.seed` and the node address.
//!
//! Key layout:
//!
//! ```text
//! secret key (128) = SK.seed | SK.prf | PK.seed | PK.root
//! public key  (64) = PK.seed | PK.root
//! ```
//!
//! Signature layout: `R (32) | FORS (11200) | 17 x (WOTS+ (2144) | auth path (128))`.

// Index arithmetic is bounded by the parameter set: leaf indices stay below
// 2^FORS_HEIGHT * FORS_TREES and chain positions below WOTS_W.
#![allow(clippy::arithmetic_side_effects)]

pub mod address;
pub mod fors;
pub mod hash;
pub mod merkle;
pub mod wots;

use zeroize::Zeroizing;

use self::address::{Address, AddressType};
use self::hash::HashContext;
use crate::error::BridgeError;

/// Hash output length in bytes.
pub const N: usize = 32;
/// Total hypertree height.
pub const FULL_HEIGHT: usize = 68;
/// Hypertree layers.
pub const LAYERS: usize = 17;
const TOP_LAYER: u8 = 16;
/// Height of each hypertree layer.
pub const TREE_HEIGHT: u32 = 4;
/// Height of each FORS tree.
pub const FORS_HEIGHT: u32 = 9;
/// Number of FORS trees.
pub const FORS_TREES: usize = 35;
/// Winternitz parameter.
pub const WOTS_W: u32 = 16;
/// Message digits per WOTS+ signature.
pub const WOTS_LEN1: usize = 64;
/// Checksum digits per WOTS+ signature.
pub const WOTS_LEN2: usize = 3;
/// Chains per WOTS+ key.
pub const WOTS_LEN: usize = WOTS_LEN1 + WOTS_LEN2;
/// Bytes of one WOTS+ signature.
pub const WOTS_BYTES: usize = WOTS_LEN * N;
/// Bytes of the digest signed by FORS.
pub const FORS_MSG_BYTES: usize = (FORS_HEIGHT as usize * FORS_TREES).div_ceil(8);
/// Bytes of one FORS signature.
pub const FORS_BYTES: usize = (FORS_HEIGHT as usize + 1) * FORS_TREES * N;
/// Seed consumed by [`seed_keypair`]: `SK.seed | SK.prf | PK.seed`.
pub const SEED_BYTES: usize = 3 * N;
/// Public key length.
pub const PUBLIC_KEY_BYTES: usize = 2 * N;
/// Secret key length.
pub const SECRET_KEY_BYTES: usize = 4 * N;
/// Signature length.
pub const SIGNATURE_BYTES: usize = N + FORS_BYTES + LAYERS * (WOTS_BYTES + TREE_HEIGHT as usize * N);

const AUTH_PATH_BYTES: usize = TREE_HEIGHT as usize * N;
const LEAF_MASK: u64 = (1 << TREE_HEIGHT) - 1;

const _: () = assert!(TOP_LAYER as usize + 1 == LAYERS);
const _: () = assert!(LAYERS * TREE_HEIGHT as usize == FULL_HEIGHT);
const _: () = assert!(SIGNATURE_BYTES == 49_856);

/// Derives the secret key for `seed = SK.seed | SK.prf | PK.seed`.
#[must_use]
pub fn seed_keypair(seed: &[u8; SEED_BYTES]) -> Zeroizing<[u8; SECRET_KEY_BYTES]> {
    let root = root_from_seeds(&seed[..N], &seed[2 * N..]);

    let mut secret_key = Zeroizing::new([0u8; SECRET_KEY_BYTES]);
    secret_key[..SEED_BYTES].copy_from_slice(seed);
    secret_key[SEED_BYTES..].copy_from_slice(&root);
    secret_key
}

/// Root of the top hypertree layer, i.e. `PK.root`.
#[must_use]
pub fn root_from_seeds(sk_seed: &[u8], pk_seed: &[u8]) -> [u8; N] {
    let ctx = HashContext::new(pk_seed);
    let mut top = Address::new(AddressType::HashTree);
    top.set_layer(TOP_LAYER);

    let leaf_base = top;
    let (root, _) = merkle::treehash(&ctx, 0, 0, TREE_HEIGHT, &mut top, |idx| {
        wots::gen_leaf(&ctx, sk_seed, idx, &leaf_base)
    });
    root
}

/// Signs `message` with randomizer input `optrand`.
///
/// # Errors
///
/// Returns [`BridgeError::Signing`] if the message PRF cannot be keyed.
pub fn sign(
    message: &[u8],
    secret_key: &[u8; SECRET_KEY_BYTES],
    optrand: &[u8; N],
) -> Result<Vec<u8>, BridgeError> {
    let (sk_seed, rest) = secret_key.split_at(N);
    let (sk_prf, pk) = rest.split_at(N);
    let ctx = HashContext::new(&pk[..N]);

    let r = hash::prf_msg(sk_prf, optrand, message)?;
    let digest = hash::hash_message(&r, pk, message);

    let mut sig = Vec::with_capacity(SIGNATURE_BYTES);
    sig.extend_from_slice(&r);

    let mut fors_addr = Address::new(AddressType::WotsHash);
    fors_addr.set_tree(digest.tree);
    fors_addr.set_keypair(digest.leaf);
    let (fors_sig, mut root) = fors::sign(&ctx, sk_seed, &digest.fors, &fors_addr);
    sig.extend_from_slice(&fors_sig);

    let (mut tree, mut leaf) = (digest.tree, digest.leaf);
    for layer in (0u8..).take(LAYERS) {
        let mut tree_addr = Address::new(AddressType::HashTree);
        tree_addr.set_layer(layer);
        tree_addr.set_tree(tree);
        let mut wots_addr = tree_addr.subtree(AddressType::WotsHash);
        wots_addr.set_keypair(leaf);

        sig.extend_from_slice(&wots::sign(&ctx, sk_seed, &root, &wots_addr));

        let leaf_base = tree_addr;
        let (layer_root, auth_path) =
            merkle::treehash(&ctx, leaf, 0, TREE_HEIGHT, &mut tree_addr, |idx| {
                wots::gen_leaf(&ctx, sk_seed, idx, &leaf_base)
            });
        sig.extend_from_slice(&auth_path);

        root = layer_root;
        (tree, leaf) = parent_position(tree);
    }

    Ok(sig)
}

/// Checks `signature` over `message` against `public_key`.
///
/// Wrong-length inputs simply fail to verify.
#[must_use]
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    if signature.len() != SIGNATURE_BYTES || public_key.len() != PUBLIC_KEY_BYTES {
        return false;
    }
    let (pub_seed, pub_root) = public_key.split_at(N);
    let ctx = HashContext::new(pub_seed);

    let (r, rest) = signature.split_at(N);
    let (fors_sig, mut rest) = rest.split_at(FORS_BYTES);
    let digest = hash::hash_message(r, public_key, message);

    let mut fors_addr = Address::new(AddressType::WotsHash);
    fors_addr.set_tree(digest.tree);
    fors_addr.set_keypair(digest.leaf);
    let mut root = fors::pk_from_sig(&ctx, fors_sig, &digest.fors, &fors_addr);

    let (mut tree, mut leaf) = (digest.tree, digest.leaf);
    for layer in (0u8..).take(LAYERS) {
        let (wots_sig, tail) = rest.split_at(WOTS_BYTES);
        let (auth_path, tail) = tail.split_at(AUTH_PATH_BYTES);
        rest = tail;

        let mut tree_addr = Address::new(AddressType::HashTree);
        tree_addr.set_layer(layer);
        tree_addr.set_tree(tree);
        let mut wots_addr = tree_addr.subtree(AddressType::WotsHash);
        wots_addr.set_keypair(leaf);

        let wots_leaf = wots::pk_from_sig(&ctx, wots_sig, &root, &wots_addr);
        root = merkle::compute_root(&ctx, &wots_leaf, leaf, 0, auth_path, &mut tree_addr);
        (tree, leaf) = parent_position(tree);
    }

    root.as_slice() == pub_root
}

/// Tree and leaf index of the layer above a tree at index `tree`.
#[allow(clippy::cast_possible_truncation)] // masked to TREE_HEIGHT bits
const fn parent_position(tree: u64) -> (u64, u32) {
    (tree >> TREE_HEIGHT, (tree & LEAF_MASK) as u32)
}
