//! SHA-256 instantiation of the SPHINCS+ hash functions (robust variant).
//!
//! - `T_l(PK.seed, ADRS, M) = SHA-256(BlockPad(PK.seed) || ADRSc || M ^ MGF1(PK.seed || ADRSc))`
//! - `PRF(SEED, ADRS) = SHA-256(SEED || ADRSc)`
//! - `PRF_msg(SK.prf, OptRand, M) = HMAC-SHA-256(SK.prf, OptRand || M)`
//! - `H_msg(R, PK, M) = MGF1-SHA-256(R || PK.seed || SHA-256(R || PK || M))`

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::address::{Address, ADDRESS_BYTES};
use super::{FORS_MSG_BYTES, FULL_HEIGHT, N, TREE_HEIGHT};
use crate::error::BridgeError;

const SHA256_BLOCK_BYTES: usize = 64;

const TREE_BITS: usize = FULL_HEIGHT - TREE_HEIGHT as usize;
const TREE_BYTES: usize = TREE_BITS.div_ceil(8);
const LEAF_BITS: usize = TREE_HEIGHT as usize;
const LEAF_BYTES: usize = LEAF_BITS.div_ceil(8);
const DIGEST_BYTES: usize = FORS_MSG_BYTES + TREE_BYTES + LEAF_BYTES;

// The tree index fills a whole u64 for this parameter set.
const _: () = assert!(TREE_BITS == 64);
const LEAF_MASK: u32 = (1u32 << LEAF_BITS) - 1;

/// `PK.seed`-keyed hashing shared by every node of one key.
pub struct HashContext {
    pub_seed: [u8; N],
    /// SHA-256 state after absorbing the block-padded `PK.seed`.
    seeded: Sha256,
}

impl HashContext {
    /// `pub_seed` must be `N` bytes.
    pub fn new(pub_seed: &[u8]) -> Self {
        let mut seed = [0u8; N];
        seed.copy_from_slice(pub_seed);

        let mut seeded = Sha256::new();
        seeded.update(seed);
        seeded.update([0u8; SHA256_BLOCK_BYTES - N]);

        Self {
            pub_seed: seed,
            seeded,
        }
    }

    /// Tweakable hash over `input` (any multiple of `N` bytes).
    pub fn thash(&self, input: &[u8], addr: &Address) -> [u8; N] {
        let adrs = addr.to_bytes();

        let mut mask_seed = [0u8; N + ADDRESS_BYTES];
        mask_seed[..N].copy_from_slice(&self.pub_seed);
        mask_seed[N..].copy_from_slice(&adrs);

        let mut masked = Zeroizing::new(mgf1(&mask_seed, input.len()));
        masked.iter_mut().zip(input).for_each(|(m, x)| *m ^= x);

        let mut hasher = self.seeded.clone();
        hasher.update(adrs);
        hasher.update(masked.as_slice());
        hasher.finalize().into()
    }

    /// Tweakable hash of two child nodes.
    pub fn thash_pair(&self, left: &[u8], right: &[u8], addr: &Address) -> [u8; N] {
        let mut pair = [0u8; 2 * N];
        pair[..N].copy_from_slice(left);
        pair[N..].copy_from_slice(right);
        self.thash(&pair, addr)
    }
}

/// Secret element for the addressed WOTS+ chain or FORS leaf.
pub fn prf_addr(sk_seed: &[u8], addr: &Address) -> Zeroizing<[u8; N]> {
    Zeroizing::new(
        Sha256::new()
            .chain_update(sk_seed)
            .chain_update(addr.to_bytes())
            .finalize()
            .into(),
    )
}

/// Message randomizer `R`.
///
/// # Errors
///
/// Returns [`BridgeError::Signing`] if HMAC rejects the key.
pub fn prf_msg(sk_prf: &[u8], optrand: &[u8], message: &[u8]) -> Result<[u8; N], BridgeError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(sk_prf)
        .map_err(|e| BridgeError::Signing(format!("message PRF: {e}")))?;
    mac.update(optrand);
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

/// Output of `H_msg`: the FORS message and the hypertree leaf to sign with.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageDigest {
    pub fors: [u8; FORS_MSG_BYTES],
    pub tree: u64,
    pub leaf: u32,
}

/// `H_msg` for the public key `pk = PK.seed || PK.root`.
pub fn hash_message(r: &[u8], pk: &[u8], message: &[u8]) -> MessageDigest {
    let inner = Sha256::new()
        .chain_update(r)
        .chain_update(pk)
        .chain_update(message)
        .finalize();

    let mut seed = Vec::with_capacity(2 * N + inner.len());
    seed.extend_from_slice(r);
    seed.extend_from_slice(&pk[..N]);
    seed.extend_from_slice(&inner);

    let buf = mgf1(&seed, DIGEST_BYTES);
    let (fors_bytes, rest) = buf.split_at(FORS_MSG_BYTES);
    let (tree_bytes, leaf_bytes) = rest.split_at(TREE_BYTES);

    let mut fors = [0u8; FORS_MSG_BYTES];
    fors.copy_from_slice(fors_bytes);
    let tree = tree_bytes
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let leaf = leaf_bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));

    MessageDigest {
        fors,
        tree,
        leaf: leaf & LEAF_MASK,
    }
}

/// MGF1 with SHA-256.
pub fn mgf1(seed: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(out_len.next_multiple_of(32));
    let mut counter: u32 = 0;
    while out.len() < out_len {
        let block = Sha256::new()
            .chain_update(seed)
            .chain_update(counter.to_be_bytes())
            .finalize();
        out.extend_from_slice(&block);
        counter = counter.wrapping_add(1);
    }
    out.truncate(out_len);
    out
}
