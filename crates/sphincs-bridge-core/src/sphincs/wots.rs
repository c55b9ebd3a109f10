//! WOTS+ one-time signatures (w = 16) over `N`-byte messages.

use zeroize::Zeroizing;

use super::address::{Address, AddressType};
use super::hash::{prf_addr, HashContext};
use super::{N, WOTS_BYTES, WOTS_LEN, WOTS_LEN1, WOTS_W};

/// Bits the 12-bit checksum is shifted by to fill two bytes.
const CHECKSUM_SHIFT: u32 = 4;

/// Base-16 digits of `msg` followed by the three checksum digits.
pub fn chain_lengths(msg: &[u8]) -> [u32; WOTS_LEN] {
    let mut lengths = [0u32; WOTS_LEN];
    let (message_digits, checksum_digits) = lengths.split_at_mut(WOTS_LEN1);
    base_w(msg, message_digits);

    let checksum: u32 = message_digits.iter().map(|&d| WOTS_W - 1 - d).sum();
    let shifted = (checksum << CHECKSUM_SHIFT).to_be_bytes();
    base_w(&shifted[2..], checksum_digits);
    lengths
}

/// High nibble first.
fn base_w(input: &[u8], out: &mut [u32]) {
    for (i, digit) in out.iter_mut().enumerate() {
        let byte = input[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        *digit = u32::from(nibble);
    }
}

/// Applies `steps` chain iterations starting at position `start`.
pub fn gen_chain(
    ctx: &HashContext,
    input: &[u8],
    start: u32,
    steps: u32,
    addr: &mut Address,
) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(input);
    for i in start..(start + steps).min(WOTS_W) {
        addr.set_hash(i);
        out = ctx.thash(&out, addr);
    }
    out
}

fn chain_secret(sk_seed: &[u8], addr: &mut Address) -> Zeroizing<[u8; N]> {
    addr.set_hash(0);
    prf_addr(sk_seed, addr)
}

/// Compressed WOTS+ public key of key pair `addr_idx` in the tree at `tree_addr`.
pub fn gen_leaf(ctx: &HashContext, sk_seed: &[u8], addr_idx: u32, tree_addr: &Address) -> [u8; N] {
    let mut addr = tree_addr.subtree(AddressType::WotsHash);
    addr.set_keypair(addr_idx);

    let mut pk = Vec::with_capacity(WOTS_BYTES);
    for chain in (0u32..).take(WOTS_LEN) {
        addr.set_chain(chain);
        let sk = chain_secret(sk_seed, &mut addr);
        pk.extend_from_slice(&gen_chain(ctx, &sk[..], 0, WOTS_W - 1, &mut addr));
    }
    ctx.thash(&pk, &addr.keypair(AddressType::WotsPk))
}

/// Signs the `N`-byte `msg` with the key pair addressed by `addr`.
pub fn sign(ctx: &HashContext, sk_seed: &[u8], msg: &[u8], addr: &Address) -> Vec<u8> {
    let lengths = chain_lengths(msg);
    let mut addr = *addr;

    let mut sig = Vec::with_capacity(WOTS_BYTES);
    for (&len, chain) in lengths.iter().zip(0u32..) {
        addr.set_chain(chain);
        let sk = chain_secret(sk_seed, &mut addr);
        sig.extend_from_slice(&gen_chain(ctx, &sk[..], 0, len, &mut addr));
    }
    sig
}

/// Completes every chain of `sig` and returns the compressed public key.
pub fn pk_from_sig(ctx: &HashContext, sig: &[u8], msg: &[u8], addr: &Address) -> [u8; N] {
    let lengths = chain_lengths(msg);
    let mut addr = *addr;

    let mut pk = Vec::with_capacity(WOTS_BYTES);
    for ((element, &len), chain) in sig.chunks_exact(N).zip(&lengths).zip(0u32..) {
        addr.set_chain(chain);
        pk.extend_from_slice(&gen_chain(ctx, element, len, WOTS_W - 1 - len, &mut addr));
    }
    ctx.thash(&pk, &addr.keypair(AddressType::WotsPk))
}
