//! FORS few-time signatures over the 40-byte message digest.

use super::address::{Address, AddressType};
use super::hash::{prf_addr, HashContext};
use super::{merkle, FORS_BYTES, FORS_HEIGHT, FORS_TREES, N};

const FORS_TREE_SIG_BYTES: usize = (FORS_HEIGHT as usize + 1) * N;

/// Splits the digest into one `FORS_HEIGHT`-bit leaf index per tree,
/// least significant bit first.
pub fn message_to_indices(m: &[u8]) -> [u32; FORS_TREES] {
    let mut indices = [0u32; FORS_TREES];
    let mut offset = 0usize;
    for index in &mut indices {
        for bit in 0..FORS_HEIGHT {
            *index ^= u32::from((m[offset >> 3] >> (offset & 7)) & 1) << bit;
            offset += 1;
        }
    }
    indices
}

fn gen_leaf(ctx: &HashContext, sk_seed: &[u8], addr_idx: u32, fors_addr: &Address) -> [u8; N] {
    let mut leaf_addr = fors_addr.keypair(AddressType::ForsTree);
    leaf_addr.set_tree_index(addr_idx);
    let sk = prf_addr(sk_seed, &leaf_addr);
    ctx.thash(&sk[..], &leaf_addr)
}

/// Signs `m` and returns the signature with the FORS public key it commits to.
pub fn sign(ctx: &HashContext, sk_seed: &[u8], m: &[u8], fors_addr: &Address) -> (Vec<u8>, [u8; N]) {
    let mut tree_addr = fors_addr.keypair(AddressType::ForsTree);
    let roots_addr = fors_addr.keypair(AddressType::ForsRoots);

    let mut sig = Vec::with_capacity(FORS_BYTES);
    let mut roots = Vec::with_capacity(FORS_TREES * N);
    for (idx, tree) in message_to_indices(m).into_iter().zip(0u32..) {
        let idx_offset = tree << FORS_HEIGHT;

        tree_addr.set_tree_height(0);
        tree_addr.set_tree_index(idx + idx_offset);
        sig.extend_from_slice(&prf_addr(sk_seed, &tree_addr)[..]);

        let (root, auth_path) =
            merkle::treehash(ctx, idx, idx_offset, FORS_HEIGHT, &mut tree_addr, |addr_idx| {
                gen_leaf(ctx, sk_seed, addr_idx, fors_addr)
            });
        sig.extend_from_slice(&auth_path);
        roots.extend_from_slice(&root);
    }

    (sig, ctx.thash(&roots, &roots_addr))
}

/// Recomputes the FORS public key from a signature.
pub fn pk_from_sig(ctx: &HashContext, sig: &[u8], m: &[u8], fors_addr: &Address) -> [u8; N] {
    let mut tree_addr = fors_addr.keypair(AddressType::ForsTree);
    let roots_addr = fors_addr.keypair(AddressType::ForsRoots);

    let mut roots = Vec::with_capacity(FORS_TREES * N);
    let trees = sig.chunks_exact(FORS_TREE_SIG_BYTES);
    for ((tree_sig, idx), tree) in trees.zip(message_to_indices(m)).zip(0u32..) {
        let idx_offset = tree << FORS_HEIGHT;
        let (sk, auth_path) = tree_sig.split_at(N);

        tree_addr.set_tree_height(0);
        tree_addr.set_tree_index(idx + idx_offset);
        let leaf = ctx.thash(sk, &tree_addr);

        let root = merkle::compute_root(ctx, &leaf, idx, idx_offset, auth_path, &mut tree_addr);
        roots.extend_from_slice(&root);
    }

    ctx.thash(&roots, &roots_addr)
}
