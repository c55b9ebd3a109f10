//! Binary hash trees shared by the hypertree layers and the FORS trees.
//!
//! A node at height `z` and in-tree position `j` is addressed with tree index
//! `j + (idx_offset >> z)`, so FORS trees laid side by side get distinct
//! global indices.

use super::address::Address;
use super::hash::HashContext;
use super::N;

/// Builds the tree of height `height` whose leaves come from `gen_leaf`
/// (called with the global leaf index) and returns its root and the
/// authentication path of `leaf_idx`.
pub fn treehash(
    ctx: &HashContext,
    leaf_idx: u32,
    idx_offset: u32,
    height: u32,
    tree_addr: &mut Address,
    mut gen_leaf: impl FnMut(u32) -> [u8; N],
) -> ([u8; N], Vec<u8>) {
    let mut level: Vec<[u8; N]> = (0..1u32 << height)
        .map(|idx| gen_leaf(idx + idx_offset))
        .collect();

    let mut auth_path = Vec::with_capacity(height as usize * N);
    for z in 0..height {
        let sibling = (leaf_idx >> z) ^ 1;
        auth_path.extend_from_slice(&level[sibling as usize]);

        tree_addr.set_tree_height(z + 1);
        level = level
            .chunks_exact(2)
            .zip(0u32..)
            .map(|(pair, j)| {
                tree_addr.set_tree_index(j + (idx_offset >> (z + 1)));
                ctx.thash_pair(&pair[0], &pair[1], tree_addr)
            })
            .collect();
    }

    (level[0], auth_path)
}

/// Climbs from `leaf` along `auth_path` to the root.
pub fn compute_root(
    ctx: &HashContext,
    leaf: &[u8; N],
    mut leaf_idx: u32,
    mut idx_offset: u32,
    auth_path: &[u8],
    tree_addr: &mut Address,
) -> [u8; N] {
    let mut node = *leaf;
    for (sibling, height) in auth_path.chunks_exact(N).zip(1u32..) {
        let (left, right) = if leaf_idx & 1 == 1 {
            (sibling, &node[..])
        } else {
            (&node[..], sibling)
        };
        leaf_idx >>= 1;
        idx_offset >>= 1;
        tree_addr.set_tree_height(height);
        tree_addr.set_tree_index(leaf_idx + idx_offset);
        node = ctx.thash_pair(left, right, tree_addr);
    }
    node
}
