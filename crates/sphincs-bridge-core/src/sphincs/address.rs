//! Hash addresses (`ADRS`) and their 22-byte compressed form.
//!
//! Every tweakable hash call is domain-separated by the address of the node
//! it computes. The SHA-256 instantiation hashes the compressed encoding:
//!
//! ```text
//! layer (1) | tree (8, BE) | type (1) | key pair (4, BE) | word 1 (4, BE) | word 2 (4, BE)
//! ```
//!
//! Word 1 is the chain address (WOTS+) or tree height (Merkle/FORS); word 2
//! is the hash address (WOTS+) or tree index (Merkle/FORS).

/// Length of the compressed address.
pub const ADDRESS_BYTES: usize = 22;

/// What the addressed hash call computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressType {
    /// One step of a WOTS+ chain (also the WOTS+ secret PRF).
    WotsHash = 0,
    /// Compression of a WOTS+ public key into a Merkle leaf.
    WotsPk = 1,
    /// Inner node of a hypertree Merkle tree.
    HashTree = 2,
    /// FORS leaf, inner node, or secret PRF.
    ForsTree = 3,
    /// Compression of the FORS roots into the FORS public key.
    ForsRoots = 4,
}

/// A structured hash address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Address {
    layer: u8,
    tree: u64,
    kind: AddressType,
    keypair: u32,
    word1: u32,
    word2: u32,
}

impl Address {
    /// Zeroed address of the given type.
    #[must_use]
    pub const fn new(kind: AddressType) -> Self {
        Self {
            layer: 0,
            tree: 0,
            kind,
            keypair: 0,
            word1: 0,
            word2: 0,
        }
    }

    /// Fresh address of `kind` in the same layer and tree as `self`.
    #[must_use]
    pub const fn subtree(&self, kind: AddressType) -> Self {
        Self {
            layer: self.layer,
            tree: self.tree,
            ..Self::new(kind)
        }
    }

    /// Fresh address of `kind` for the same key pair as `self`.
    #[must_use]
    pub const fn keypair(&self, kind: AddressType) -> Self {
        Self {
            keypair: self.keypair,
            ..self.subtree(kind)
        }
    }

    pub fn set_layer(&mut self, layer: u8) {
        self.layer = layer;
    }

    pub fn set_tree(&mut self, tree: u64) {
        self.tree = tree;
    }

    pub fn set_keypair(&mut self, keypair: u32) {
        self.keypair = keypair;
    }

    pub fn set_chain(&mut self, chain: u32) {
        self.word1 = chain;
    }

    pub fn set_hash(&mut self, hash: u32) {
        self.word2 = hash;
    }

    pub fn set_tree_height(&mut self, height: u32) {
        self.word1 = height;
    }

    pub fn set_tree_index(&mut self, index: u32) {
        self.word2 = index;
    }

    /// Compressed encoding hashed by the SHA-256 instantiation.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ADDRESS_BYTES] {
        let mut out = [0u8; ADDRESS_BYTES];
        out[0] = self.layer;
        out[1..9].copy_from_slice(&self.tree.to_be_bytes());
        out[9] = self.kind as u8;
        out[10..14].copy_from_slice(&self.keypair.to_be_bytes());
        out[14..18].copy_from_slice(&self.word1.to_be_bytes());
        out[18..22].copy_from_slice(&self.word2.to_be_bytes());
        out
    }
}
