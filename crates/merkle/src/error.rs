//! Errors from proof generation.

use rain_core::Hash;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleError {
    #[error("Leaf not found in the tree: 0x{}", hex_prefix(.0))]
    LeafNotFound(Hash),

    #[error("Leaf index {index} out of range (tree has {leaf_count} leaves)")]
    IndexOutOfRange { index: usize, leaf_count: usize },
}

pub type Result<T> = std::result::Result<T, MerkleError>;

fn hex_prefix(hash: &Hash) -> String {
    rain_core::short_hex(hash)
}
