//! Sorted-pair binary Merkle tree for dividend distributions.
//!
//! Leaf formula: see [`merkle_leaf`](crate::merkle_leaf).
//! Internal nodes: `keccak256(min || max)`.
//! If a level has an odd number of nodes, its last node is paired with
//! itself. There is no zero padding.

use rain_core::{Hash, LeafEntry, ZERO_HASH};
use tracing::debug;

use crate::error::{MerkleError, Result};
use crate::hash::{hash_sorted_pair, merkle_leaf};
use crate::proof::MerkleProof;

/// A binary Merkle tree, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All nodes stored level by level, bottom-up. `levels[0]` = sorted
    /// leaves, the last level holds the root. Never empty; an empty tree is
    /// `[[]]`.
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a Merkle tree from `(account, amount)` entries.
    ///
    /// Entries are hashed into leaves using `merkle_leaf()`, then the tree
    /// is built with `from_leaves()`.
    pub fn from_entries(entries: &[LeafEntry]) -> Self {
        let leaves: Vec<Hash> = entries
            .iter()
            .map(|entry| merkle_leaf(&entry.account, &entry.amount))
            .collect();
        Self::from_leaves(leaves)
    }

    /// Build a Merkle tree from pre-hashed leaves, in any order.
    ///
    /// Duplicate leaves are kept as distinct entries.
    pub fn from_leaves(mut leaves: Vec<Hash>) -> Self {
        leaves.sort_unstable();

        let mut levels = vec![leaves];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = parent_level(current);
            levels.push(next);
        }

        debug!(
            "Built Merkle tree: {} leaves, {} levels",
            levels[0].len(),
            levels.len()
        );
        Self { levels }
    }

    /// Get the Merkle root.
    ///
    /// `ZERO_HASH` for an empty tree; the leaf itself for a single leaf.
    pub fn root(&self) -> Hash {
        match self.levels.last() {
            Some(level) if level.len() == 1 => level[0],
            _ => ZERO_HASH,
        }
    }

    /// Sorted leaf level.
    pub fn leaves(&self) -> &[Hash] {
        &self.levels[0]
    }

    /// All levels, leaves first, root last.
    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    /// Number of leaves (duplicates included).
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Number of sibling hashes in every proof from this tree.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Index of the first leaf equal to `leaf` in the sorted leaf level.
    pub fn position(&self, leaf: &Hash) -> Option<usize> {
        self.levels[0].iter().position(|l| l == leaf)
    }

    /// Generate a proof for a leaf by value.
    ///
    /// If the same leaf value appears more than once, the proof is for the
    /// first sorted occurrence; use [`proof_at`](Self::proof_at) to pick a
    /// specific duplicate.
    pub fn proof(&self, leaf: &Hash) -> Result<MerkleProof> {
        let index = self
            .position(leaf)
            .ok_or(MerkleError::LeafNotFound(*leaf))?;
        self.proof_at(index)
    }

    /// Generate a proof for the leaf at `leaf_index` in the sorted leaf level.
    pub fn proof_at(&self, leaf_index: usize) -> Result<MerkleProof> {
        let leaf_count = self.leaf_count();
        if leaf_index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index: leaf_index,
                leaf_count,
            });
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = leaf_index;

        for level in &self.levels[..self.levels.len() - 1] {
            siblings.push(sibling(level, idx));
            idx /= 2;
        }

        Ok(MerkleProof {
            leaf_index,
            siblings,
        })
    }

    /// Verify a Merkle proof against a given root and leaf hash.
    pub fn verify(root: &Hash, leaf: &Hash, proof: &MerkleProof) -> bool {
        proof.verify(root, leaf)
    }
}

/// Hash one level into the next, pairing an odd last node with itself.
fn parent_level(level: &[Hash]) -> Vec<Hash> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for pair in level.chunks(2) {
        let left = &pair[0];
        let right = pair.get(1).unwrap_or(left);
        next.push(hash_sorted_pair(left, right));
    }
    next
}

/// Sibling of `index` in the level as it was hashed: the odd last node's
/// sibling is its own duplicate.
fn sibling(level: &[Hash], index: usize) -> Hash {
    let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
    level.get(sibling_index).copied().unwrap_or(level[index])
}
