//! Inclusion proofs and their verification.

use rain_core::Hash;

use crate::hash::hash_sorted_pair;

/// A Merkle proof consisting of sibling hashes along the path to the root.
///
/// Because every parent hashes its children smaller-first, the verifier does
/// not need left/right flags; the siblings alone determine the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    /// Position of the proven leaf in the sorted leaf level.
    pub leaf_index: usize,
    /// Sibling hashes from leaf level to root (bottom-up).
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    /// Replay the proof from `leaf`, returning the root it commits to.
    pub fn compute_root(&self, leaf: &Hash) -> Hash {
        process_proof(leaf, &self.siblings)
    }

    /// Check this proof for `leaf` against `root`.
    pub fn verify(&self, root: &Hash, leaf: &Hash) -> bool {
        verify(root, leaf, &self.siblings)
    }

    /// Number of hashing steps.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

/// Fold the sibling path into a root, smaller-first at every step.
pub fn process_proof(leaf: &Hash, siblings: &[Hash]) -> Hash {
    siblings
        .iter()
        .fold(*leaf, |current, sibling| hash_sorted_pair(&current, sibling))
}

/// Verify that `leaf` is committed under `root` by `siblings`.
///
/// Same algorithm as OpenZeppelin's `MerkleProof.verify`. A `false` result
/// is an ordinary outcome (tampered amount, wrong cycle, stale proof) and is
/// left to the caller to act on.
pub fn verify(root: &Hash, leaf: &Hash, siblings: &[Hash]) -> bool {
    process_proof(leaf, siblings) == *root
}
