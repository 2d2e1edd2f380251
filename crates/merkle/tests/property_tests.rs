//! Property-based tests for the sorted-pair Merkle tree.

use proptest::prelude::*;
use rain_merkle::{verify, MerkleTree};

fn leaf_set() -> impl Strategy<Value = Vec<[u8; 32]>> {
    prop::collection::vec(prop::array::uniform32(any::<u8>()), 1..40)
}

proptest! {
    /// Root does not depend on the order leaves are supplied in
    #[test]
    fn root_is_order_independent(
        (leaves, shuffled) in leaf_set().prop_flat_map(|v| {
            let shuffled = Just(v.clone()).prop_shuffle();
            (Just(v), shuffled)
        })
    ) {
        let a = MerkleTree::from_leaves(leaves);
        let b = MerkleTree::from_leaves(shuffled);
        prop_assert_eq!(a.root(), b.root());
    }

    /// Every leaf's proof replays to the root
    #[test]
    fn every_proof_verifies(leaves in leaf_set()) {
        let tree = MerkleTree::from_leaves(leaves.clone());
        let root = tree.root();
        for leaf in &leaves {
            let proof = tree.proof(leaf).unwrap();
            prop_assert!(verify(&root, leaf, &proof.siblings));
        }
    }

    /// Proof length is ceil(log2(n))
    #[test]
    fn proof_length_matches_depth(leaves in leaf_set()) {
        let tree = MerkleTree::from_leaves(leaves.clone());
        let expected = leaves.len().next_power_of_two().trailing_zeros() as usize;
        let proof = tree.proof(&leaves[0]).unwrap();
        prop_assert_eq!(proof.siblings.len(), expected);
    }

    /// Flipping one bit of one sibling breaks the proof
    #[test]
    fn bit_flip_breaks_proof(
        leaves in prop::collection::vec(prop::array::uniform32(any::<u8>()), 2..40),
        pick in any::<prop::sample::Index>(),
        bit in 0usize..256,
    ) {
        let tree = MerkleTree::from_leaves(leaves.clone());
        let leaf = leaves[pick.index(leaves.len())];
        let mut proof = tree.proof(&leaf).unwrap();
        let step = pick.index(proof.siblings.len());
        proof.siblings[step][bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify(&tree.root(), &leaf, &proof.siblings));
    }
}
