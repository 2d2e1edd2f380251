//! Rain Merkle
//!
//! Sorted-pair binary Merkle tree compatible with OpenZeppelin's
//! `MerkleProof.sol`.
//!
//! The `MerkleTree` is built off-chain from pre-hashed dividend leaves; its
//! root is published to the treasury, and the per-account proofs it emits are
//! replayed on-chain by `MerkleProof.verify`. `verify` in this crate is the
//! same replay, used by tests and by the in-memory treasury.
//!
//! Conventions:
//! - leaves are sorted ascending before the tree is built, so the root does
//!   not depend on input order
//! - an odd level pairs its last node with itself
//! - every parent is `keccak256(min(a, b) || max(a, b))`

pub mod error;
pub mod hash;
pub mod proof;
pub mod tree;

pub use error::{MerkleError, Result};
pub use hash::{hash_pair, hash_sorted_pair, keccak256, merkle_leaf};
pub use proof::{verify, MerkleProof};
pub use tree::MerkleTree;
