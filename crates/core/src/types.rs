use serde::{Deserialize, Serialize};

pub use alloy_primitives::{Address, U256};

/// 32-byte hash (leaf, internal node, or root)
pub type Hash = [u8; 32];

/// Root of an empty tree, and the "nothing published" sentinel
pub const ZERO_HASH: Hash = [0u8; 32];

/// Identifier of a dividend cycle on the treasury
pub type CycleId = u64;

/// The pair committed into one Merkle leaf.
///
/// The leaf hash is `keccak256(abi.encodePacked(account, amount))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafEntry {
    /// Account that may claim
    pub account: Address,
    /// Claimable amount in the payout token's base units
    #[serde(with = "crate::decimal")]
    pub amount: U256,
}

impl LeafEntry {
    pub fn new(account: Address, amount: U256) -> Self {
        Self { account, amount }
    }
}

/// One account's share of a dividend pool.
///
/// `amount == floor(reputation * total_payout / total_reputation)` for the
/// distribution this share belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendShare {
    /// Account receiving the share
    pub account: Address,
    /// Reputation read at snapshot time (always non-zero)
    #[serde(with = "crate::decimal")]
    pub reputation: U256,
    /// Share of the pool
    #[serde(with = "crate::decimal")]
    pub amount: U256,
}

impl DividendShare {
    /// The `(account, amount)` pair that goes into the tree.
    pub fn leaf_entry(&self) -> LeafEntry {
        LeafEntry::new(self.account, self.amount)
    }
}
