//! Reputation-weighted share computation.

use tracing::{debug, info};

use rain_core::{format_hash, Address, DividendShare, Hash, LeafEntry, U256, ZERO_HASH};
use rain_merkle::{merkle_leaf, MerkleProof, MerkleTree};

use crate::{DividendError, ReputationOracle, Result};

/// Output of one dividend calculation, ready for root publication.
#[derive(Debug, Clone)]
pub struct DividendDistribution {
    /// One entry per account with non-zero reputation, in candidate order
    pub shares: Vec<DividendShare>,
    /// Merkle root over `(account, amount)` leaves (`ZERO_HASH` if no shares)
    pub root: Hash,
    /// Sum of reputation over the included accounts
    pub total_reputation: U256,
    /// Pool being split
    pub total_payout: U256,
    /// The Merkle tree (for generating per-account proofs)
    tree: MerkleTree,
}

impl DividendDistribution {
    fn empty(total_payout: U256) -> Self {
        Self {
            shares: Vec::new(),
            root: ZERO_HASH,
            total_reputation: U256::ZERO,
            total_payout,
            tree: MerkleTree::from_leaves(Vec::new()),
        }
    }

    /// True when no account had reputation; nothing should be published.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// The `(account, amount)` pairs that were hashed into the tree.
    pub fn leaf_entries(&self) -> Vec<LeafEntry> {
        self.shares.iter().map(DividendShare::leaf_entry).collect()
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Share for a specific account (first entry if listed twice).
    pub fn share_of(&self, account: &Address) -> Option<&DividendShare> {
        self.shares.iter().find(|s| s.account == *account)
    }

    /// Generate a Merkle proof for a specific account.
    ///
    /// Returns `None` if the account is not in the distribution. Once
    /// `share_of` finds the account its leaf is in the tree, so the lookup
    /// below cannot miss.
    pub fn proof_for(&self, account: &Address) -> Option<MerkleProof> {
        let share = self.share_of(account)?;
        let leaf = merkle_leaf(&share.account, &share.amount);
        self.tree.proof(&leaf).ok()
    }

    /// Sum of all shares. Never exceeds `total_payout`.
    pub fn distributed_total(&self) -> U256 {
        self.shares
            .iter()
            .fold(U256::ZERO, |acc, s| acc.saturating_add(s.amount))
    }

    /// Flooring dust left in the pool; it is never distributed.
    pub fn undistributed_remainder(&self) -> U256 {
        self.total_payout.saturating_sub(self.distributed_total())
    }
}

/// Compute each account's share of `total_payout` and build the tree.
///
/// Accounts with zero reputation get no leaf at all. Each remaining account
/// receives `floor(reputation * total_payout / total_reputation)` computed in
/// exact 256-bit integer arithmetic. If nobody has reputation the result is
/// an empty distribution with the zero root, which is not an error.
pub fn calculate_dividend_shares<O>(
    oracle: &O,
    accounts: &[Address],
    total_payout: U256,
) -> Result<DividendDistribution>
where
    O: ReputationOracle + ?Sized,
{
    debug!("Fetching reputations for {} candidate accounts", accounts.len());

    let mut eligible: Vec<(Address, U256)> = Vec::with_capacity(accounts.len());
    let mut total_reputation = U256::ZERO;

    for account in accounts {
        let reputation = oracle.reputation_of(account)?;
        if reputation.is_zero() {
            debug!("Account {} has 0 reputation, skipping", account);
            continue;
        }
        debug!("Account {} reputation: {}", account, reputation);
        total_reputation = total_reputation
            .checked_add(reputation)
            .ok_or(DividendError::ReputationOverflow)?;
        eligible.push((*account, reputation));
    }

    if total_reputation.is_zero() {
        info!("Total reputation of candidate accounts is 0, no dividends to distribute");
        return Ok(DividendDistribution::empty(total_payout));
    }

    let mut shares = Vec::with_capacity(eligible.len());
    for (account, reputation) in eligible {
        let amount = reputation
            .checked_mul(total_payout)
            .ok_or_else(|| DividendError::ShareOverflow(account.to_string()))?
            / total_reputation;
        debug!("Share for {}: {} (reputation {})", account, amount, reputation);
        shares.push(DividendShare {
            account,
            reputation,
            amount,
        });
    }

    let leaves: Vec<Hash> = shares
        .iter()
        .map(|s| merkle_leaf(&s.account, &s.amount))
        .collect();
    let tree = MerkleTree::from_leaves(leaves);
    let root = tree.root();

    info!(
        "Built dividend tree: {} shares, root {}, total reputation {}",
        shares.len(),
        format_hash(&root),
        total_reputation
    );

    Ok(DividendDistribution {
        shares,
        root,
        total_reputation,
        total_payout,
        tree,
    })
}

/// Generate the proof for `(account, amount)` from the full leaf list.
///
/// The tree is rebuilt from `leaf_entries` on every call so the proof always
/// derives from the authoritative leaf set rather than from cached state.
pub fn get_merkle_proof(
    leaf_entries: &[LeafEntry],
    account: &Address,
    amount: &U256,
) -> Result<MerkleProof> {
    let tree = MerkleTree::from_entries(leaf_entries);
    let leaf = merkle_leaf(account, amount);
    Ok(tree.proof(&leaf)?)
}
