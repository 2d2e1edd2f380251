//! Treasury client
//!
//! Tracks dividend cycles and claims in memory and enforces the same checks,
//! in the same order, as the on-chain treasury.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use rain_core::{format_hash, short_hex, Address, CycleId, Hash, U256};
use rain_merkle::{merkle_leaf, verify};

use crate::{ClaimDividend, DividendCycle, Result, SettlementError, TreasuryConfig};

/// In-memory treasury state
#[derive(Debug, Default)]
struct TreasuryState {
    cycles: HashMap<CycleId, DividendCycle>,
    /// (cycle_id, account) pairs that have been paid
    claimed: HashSet<(CycleId, Address)>,
    /// Last assigned cycle id (0 = none yet)
    current_cycle_id: CycleId,
    /// Sum of all successful claims across cycles
    total_distributed: U256,
}

/// Dividend treasury stand-in.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct TreasuryClient {
    config: Arc<RwLock<TreasuryConfig>>,
    state: Arc<RwLock<TreasuryState>>,
}

impl Default for TreasuryClient {
    fn default() -> Self {
        Self::new(TreasuryConfig::default())
    }
}

impl TreasuryClient {
    pub fn new(config: TreasuryConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            state: Arc::new(RwLock::new(TreasuryState::default())),
        }
    }

    /// Current unix time in seconds
    fn now() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    // ==================== Configuration ====================

    pub async fn config(&self) -> TreasuryConfig {
        self.config.read().await.clone()
    }

    /// Change the claim window for cycles created from now on.
    pub async fn set_claim_period(&self, claim_period_secs: u64) {
        self.config.write().await.claim_period_secs = claim_period_secs;
        info!("Claim period set to {}s", claim_period_secs);
    }

    pub async fn set_min_cycle_amount(&self, min_cycle_amount: U256) {
        self.config.write().await.min_cycle_amount = min_cycle_amount;
        info!("Minimum cycle amount set to {}", min_cycle_amount);
    }

    // ==================== Cycles ====================

    /// Publish a Merkle root for a new dividend cycle.
    pub async fn create_dividend_cycle(
        &self,
        merkle_root: Hash,
        total_amount: U256,
    ) -> Result<CycleId> {
        self.create_dividend_cycle_at(merkle_root, total_amount, Self::now())
            .await
    }

    /// [`create_dividend_cycle`](Self::create_dividend_cycle) with an explicit clock.
    pub async fn create_dividend_cycle_at(
        &self,
        merkle_root: Hash,
        total_amount: U256,
        now: u64,
    ) -> Result<CycleId> {
        let config = self.config().await;
        if total_amount < config.min_cycle_amount {
            return Err(SettlementError::AmountBelowMinimum {
                amount: total_amount.to_string(),
                minimum: config.min_cycle_amount.to_string(),
            });
        }

        let mut state = self.state.write().await;
        state.current_cycle_id += 1;
        let cycle_id = state.current_cycle_id;
        let cycle = DividendCycle {
            cycle_id,
            merkle_root,
            total_amount,
            claimed_amount: U256::ZERO,
            created_at: now,
            expires_at: now.saturating_add(config.claim_period_secs),
        };

        info!(
            "Created dividend cycle {} (root: {}, amount: {}, expires: {})",
            cycle_id,
            format_hash(&merkle_root),
            total_amount,
            cycle.expires_at,
        );
        state.cycles.insert(cycle_id, cycle);
        Ok(cycle_id)
    }

    pub async fn get_cycle(&self, cycle_id: CycleId) -> Option<DividendCycle> {
        self.state.read().await.cycles.get(&cycle_id).cloned()
    }

    /// Id of the most recent cycle (0 if none)
    pub async fn current_cycle_id(&self) -> CycleId {
        self.state.read().await.current_cycle_id
    }

    pub async fn is_claimed(&self, cycle_id: CycleId, account: &Address) -> bool {
        self.state
            .read()
            .await
            .claimed
            .contains(&(cycle_id, *account))
    }

    pub async fn total_distributed(&self) -> U256 {
        self.state.read().await.total_distributed
    }

    // ==================== Claims ====================

    /// Claim an account's dividend for a cycle using its Merkle proof.
    ///
    /// Returns the amount paid.
    pub async fn claim_dividend(&self, claim: ClaimDividend) -> Result<U256> {
        self.claim_dividend_at(claim, Self::now()).await
    }

    /// [`claim_dividend`](Self::claim_dividend) with an explicit clock.
    pub async fn claim_dividend_at(&self, claim: ClaimDividend, now: u64) -> Result<U256> {
        debug!(
            "Claim from {} for cycle {} ({} siblings)",
            claim.account,
            claim.cycle_id,
            claim.merkle_proof.len(),
        );

        let mut state = self.state.write().await;

        let cycle = state
            .cycles
            .get(&claim.cycle_id)
            .ok_or(SettlementError::CycleNotFound(claim.cycle_id))?;

        if cycle.is_expired(now) {
            return Err(SettlementError::CycleExpired {
                cycle_id: claim.cycle_id,
                expired_at: cycle.expires_at,
            });
        }

        if claim.amount.is_zero() {
            return Err(SettlementError::ZeroAmount);
        }

        let claim_key = (claim.cycle_id, claim.account);
        if state.claimed.contains(&claim_key) {
            return Err(SettlementError::AlreadyClaimed);
        }

        let leaf = merkle_leaf(&claim.account, &claim.amount);
        if !verify(&cycle.merkle_root, &leaf, &claim.merkle_proof) {
            warn!(
                "Rejected claim from {} for cycle {}: leaf {} does not match root {}",
                claim.account,
                claim.cycle_id,
                short_hex(&leaf),
                short_hex(&cycle.merkle_root),
            );
            return Err(SettlementError::InvalidMerkleProof);
        }

        let remaining = cycle.remaining();
        if claim.amount > remaining {
            return Err(SettlementError::InsufficientPoolBalance {
                requested: claim.amount.to_string(),
                remaining: remaining.to_string(),
            });
        }

        if let Some(cycle) = state.cycles.get_mut(&claim.cycle_id) {
            cycle.claimed_amount += claim.amount;
        }
        state.claimed.insert(claim_key);
        state.total_distributed = state.total_distributed.saturating_add(claim.amount);

        info!(
            "Dividend claimed: {} received {} from cycle {}",
            claim.account, claim.amount, claim.cycle_id,
        );
        Ok(claim.amount)
    }
}
