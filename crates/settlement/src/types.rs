//! Treasury types

use serde::{Deserialize, Serialize};

use rain_core::{Address, CycleId, Hash, U256};

/// Default window during which a cycle accepts claims: 30 days.
pub const DEFAULT_CLAIM_PERIOD_SECS: u64 = 30 * 24 * 3600;

/// Treasury parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    /// Seconds from cycle creation until claims close
    pub claim_period_secs: u64,
    /// Smallest pool a cycle may be created with
    #[serde(with = "rain_core::decimal")]
    pub min_cycle_amount: U256,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            claim_period_secs: DEFAULT_CLAIM_PERIOD_SECS,
            min_cycle_amount: U256::ZERO,
        }
    }
}

/// A published dividend cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividendCycle {
    pub cycle_id: CycleId,
    /// Merkle root of `(account, amount)` leaves
    pub merkle_root: Hash,
    /// Pool size committed at creation
    pub total_amount: U256,
    /// Sum of successful claims so far
    pub claimed_amount: U256,
    pub created_at: u64,
    /// Claims are accepted while `now <= expires_at`
    pub expires_at: u64,
}

impl DividendCycle {
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// Pool left for future claims.
    pub fn remaining(&self) -> U256 {
        self.total_amount.saturating_sub(self.claimed_amount)
    }
}

/// Claim submitted by one account.
#[derive(Debug, Clone)]
pub struct ClaimDividend {
    pub cycle_id: CycleId,
    /// Caller; the leaf is rebuilt from this and `amount`
    pub account: Address,
    pub amount: U256,
    /// Sibling hashes, bottom-up
    pub merkle_proof: Vec<Hash>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> DividendCycle {
        DividendCycle {
            cycle_id: 1,
            merkle_root: [0xAA; 32],
            total_amount: U256::from(1000u64),
            claimed_amount: U256::from(400u64),
            created_at: 100,
            expires_at: 200,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let c = cycle();
        assert!(!c.is_expired(200));
        assert!(c.is_expired(201));
    }

    #[test]
    fn test_remaining() {
        assert_eq!(cycle().remaining(), U256::from(600u64));
    }

    #[test]
    fn test_config_defaults_and_partial_json() {
        let config: TreasuryConfig = serde_json::from_str(r#"{"min_cycle_amount":"50"}"#).unwrap();
        assert_eq!(config.claim_period_secs, DEFAULT_CLAIM_PERIOD_SECS);
        assert_eq!(config.min_cycle_amount, U256::from(50u64));
    }
}
