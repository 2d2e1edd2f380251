//! Read-only reputation source.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use rain_core::{Address, U256};

use crate::OracleError;

/// Read-only view of the on-chain reputation ledger.
///
/// Called once per candidate account per dividend cycle. Implementations
/// must not have side effects; a chain-backed oracle would read
/// `RainReputation.reputationScores(account)`.
pub trait ReputationOracle {
    /// Current reputation of `account` (0 if it has none).
    fn reputation_of(&self, account: &Address) -> Result<U256, OracleError>;
}

/// One line of a reputation snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationRecord {
    pub account: Address,
    #[serde(with = "rain_core::decimal")]
    pub reputation: U256,
}

/// Reputation snapshot as exported from the chain.
///
/// ```json
/// { "reputations": [ { "account": "0x…", "reputation": "100000000000000000000" } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReputationSnapshot {
    #[serde(default)]
    pub reputations: Vec<ReputationRecord>,
}

impl ReputationSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, OracleError> {
        let content = std::fs::read_to_string(path).map_err(OracleError::ReadError)?;
        let snapshot: ReputationSnapshot =
            serde_json::from_str(&content).map_err(OracleError::ParseError)?;
        info!(
            "Loaded reputation snapshot from {:?} ({} accounts)",
            path,
            snapshot.reputations.len()
        );
        Ok(snapshot)
    }

    /// Candidate accounts, in file order.
    pub fn accounts(&self) -> Vec<Address> {
        self.reputations.iter().map(|r| r.account).collect()
    }
}

/// In-memory oracle over a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotOracle {
    scores: HashMap<Address, U256>,
}

impl SnapshotOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an account's reputation, replacing any previous value.
    pub fn set(&mut self, account: Address, reputation: U256) {
        self.scores.insert(account, reputation);
    }

    /// Builder-style `set`.
    pub fn with(mut self, account: Address, reputation: U256) -> Self {
        self.set(account, reputation);
        self
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl From<&ReputationSnapshot> for SnapshotOracle {
    fn from(snapshot: &ReputationSnapshot) -> Self {
        let mut oracle = Self::new();
        for record in &snapshot.reputations {
            oracle.set(record.account, record.reputation);
        }
        oracle
    }
}

impl ReputationOracle for SnapshotOracle {
    fn reputation_of(&self, account: &Address) -> Result<U256, OracleError> {
        Ok(self.scores.get(account).copied().unwrap_or(U256::ZERO))
    }
}
