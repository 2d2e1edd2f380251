//! Persisted distribution report.
//!
//! Everything a claimant needs after the root is published: their amount,
//! leaf and proof. Hashes are stored as `0x` hex and integers as decimal
//! strings so the file can be read by any tooling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rain_core::{format_hash, parse_address, parse_hash, Address, CycleId, Hash, LeafEntry, U256};
use rain_merkle::merkle_leaf;

use crate::{DividendDistribution, ReportError};

/// One claimant's line in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub account: Address,
    #[serde(with = "rain_core::decimal")]
    pub reputation: U256,
    #[serde(with = "rain_core::decimal")]
    pub amount: U256,
    /// Leaf hash (hex)
    pub leaf: String,
    /// Sibling hashes, bottom-up (hex)
    pub proof: Vec<String>,
}

impl ClaimRecord {
    /// Decoded sibling hashes.
    pub fn proof_hashes(&self) -> Result<Vec<Hash>, ReportError> {
        self.proof
            .iter()
            .map(|h| parse_hash(h).map_err(ReportError::from))
            .collect()
    }
}

/// A full distribution, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Treasury cycle the root was published under, once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_id: Option<CycleId>,
    /// Merkle root (hex)
    pub root: String,
    #[serde(with = "rain_core::decimal")]
    pub total_payout: U256,
    #[serde(with = "rain_core::decimal")]
    pub total_reputation: U256,
    #[serde(default)]
    pub claims: Vec<ClaimRecord>,
}

impl DistributionReport {
    /// Snapshot a distribution, including every account's proof.
    pub fn from_distribution(dist: &DividendDistribution) -> Self {
        let claims = dist
            .shares
            .iter()
            .map(|share| {
                let leaf = merkle_leaf(&share.account, &share.amount);
                let proof = dist
                    .proof_for(&share.account)
                    .map(|p| p.siblings.iter().map(format_hash).collect())
                    .unwrap_or_default();
                ClaimRecord {
                    account: share.account,
                    reputation: share.reputation,
                    amount: share.amount,
                    leaf: format_hash(&leaf),
                    proof,
                }
            })
            .collect();

        Self {
            cycle_id: None,
            root: format_hash(&dist.root),
            total_payout: dist.total_payout,
            total_reputation: dist.total_reputation,
            claims,
        }
    }

    pub fn with_cycle_id(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }

    /// Decoded root.
    pub fn root_hash(&self) -> Result<Hash, ReportError> {
        Ok(parse_hash(&self.root)?)
    }

    /// Leaf entries in report order, for rebuilding the tree.
    pub fn leaf_entries(&self) -> Vec<LeafEntry> {
        self.claims
            .iter()
            .map(|c| LeafEntry::new(c.account, c.amount))
            .collect()
    }

    /// Record for an account given as hex; first match if listed twice.
    pub fn claim_for(&self, account: &str) -> Result<Option<&ClaimRecord>, ReportError> {
        let account = parse_address(account)?;
        Ok(self.claims.iter().find(|c| c.account == account))
    }

    /// Write the report as pretty JSON, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ReportError::WriteError)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(ReportError::ParseError)?;
        std::fs::write(path, json).map_err(ReportError::WriteError)?;
        info!(
            "Saved distribution report to {:?} ({} claims)",
            path,
            self.claims.len()
        );
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path).map_err(ReportError::ReadError)?;
        let report: DistributionReport =
            serde_json::from_str(&content).map_err(ReportError::ParseError)?;
        debug!(
            "Loaded distribution report from {:?}: root {}, {} claims",
            path,
            report.root,
            report.claims.len()
        );
        Ok(report)
    }
}
