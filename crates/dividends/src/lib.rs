//! Rain Dividends
//!
//! Off-chain side of a dividend cycle: reads a reputation snapshot, splits a
//! fixed payout pool proportionally to reputation, commits the resulting
//! `(account, amount)` pairs into a Merkle tree, and hands out the proofs
//! each account needs to claim on-chain.
//!
//! ```text
//! reputation snapshot ──► shares (floor division) ──► leaves ──► tree
//!                                                                 │
//!                        root ──► treasury          proofs ◄──────┘
//! ```

mod calculator;
mod oracle;
mod report;

pub use calculator::{calculate_dividend_shares, get_merkle_proof, DividendDistribution};
pub use oracle::{ReputationOracle, ReputationRecord, ReputationSnapshot, SnapshotOracle};
pub use report::{ClaimRecord, DistributionReport};

use thiserror::Error;

/// Errors from the reputation source.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Reputation lookup failed for {account}: {reason}")]
    LookupFailed { account: String, reason: String },

    #[error("Failed to read snapshot: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    ParseError(serde_json::Error),
}

/// Errors from share computation and proof lookup.
#[derive(Error, Debug)]
pub enum DividendError {
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Total reputation overflows 256 bits")]
    ReputationOverflow,

    #[error("Share computation overflows 256 bits for {0}")]
    ShareOverflow(String),

    #[error("Merkle error: {0}")]
    Merkle(#[from] rain_merkle::MerkleError),
}

/// Errors from reading or writing a distribution report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse report: {0}")]
    ParseError(serde_json::Error),

    #[error("Invalid report field: {0}")]
    InvalidField(#[from] rain_core::RainError),
}

pub type Result<T> = std::result::Result<T, DividendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_share_overflow() {
        let err = DividendError::ShareOverflow("0xabc".to_string());
        assert_eq!(err.to_string(), "Share computation overflows 256 bits for 0xabc");
    }

    #[test]
    fn test_error_from_merkle() {
        let err: DividendError = rain_merkle::MerkleError::LeafNotFound([0u8; 32]).into();
        assert!(err.to_string().starts_with("Merkle error: Leaf not found"));
    }

    #[test]
    fn test_error_display_lookup_failed() {
        let err = OracleError::LookupFailed {
            account: "0x11".to_string(),
            reason: "rpc timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Reputation lookup failed for 0x11: rpc timeout"
        );
    }
}
