//! Rain Settlement
//!
//! In-memory dividend treasury mirroring the on-chain claim rules.
//!
//! ## Claim Flow
//!
//! 1. **Create cycle**: the owner publishes a Merkle root together with the
//!    pool size. The cycle gets the next id and an expiry of
//!    `created_at + claim_period`.
//! 2. **Claim**: each account submits `(cycle_id, amount, proof)`. The
//!    treasury rebuilds its leaf as `keccak256(account || amount)` and replays
//!    the proof against the stored root.
//! 3. **Expiry**: after `expires_at` the cycle no longer accepts claims.
//!    Unclaimed funds stay in the treasury.

mod client;
mod types;

pub use client::TreasuryClient;
pub use types::*;

use rain_core::CycleId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Dividend cycle {0} not found")]
    CycleNotFound(CycleId),

    #[error("Dividend cycle {cycle_id} expired at {expired_at}")]
    CycleExpired { cycle_id: CycleId, expired_at: u64 },

    #[error("Dividend already claimed")]
    AlreadyClaimed,

    #[error("Invalid Merkle proof")]
    InvalidMerkleProof,

    #[error("No dividends to claim")]
    ZeroAmount,

    #[error("Insufficient pool balance: requested {requested}, remaining {remaining}")]
    InsufficientPoolBalance { requested: String, remaining: String },

    #[error("Amount below minimum: {amount} < {minimum}")]
    AmountBelowMinimum { amount: String, minimum: String },
}

pub type Result<T> = std::result::Result<T, SettlementError>;
