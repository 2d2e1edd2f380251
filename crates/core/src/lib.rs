//! Rain Core Types
//!
//! This crate defines the fundamental data structures shared by the Rain
//! dividend tooling: hashes, accounts, 256-bit amounts, and the
//! `(account, amount)` pairs that get committed into a Merkle tree.

pub mod decimal;
mod encoding;
mod error;
mod types;

pub use encoding::*;
pub use error::*;
pub use types::*;
