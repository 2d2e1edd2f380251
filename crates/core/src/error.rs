use thiserror::Error;

#[derive(Error, Debug)]
pub enum RainError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, RainError>;

/// Parse an account address from `0x`-prefixed hex.
pub fn parse_address(s: &str) -> Result<crate::Address> {
    s.trim()
        .parse::<crate::Address>()
        .map_err(|e| RainError::InvalidAddress(format!("{}: {}", s, e)))
}
