use crate::{Hash, RainError, Result};

/// Format a hash as `0x`-prefixed lowercase hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a 32-byte hash from hex, with or without the `0x` prefix.
pub fn parse_hash(s: &str) -> Result<Hash> {
    let s = s.trim();
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| RainError::InvalidHex(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(RainError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Short form for log lines: first four bytes.
pub fn short_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(4)])
}
