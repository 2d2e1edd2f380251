//! Serde helpers that encode `U256` as a base-10 string.
//!
//! Token amounts carry 18 decimals and overflow JSON numbers, so they travel
//! as strings. Parsing accepts anything `U256::from_str` accepts (plain
//! decimal, or `0x`-prefixed hex).

use serde::{Deserialize, Deserializer, Serializer};

use crate::{RainError, U256};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_u256(&s).map_err(serde::de::Error::custom)
}

/// Parse a decimal (or `0x` hex) integer string into a `U256`.
pub fn parse_u256(s: &str) -> Result<U256, RainError> {
    let trimmed = s.trim().replace('_', "");
    trimmed
        .parse::<U256>()
        .map_err(|e| RainError::InvalidAmount(format!("{}: {}", s, e)))
}

/// Render `value` as a fixed-point number with `decimals` fractional digits.
///
/// Used for human-readable output only; never feeds back into share math.
pub fn format_units(value: &U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}
