//! Packed keccak-256 hashing, as Solidity's `abi.encodePacked` + `keccak256`.
//!
//! Leaf formula: `keccak256(account[20] || amount_be[32])`, i.e.
//! `solidityKeccak(['address', 'uint256'], [account, amount])`.
//! Internal nodes: `keccak256(a[32] || b[32])`, i.e.
//! `solidityKeccak(['bytes32', 'bytes32'], [a, b])`.
//!
//! These byte layouts MUST match what the treasury contract hashes, or no
//! proof will ever verify on-chain.

use rain_core::{Address, Hash, U256};
use sha3::{Digest, Keccak256};

/// Keccak-256 (the Ethereum variant, not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Compute a leaf hash from an account and its claimable amount.
pub fn merkle_leaf(account: &Address, amount: &U256) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(account.as_slice());
    hasher.update(amount.to_be_bytes::<32>());
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Hash two nodes in the given order.
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Hash two nodes smaller-first, as `MerkleProof._hashPair` does.
///
/// Commutative: `hash_sorted_pair(a, b) == hash_sorted_pair(b, a)`.
pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    if a <= b {
        hash_pair(a, b)
    } else {
        hash_pair(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_input() {
        let expected = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";
        assert_eq!(rain_core::format_hash(&keccak256(b"")), format!("0x{}", expected));
    }

    #[test]
    fn test_leaf_is_packed_address_and_uint256() {
        let account = Address::repeat_byte(0x11);
        let amount = U256::from(1000u64);

        // 20 address bytes followed by the 32-byte big-endian amount, no padding
        let mut packed = Vec::with_capacity(52);
        packed.extend_from_slice(&[0x11u8; 20]);
        let mut amount_be = [0u8; 32];
        amount_be[30..].copy_from_slice(&1000u16.to_be_bytes());
        packed.extend_from_slice(&amount_be);
        assert_eq!(packed.len(), 52);

        assert_eq!(merkle_leaf(&account, &amount), keccak256(&packed));
    }

    #[test]
    fn test_leaf_depends_on_amount() {
        let account = Address::repeat_byte(0x22);
        assert_ne!(
            merkle_leaf(&account, &U256::from(2000u64)),
            merkle_leaf(&account, &U256::from(2001u64))
        );
    }

    #[test]
    fn test_hash_pair_is_concatenation() {
        let a = [0x01u8; 32];
        let b = [0x02u8; 32];
        let mut concat = [0u8; 64];
        concat[..32].copy_from_slice(&a);
        concat[32..].copy_from_slice(&b);
        assert_eq!(hash_pair(&a, &b), keccak256(&concat));
        assert_ne!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_sorted_pair_commutative() {
        let a = [0x0Au8; 32];
        let b = [0x0Bu8; 32];
        assert_eq!(hash_sorted_pair(&a, &b), hash_sorted_pair(&b, &a));
        assert_eq!(hash_sorted_pair(&b, &a), hash_pair(&a, &b));
    }

    #[test]
    fn test_hash_sorted_pair_with_itself() {
        let c = [0x0Cu8; 32];
        assert_eq!(hash_sorted_pair(&c, &c), hash_pair(&c, &c));
    }
}
