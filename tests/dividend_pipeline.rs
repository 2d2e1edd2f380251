//! Dividend pipeline integration tests
//!
//! Covers the off-chain half of a dividend cycle end to end:
//! 1. Snapshot file -> shares -> Merkle root
//! 2. Report persistence and proof regeneration from the saved leaves
//! 3. Root stability under reordering of the snapshot
//! 4. Publication to the treasury and claims by every account

use rand::seq::SliceRandom;
use rand::SeedableRng;

use rain_core::{format_hash, parse_hash, Address, LeafEntry, U256, ZERO_HASH};
use rain_dividends::{
    calculate_dividend_shares, get_merkle_proof, DistributionReport, ReputationRecord,
    ReputationSnapshot, SnapshotOracle,
};
use rain_merkle::{hash_sorted_pair, merkle_leaf, verify, MerkleTree};
use rain_settlement::{ClaimDividend, TreasuryClient, TreasuryConfig};

// ============================================================================
// Helpers
// ============================================================================

fn wei(tokens: u64) -> U256 {
    U256::from(tokens) * U256::from(10u64).pow(U256::from(18u64))
}

fn alice() -> Address {
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap()
}

fn bob() -> Address {
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".parse().unwrap()
}

fn charlie() -> Address {
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906".parse().unwrap()
}

fn snapshot(records: &[(Address, U256)]) -> ReputationSnapshot {
    ReputationSnapshot {
        reputations: records
            .iter()
            .map(|(account, reputation)| ReputationRecord {
                account: *account,
                reputation: *reputation,
            })
            .collect(),
    }
}

// ============================================================================
// 1. Shares and root
// ============================================================================

#[test]
fn test_alice_bob_end_to_end() {
    rain_logging::init(rain_logging::LogLevel::Debug);

    let snap = snapshot(&[(alice(), U256::from(100u64)), (bob(), U256::from(200u64))]);
    let oracle = SnapshotOracle::from(&snap);
    let dist = calculate_dividend_shares(&oracle, &snap.accounts(), U256::from(3000u64)).unwrap();

    assert_eq!(
        dist.leaf_entries(),
        vec![
            LeafEntry::new(alice(), U256::from(1000u64)),
            LeafEntry::new(bob(), U256::from(2000u64)),
        ]
    );

    let leaf_a = merkle_leaf(&alice(), &U256::from(1000u64));
    let leaf_b = merkle_leaf(&bob(), &U256::from(2000u64));
    assert_eq!(dist.root, hash_sorted_pair(&leaf_a, &leaf_b));

    let proof_a = get_merkle_proof(&dist.leaf_entries(), &alice(), &U256::from(1000u64)).unwrap();
    let proof_b = get_merkle_proof(&dist.leaf_entries(), &bob(), &U256::from(2000u64)).unwrap();
    assert_eq!(proof_a.siblings, vec![leaf_b]);
    assert_eq!(proof_b.siblings, vec![leaf_a]);

    // Bob claiming Alice's amount does not verify
    let forged = merkle_leaf(&bob(), &U256::from(1000u64));
    assert!(!verify(&dist.root, &forged, &proof_b.siblings));
}

#[test]
fn test_token_scale_shares() {
    let snap = snapshot(&[
        (alice(), wei(100)),
        (bob(), wei(200)),
        (charlie(), wei(50)),
    ]);
    let pool = wei(25_000);
    let dist =
        calculate_dividend_shares(&SnapshotOracle::from(&snap), &snap.accounts(), pool).unwrap();

    assert_eq!(dist.total_reputation, wei(350));
    for share in &dist.shares {
        assert_eq!(share.amount, share.reputation * pool / wei(350));
        let proof = dist.proof_for(&share.account).unwrap();
        assert!(proof.verify(&dist.root, &merkle_leaf(&share.account, &share.amount)));
    }
    assert!(dist.distributed_total() <= pool);
    assert_eq!(
        dist.distributed_total() + dist.undistributed_remainder(),
        pool
    );
}

#[test]
fn test_nobody_has_reputation() {
    let snap = snapshot(&[(alice(), U256::ZERO), (bob(), U256::ZERO)]);
    let dist = calculate_dividend_shares(
        &SnapshotOracle::from(&snap),
        &snap.accounts(),
        U256::from(1000u64),
    )
    .unwrap();

    assert!(dist.is_empty());
    assert_eq!(dist.root, ZERO_HASH);
    assert_eq!(DistributionReport::from_distribution(&dist).root, format_hash(&ZERO_HASH));
}

// ============================================================================
// 2. Report persistence
// ============================================================================

#[test]
fn test_report_roundtrip_preserves_root_and_proofs() {
    let dir = tempfile::tempdir().unwrap();
    let snap_path = dir.path().join("snapshot.json");
    let report_path = dir.path().join("out").join("report.json");

    let snap = snapshot(&[
        (alice(), wei(100)),
        (bob(), wei(200)),
        (charlie(), wei(50)),
    ]);
    std::fs::write(&snap_path, serde_json::to_string_pretty(&snap).unwrap()).unwrap();

    let loaded = ReputationSnapshot::load_from(&snap_path).unwrap();
    let dist = calculate_dividend_shares(
        &SnapshotOracle::from(&loaded),
        &loaded.accounts(),
        wei(1_000),
    )
    .unwrap();
    DistributionReport::from_distribution(&dist)
        .with_cycle_id(7)
        .save_to(&report_path)
        .unwrap();

    let report = DistributionReport::load_from(&report_path).unwrap();
    assert_eq!(report.cycle_id, Some(7));
    assert_eq!(report.root_hash().unwrap(), dist.root);
    assert_eq!(MerkleTree::from_entries(&report.leaf_entries()).root(), dist.root);

    for claim in &report.claims {
        let stored: Vec<_> = claim.proof.iter().map(|h| parse_hash(h).unwrap()).collect();
        let rebuilt =
            get_merkle_proof(&report.leaf_entries(), &claim.account, &claim.amount).unwrap();
        assert_eq!(stored, rebuilt.siblings);
    }
}

// ============================================================================
// 3. Order independence
// ============================================================================

#[test]
fn test_root_independent_of_snapshot_order() {
    let records: Vec<(Address, U256)> = (1u8..=23)
        .map(|i| (Address::repeat_byte(i), U256::from(i as u64 * 37)))
        .collect();
    let pool = wei(12_345);

    let base = snapshot(&records);
    let expected =
        calculate_dividend_shares(&SnapshotOracle::from(&base), &base.accounts(), pool)
            .unwrap()
            .root;

    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5241494e);
    for _ in 0..10 {
        let mut shuffled = records.clone();
        shuffled.shuffle(&mut rng);
        let snap = snapshot(&shuffled);
        let dist =
            calculate_dividend_shares(&SnapshotOracle::from(&snap), &snap.accounts(), pool)
                .unwrap();
        assert_eq!(dist.root, expected);
    }
}

// ============================================================================
// 4. Treasury
// ============================================================================

#[tokio::test]
async fn test_publish_and_claim_everyone() {
    let snap = snapshot(&[
        (alice(), wei(100)),
        (bob(), wei(200)),
        (charlie(), wei(50)),
    ]);
    let pool = wei(25_000);
    let dist =
        calculate_dividend_shares(&SnapshotOracle::from(&snap), &snap.accounts(), pool).unwrap();

    let treasury = TreasuryClient::new(TreasuryConfig {
        min_cycle_amount: wei(1),
        ..Default::default()
    });
    let cycle_id = treasury
        .create_dividend_cycle(dist.root, dist.total_payout)
        .await
        .unwrap();

    for share in &dist.shares {
        let paid = treasury
            .claim_dividend(ClaimDividend {
                cycle_id,
                account: share.account,
                amount: share.amount,
                merkle_proof: dist.proof_for(&share.account).unwrap().siblings,
            })
            .await
            .unwrap();
        assert_eq!(paid, share.amount);
        assert!(treasury.is_claimed(cycle_id, &share.account).await);
    }

    assert_eq!(treasury.total_distributed().await, dist.distributed_total());
    let cycle = treasury.get_cycle(cycle_id).await.unwrap();
    assert_eq!(cycle.remaining(), dist.undistributed_remainder());
}
