//! Rain CLI
//!
//! Command-line interface for computing dividend distributions, handing out
//! Merkle proofs and checking claims.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use rain_core::decimal::{format_units, parse_u256};
use rain_core::{format_hash, parse_address, parse_hash, Address, CycleId, Hash, U256};
use rain_dividends::{
    calculate_dividend_shares, get_merkle_proof, DistributionReport, DividendDistribution,
    ReputationSnapshot, SnapshotOracle,
};
use rain_logging::LogLevel;
use rain_merkle::{merkle_leaf, verify};
use rain_settings::{DisplaySettings, Settings};
use rain_settlement::{ClaimDividend, SettlementError, TreasuryClient};

/// Rain - reputation-weighted dividends with Merkle claims
#[derive(Parser)]
#[command(name = "rain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.rain/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute each account's share of a pool and the Merkle root
    Shares {
        /// Reputation snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Pool to distribute, in token base units
        #[arg(short, long)]
        pool: String,

        /// Write the distribution report (with proofs) here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the Merkle proof for one account of a saved report
    Proof {
        /// Distribution report written by `shares --out`
        #[arg(short, long)]
        report: PathBuf,

        /// Account address (0x...)
        #[arg(short, long)]
        account: String,
    },

    /// Check a claim against a published root
    Verify {
        /// Merkle root (0x...)
        #[arg(long)]
        root: String,

        /// Account address (0x...)
        #[arg(long)]
        account: String,

        /// Claimed amount, in token base units
        #[arg(long)]
        amount: String,

        /// Comma-separated sibling hashes, bottom-up
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,
    },

    /// Run a full cycle against an in-memory treasury
    Simulate {
        /// Reputation snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Pool to distribute, in token base units
        #[arg(short, long)]
        pool: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load_or_default(),
    }
    .context("Failed to load settings")?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        settings.logging.level
    };
    rain_logging::init(level);
    debug!("Settings: {:?}", settings);

    match cli.command {
        Commands::Shares {
            snapshot,
            pool,
            out,
        } => {
            shares(&settings, &snapshot, &pool, out)?;
        }
        Commands::Proof { report, account } => {
            proof(&settings, &report, &account)?;
        }
        Commands::Verify {
            root,
            account,
            amount,
            proof,
        } => {
            verify_claim(&root, &account, &amount, &proof)?;
        }
        Commands::Simulate { snapshot, pool } => {
            simulate(&settings, &snapshot, &pool).await?;
        }
    }

    Ok(())
}

// ============================================================================
// Distribution
// ============================================================================

fn load_distribution(snapshot: &PathBuf, pool: &str) -> Result<DividendDistribution> {
    let total_payout = parse_u256(pool).context("Invalid --pool amount")?;
    let snapshot = ReputationSnapshot::load_from(snapshot)
        .with_context(|| format!("Failed to load snapshot {:?}", snapshot))?;
    let oracle = SnapshotOracle::from(&snapshot);

    let dist = calculate_dividend_shares(&oracle, &snapshot.accounts(), total_payout)
        .context("Failed to compute dividend shares")?;
    Ok(dist)
}

fn print_distribution(dist: &DividendDistribution, display: &DisplaySettings) {
    let fmt = |v: &U256| {
        format!(
            "{} {}",
            format_units(v, display.token_decimals),
            display.token_symbol
        )
    };

    println!("Dividend Distribution");
    println!("=====================");
    println!("Pool:             {}", fmt(&dist.total_payout));
    println!("Total reputation: {}", dist.total_reputation);
    println!("Accounts:         {}", dist.shares.len());
    println!();
    for share in &dist.shares {
        println!(
            "  {}  rep {:>28}  {}",
            share.account,
            share.reputation,
            fmt(&share.amount)
        );
    }
    println!();
    println!("Distributed:      {}", fmt(&dist.distributed_total()));
    println!("Undistributed:    {}", fmt(&dist.undistributed_remainder()));
    println!("Merkle root:      {}", format_hash(&dist.root));
}

fn shares(settings: &Settings, snapshot: &PathBuf, pool: &str, out: Option<PathBuf>) -> Result<()> {
    let dist = load_distribution(snapshot, pool)?;

    if dist.is_empty() {
        println!("No account has reputation; nothing to distribute.");
        return Ok(());
    }

    print_distribution(&dist, &settings.display);

    if let Some(out) = out {
        DistributionReport::from_distribution(&dist)
            .save_to(&out)
            .with_context(|| format!("Failed to write report {:?}", out))?;
        println!("Report written to {}", out.display());
    }

    Ok(())
}

// ============================================================================
// Proofs
// ============================================================================

fn proof(settings: &Settings, report: &PathBuf, account: &str) -> Result<()> {
    let report = DistributionReport::load_from(report)
        .with_context(|| format!("Failed to load report {:?}", report))?;

    let Some(claim) = report.claim_for(account)? else {
        bail!("Account {} is not part of this distribution", account);
    };

    // Rebuilt from the leaf list rather than trusting the stored proof
    let proof = get_merkle_proof(&report.leaf_entries(), &claim.account, &claim.amount)?;
    let root = report.root_hash()?;
    let leaf = merkle_leaf(&claim.account, &claim.amount);
    if !verify(&root, &leaf, &proof.siblings) {
        bail!("Report root {} does not match its leaves", report.root);
    }

    println!("Account: {}", claim.account);
    println!(
        "Amount:  {} ({} {})",
        claim.amount,
        format_units(&claim.amount, settings.display.token_decimals),
        settings.display.token_symbol
    );
    println!("Leaf:    {}", format_hash(&leaf));
    println!("Root:    {}", format_hash(&root));
    println!("Proof ({} siblings):", proof.len());
    for sibling in &proof.siblings {
        println!("  {}", format_hash(sibling));
    }
    Ok(())
}

fn verify_claim(root: &str, account: &str, amount: &str, proof: &[String]) -> Result<()> {
    let root = parse_hash(root).context("Invalid --root")?;
    let account = parse_address(account).context("Invalid --account")?;
    let amount = parse_u256(amount).context("Invalid --amount")?;
    let siblings = proof
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_hash(s))
        .collect::<Result<Vec<Hash>, _>>()
        .context("Invalid --proof")?;

    let leaf = merkle_leaf(&account, &amount);
    if verify(&root, &leaf, &siblings) {
        println!("Valid: {} may claim {}", account, amount);
        Ok(())
    } else {
        bail!("Invalid Merkle proof for {} claiming {}", account, amount)
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// What happened to each claim submitted during a simulated cycle.
struct CycleOutcome {
    cycle_id: CycleId,
    /// One entry per share, in share order
    claims: Vec<(Address, rain_settlement::Result<U256>)>,
    /// Wrong amount submitted before the account's honest claim
    tampered: rain_settlement::Result<U256>,
    /// Honest claim replayed after it was paid
    double_claim: rain_settlement::Result<U256>,
}

/// Publish `dist` to `treasury` and drive every claim through it.
///
/// The tampered claim goes in first so that it is judged on its proof,
/// not rejected as a repeat.
async fn run_cycle(treasury: &TreasuryClient, dist: &DividendDistribution) -> Result<CycleOutcome> {
    let cycle_id = treasury
        .create_dividend_cycle(dist.root, dist.total_payout)
        .await?;
    info!("Published root under cycle {}", cycle_id);

    let mut honest = Vec::with_capacity(dist.shares.len());
    for share in &dist.shares {
        let Some(proof) = dist.proof_for(&share.account) else {
            bail!("No proof for {}", share.account);
        };
        honest.push(ClaimDividend {
            cycle_id,
            account: share.account,
            amount: share.amount,
            merkle_proof: proof.siblings,
        });
    }
    let Some(first) = honest.first().cloned() else {
        bail!("Distribution has no shares");
    };

    let mut tampered = first.clone();
    tampered.amount = tampered.amount.saturating_add(U256::from(1u64));
    let tampered = treasury.claim_dividend(tampered).await;

    let mut claims = Vec::with_capacity(honest.len());
    for claim in honest {
        let account = claim.account;
        claims.push((account, treasury.claim_dividend(claim).await));
    }

    let double_claim = treasury.claim_dividend(first).await;

    Ok(CycleOutcome {
        cycle_id,
        claims,
        tampered,
        double_claim,
    })
}

async fn simulate(settings: &Settings, snapshot: &PathBuf, pool: &str) -> Result<()> {
    let dist = load_distribution(snapshot, pool)?;
    if dist.is_empty() {
        println!("No account has reputation; no cycle created.");
        return Ok(());
    }
    print_distribution(&dist, &settings.display);

    let treasury = TreasuryClient::new(settings.treasury.to_config());
    let outcome = run_cycle(&treasury, &dist).await?;

    println!();
    println!("Cycle {} created", outcome.cycle_id);
    for (account, result) in &outcome.claims {
        match result {
            Ok(paid) => println!("  claimed   {}  {}", account, paid),
            Err(e) => println!("  rejected  {}  {}", account, e),
        }
    }

    println!();
    println!("Rejection checks:");
    report_rejection(
        "tampered amount",
        &SettlementError::InvalidMerkleProof,
        &outcome.tampered,
    );
    report_rejection(
        "double claim",
        &SettlementError::AlreadyClaimed,
        &outcome.double_claim,
    );

    println!();
    println!(
        "Total distributed: {}",
        format_units(
            &treasury.total_distributed().await,
            settings.display.token_decimals
        )
    );
    Ok(())
}

fn report_rejection(
    label: &str,
    expected: &SettlementError,
    result: &rain_settlement::Result<U256>,
) {
    match result {
        Err(e) if e == expected => println!("  {:<16} rejected: {}", label, e),
        Err(e) => println!("  {:<16} rejected (unexpected): {}", label, e),
        Ok(paid) => println!("  {:<16} ACCEPTED {} (should have failed)", label, paid),
    }
}
