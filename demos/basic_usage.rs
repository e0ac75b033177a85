//! Basic usage examples for TxForge

use std::cell::Cell;
use std::time::Duration;

use txforge::prelude::*;
use txforge::tracker::Backoff;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== TxForge Basic Usage Examples ===\n");

    // Example 1: Building and validating an asset creation
    example_asset_create()?;

    // Example 2: Size estimation and fee assignment
    example_fee_assignment()?;

    // Example 3: Signing and transaction identifiers
    example_signing()?;

    // Example 4: Submission and settlement tracking
    example_tracking()?;

    Ok(())
}

fn example_asset_create() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 1: Building an Asset Creation");
    println!("--------------------------------------");

    let creator = KeypairSigner::generate();
    let tx = AssetConfigBuilder::new()
        .sender(creator.address())
        .first_valid(5_000_000)
        .last_valid(5_000_010)
        .genesis_hash([9u8; 32])
        .genesis_id("net-v1")
        .total(1_000_000u64)
        .decimals(2)
        .unit_name("TOK")
        .asset_name("Example Token")
        .url("https://example.org/token")
        .manager(creator.address())
        .build()?;

    println!("✓ Transaction built");
    println!("  Type: {}", tx.type_tag());
    println!("  Canonical size: {} bytes", tx.encoded_size()?);

    // Destroy conflicts with configuration fields and fails validation
    let err = AssetConfigBuilder::new()
        .sender(creator.address())
        .first_valid(5_000_000)
        .last_valid(5_000_010)
        .asset_id(77u64)
        .destroy(true)
        .asset_name("Example Token")
        .build()
        .unwrap_err();
    println!("  Conflicting intent rejected: {}", err);
    println!();

    Ok(())
}

fn example_fee_assignment() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 2: Size Estimation & Fee Assignment");
    println!("--------------------------------------------");

    let sender = KeypairSigner::generate();
    let builder = PaymentBuilder::new()
        .sender(sender.address())
        .first_valid(5_000_000)
        .last_valid(5_000_010)
        .genesis_hash([9u8; 32])
        .receiver(Address::new([2u8; 32]))
        .amount(250_000u64);

    let estimated = builder.estimated_size()?;
    println!("✓ Estimated canonical size: {} bytes", estimated);

    let params = FeeParams {
        fee_per_byte: 10,
        min_fee: 1000,
        extra_fee: None,
        max_fee: Some(1_000_000),
    };
    let tx = builder.build()?.assign_fee(&params)?;
    println!("  Assigned fee: {} units", tx.header.fee);
    println!();

    Ok(())
}

fn example_signing() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 3: Signing & Transaction Identifiers");
    println!("---------------------------------------------");

    let signer = KeypairSigner::generate();
    let tx = PaymentBuilder::new()
        .sender(signer.address())
        .first_valid(5_000_000)
        .last_valid(5_000_010)
        .genesis_hash([9u8; 32])
        .receiver(Address::new([2u8; 32]))
        .amount(250_000u64)
        .fee(1000u64)
        .build()?;

    let signed = SignedTransaction::sign(tx, &signer)?;
    println!("✓ Transaction signed");
    println!("  Id: {}", signed.id());
    println!("  Wire size: {} bytes", signed.encode()?.len());
    println!();

    Ok(())
}

/// An in-memory node: pends for two polls, then confirms.
struct ToyNode {
    polls: Cell<u32>,
}

impl NodeApi for ToyNode {
    fn submit_raw(&self, bytes: &[u8]) -> txforge::error::Result<String> {
        Ok(txforge::signer::transaction_id(bytes))
    }

    fn pending_status(&self, _tx_id: &str) -> txforge::error::Result<Option<PendingStatus>> {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        if polls < 3 {
            Ok(Some(PendingStatus::default()))
        } else {
            Ok(Some(PendingStatus {
                confirmed_round: 5_000_002,
                ..PendingStatus::default()
            }))
        }
    }

    fn current_round(&self) -> txforge::error::Result<u64> {
        Ok(5_000_000 + u64::from(self.polls.get()))
    }
}

fn example_tracking() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 4: Submission & Settlement Tracking");
    println!("--------------------------------------------");

    let signer = KeypairSigner::generate();
    let tx = PaymentBuilder::new()
        .sender(signer.address())
        .first_valid(5_000_000)
        .last_valid(5_000_010)
        .genesis_hash([9u8; 32])
        .receiver(Address::new([2u8; 32]))
        .amount(250_000u64)
        .fee(1000u64)
        .build()?;
    let signed = SignedTransaction::sign(tx, &signer)?;

    let node = ToyNode { polls: Cell::new(0) };
    let tracker = PendingTracker::with_backoff(
        &node,
        Backoff::new(Duration::from_millis(1), 2, Duration::from_millis(10)),
    );

    let (tx_id, outcome) = tracker.submit_and_wait(&signed)?;
    println!("✓ Submitted as {}", tx_id);
    match outcome {
        TxOutcome::Confirmed(confirmation) => {
            println!("  Confirmed in round {}", confirmation.round);
        }
        TxOutcome::Evicted { reason } => println!("  Evicted: {}", reason),
        other => println!("  Outcome: {:?}", other),
    }
    println!();

    Ok(())
}
