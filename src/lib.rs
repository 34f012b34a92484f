//! intent-decoder - recover DeFi intentions from Sui programmable transactions.
//!
//! A multisig wallet shows co-signers what a transaction does before they sign.
//! This crate reads a transaction's command stream and input table and
//! recognizes the protocol operation it performs: adding or removing
//! concentrated liquidity, collecting rewards, claiming referral revenue,
//! repaying debt.
//!
//! # Features
//!
//! - Read transaction JSON from a file, inline, or stdin
//! - Single-pass classification against per-app call registrations
//! - Typed BCS field reads (u32/u64/u128, bool, address, signed ticks)
//! - Builder-compatible JSON output, or pretty terminal tables
//! - Validation mode with exit codes

pub mod cli;
pub mod decode;
pub mod error;
pub mod format;
pub mod input;
pub mod tx;

pub use cli::Args;
pub use decode::{DecodeOptions, DecodeResult, decode};
pub use error::{Error, Result};

use cli::Command;
use decode::App;
use format::{format_operations, format_output};
use input::read_input;
use tracing::info;
use tx::parse_transaction;

/// Run intent-decoder with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    if let Some(Command::Apps { json }) = &args.command {
        let ops: Vec<_> = App::ALL.into_iter().flat_map(App::operations).collect();
        println!("{}", format_operations(&ops, *json)?);
        return Ok(());
    }

    let options = args.decode_options()?;

    // Read and parse the transaction document
    let text = read_input(&args.input_spec())?;
    let tx = parse_transaction(&text)?;
    info!(
        sender = tx.sender.as_deref().unwrap_or("-"),
        inputs = tx.inputs.len(),
        commands = tx.commands.len(),
        "parsed transaction"
    );

    // Decode the intention
    let result = decode(&tx, &options)?;

    // Check mode: just validate and exit
    if args.check {
        return Ok(());
    }

    let output = format_output(&result, args)?;
    println!("{}", output);

    Ok(())
}
