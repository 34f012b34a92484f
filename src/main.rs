//! intent-decoder - decode Sui programmable transactions into DeFi intentions.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = intent_decoder::Args::parse();

    // Disable colors if requested
    if args.no_color {
        colored::control::set_override(false);
    }

    init_logging(&args);

    // Run the main logic
    match intent_decoder::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error message
            eprintln!("{}: {}", "error".red(), e);

            // Return appropriate exit code
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr; INTENT_DECODER_LOG overrides the -v level.
fn init_logging(args: &intent_decoder::Args) {
    let filter = EnvFilter::try_from_env("INTENT_DECODER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color)
        .with_target(false)
        .init();
}
