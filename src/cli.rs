//! CLI argument parsing for intent-decoder.

use crate::decode::{App, DecodeOptions, PackageFilter};
use crate::error::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Decode Sui programmable transactions into DeFi intentions.
///
/// Reads a transaction's data (inputs + commands, as serialized by the
/// transaction SDK) and reports which protocol operation it performs.
#[derive(Parser, Debug)]
#[command(
    name = "intent-decoder",
    version,
    about = "Decode Sui programmable transactions into DeFi intentions",
    after_help = r#"EXAMPLES:
    intent-decoder tx.json                     Decode, auto-detecting the app
    cat tx.json | intent-decoder               Read from stdin
    intent-decoder '{"inputs":[],"commands":[]}'
                                               Inline JSON document
    intent-decoder tx.json --app bluefin       Decode as one app only
    intent-decoder tx.json -p 0x3492...        Only count calls into this package
    intent-decoder tx.json --json              JSON output (builder-compatible)
    intent-decoder tx.json --check             Validate only (exit code)
    intent-decoder apps                        List supported operations

ENVIRONMENT:
    INTENT_DECODER_APP        Default for --app
    INTENT_DECODER_PACKAGES   Default for --package (comma-separated)
    INTENT_DECODER_LOG        Log filter (e.g. debug, intent_decoder=trace)"#
)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Transaction JSON file, or an inline JSON document. Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Decode as this app instead of trying each one.
    #[arg(long, short = 'a', value_enum, env = "INTENT_DECODER_APP")]
    pub app: Option<App>,

    /// Only consider Move calls into these packages.
    #[arg(
        long = "package",
        short = 'p',
        value_name = "ID",
        env = "INTENT_DECODER_PACKAGES",
        value_delimiter = ','
    )]
    pub packages: Vec<String>,

    /// Output as JSON.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Validate only (exit code indicates result: 0=decoded, 1=not decodable).
    #[arg(long, short = 'c')]
    pub check: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity on stderr (-v debug, -vv trace).
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every supported app operation and the call that identifies it.
    #[command(name = "apps")]
    Apps {
        /// Output as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },
}

/// Specifies how to obtain the transaction document.
#[derive(Debug, Clone)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
    /// JSON given directly on the command line.
    Inline(String),
}

impl Args {
    /// Resolve the positional argument into an input specification.
    pub fn input_spec(&self) -> InputSpec {
        match &self.input {
            None => InputSpec::Stdin,
            Some(s) if s == "-" => InputSpec::Stdin,
            Some(s) => InputSpec::detect(s),
        }
    }

    /// Decoder options from --app and --package.
    pub fn decode_options(&self) -> Result<DecodeOptions> {
        Ok(DecodeOptions {
            app: self.app,
            packages: PackageFilter::new(&self.packages)?,
        })
    }

    /// Default log directive implied by -v flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl InputSpec {
    /// Detect input type from a string argument.
    pub fn detect(s: &str) -> Self {
        // A JSON document always starts with an object
        if s.trim_start().starts_with('{') {
            return InputSpec::Inline(s.to_string());
        }

        InputSpec::File(PathBuf::from(s))
    }
}
