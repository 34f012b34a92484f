//! Output formatting module.

mod json;
mod pretty;

use crate::cli::Args;
use crate::decode::{DecodeResult, OperationInfo};
use crate::error::Result;

pub use json::{format_json, format_operations_json};
pub use pretty::{format_operations_pretty, format_pretty};

/// Format a decode result according to the output flags.
pub fn format_output(result: &DecodeResult, args: &Args) -> Result<String> {
    if args.json {
        format_json(result)
    } else {
        format_pretty(result, args)
    }
}

/// Format the list of supported operations.
pub fn format_operations(ops: &[OperationInfo], json: bool) -> Result<String> {
    if json {
        format_operations_json(ops)
    } else {
        format_operations_pretty(ops)
    }
}
