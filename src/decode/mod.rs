//! Transaction decoding: from a command stream to a DeFi intention.

pub mod apps;
pub mod bcs;
pub mod classify;
pub mod inputs;
pub mod intention;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use apps::{App, OperationInfo};
pub use bcs::ScalarType;
pub use classify::PackageFilter;
pub use intention::{DecodeResult, Intention, RewardCollection};

use crate::error::{Error, Result};
use crate::tx::TransactionData;
use tracing::debug;

/// What to decode against.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Decode as this app only; `None` tries every app in [`App::ALL`] order.
    pub app: Option<App>,
    /// Package allowlist applied to every app.
    pub packages: PackageFilter,
}

/// Decode a transaction into its intention.
///
/// All-or-nothing: any malformed field fails the whole decode.
pub fn decode(tx: &TransactionData, options: &DecodeOptions) -> Result<DecodeResult> {
    if let Some(app) = options.app {
        return app.decode(tx, &options.packages).map(DecodeResult::new);
    }

    for app in App::ALL {
        match app.decode(tx, &options.packages) {
            Ok(intention) => {
                debug!(app = app.as_str(), kind = intention.sub_type(), "decoded transaction");
                return Ok(DecodeResult::new(intention));
            }
            Err(e) if e.is_unrecognized() => {
                debug!(app = app.as_str(), "not recognized, trying next app");
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::UnrecognizedTransaction(
        "no supported app call found in the command stream".to_string(),
    ))
}
