//! Supported DeFi apps.

pub mod bluefin;
pub mod bucket;
pub mod scallop;

use crate::decode::classify::{PackageFilter, Registration};
use crate::decode::intention::Intention;
use crate::error::Result;
use crate::tx::TransactionData;
use clap::ValueEnum;
use serde::Serialize;

/// A protocol whose transactions can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum App {
    /// Bluefin spot concentrated-liquidity pools.
    Bluefin,
    /// Scallop lending referral program.
    ScallopReferral,
    /// Bucket protocol CDPs.
    Bucket,
}

/// A registered call target, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub app: App,
    pub target: String,
    pub intention: &'static str,
}

impl App {
    /// Detection order when no app is given.
    pub const ALL: [App; 3] = [App::Bluefin, App::ScallopReferral, App::Bucket];

    pub fn as_str(&self) -> &'static str {
        match self {
            App::Bluefin => "bluefin",
            App::ScallopReferral => "scallop-referral",
            App::Bucket => "bucket",
        }
    }

    /// Classify and extract `tx` as a transaction of this app.
    pub fn decode(self, tx: &TransactionData, filter: &PackageFilter) -> Result<Intention> {
        match self {
            App::Bluefin => bluefin::decode(tx, filter),
            App::ScallopReferral => scallop::decode(tx, filter),
            App::Bucket => bucket::decode(tx, filter),
        }
    }

    /// Every call target this app recognizes, with the intention it yields.
    pub fn operations(self) -> Vec<OperationInfo> {
        fn list<K: Copy>(
            app: App,
            table: &[Registration<K>],
            intention: impl Fn(K) -> &'static str,
        ) -> Vec<OperationInfo> {
            table
                .iter()
                .map(|r| OperationInfo {
                    app,
                    target: r.target.display(),
                    intention: intention(r.kind),
                })
                .collect()
        }

        match self {
            App::Bluefin => list(self, bluefin::REGISTRATIONS, bluefin::Operation::intention),
            App::ScallopReferral => {
                list(self, scallop::REGISTRATIONS, scallop::Operation::intention)
            }
            App::Bucket => list(self, bucket::REGISTRATIONS, bucket::Operation::intention),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_listing() {
        let ops = App::Bluefin.operations();
        assert_eq!(ops.len(), 5);
        assert_eq!(ops[0].target, "*::open_position");
        assert_eq!(ops[0].intention, "OpenAndAddLiquidity");

        let ops = App::ScallopReferral.operations();
        assert_eq!(ops[1].target, "referral_revenue_pool::claim_revenue_with_ve_sca_key");

        assert_eq!(App::Bucket.operations()[0].intention, "Repay");
    }

    #[test]
    fn test_app_names() {
        for app in App::ALL {
            assert_eq!(App::from_str(app.as_str(), false).unwrap(), app);
        }
    }
}
