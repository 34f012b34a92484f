//! Scallop referral transactions.
//!
//! The placeholder-key mint lives in the veSCA package while revenue claims live
//! in the referral package, so both targets are module-qualified.

use crate::decode::classify::{CallIndex, CallTarget, PackageFilter, Registration};
use crate::decode::inputs::{InputTable, type_argument};
use crate::decode::intention::{ClaimRevenueReferral, CreateReferralLink, Intention};
use crate::decode::schema::{CallSchema, FieldKind, FieldSpec};
use crate::error::{Error, Result};
use crate::tx::TransactionData;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    MintPlaceholderKey,
    ClaimRevenue,
}

pub const REGISTRATIONS: &[Registration<Operation>] = &[
    Registration {
        target: CallTarget::qualified("ve_sca", "mint_ve_sca_placeholder_key"),
        kind: Operation::MintPlaceholderKey,
    },
    Registration {
        target: CallTarget::qualified("referral_revenue_pool", "claim_revenue_with_ve_sca_key"),
        kind: Operation::ClaimRevenue,
    },
];

const PRIORITY: &[Operation] = &[Operation::MintPlaceholderKey, Operation::ClaimRevenue];

impl Operation {
    pub fn intention(self) -> &'static str {
        match self {
            Operation::MintPlaceholderKey => "CreateReferralLink",
            Operation::ClaimRevenue => "ClaimRevenueReferral",
        }
    }
}

// claim_revenue_with_ve_sca_key<Coin>(version, revenue_pool, ve_sca_key, clock)
const CLAIM_REVENUE: CallSchema = CallSchema {
    function: "claim_revenue_with_ve_sca_key",
    fields: &[FieldSpec::new("veScaKey", 2, FieldKind::Object)],
};

/// Decode a Scallop referral transaction.
pub fn decode(tx: &TransactionData, filter: &PackageFilter) -> Result<Intention> {
    let index = CallIndex::build(tx, REGISTRATIONS, filter);
    let inputs = InputTable::new(&tx.inputs);

    let Some(operation) = index.classify(PRIORITY) else {
        return Err(Error::UnrecognizedTransaction(
            "no Scallop referral call found".to_string(),
        ));
    };
    debug!(?operation, "classified Scallop referral transaction");

    match operation {
        Operation::MintPlaceholderKey => Ok(Intention::CreateReferralLink(CreateReferralLink {})),
        Operation::ClaimRevenue => {
            let first = index.require(operation, "claim_revenue_with_ve_sca_key")?;
            let key = CLAIM_REVENUE.extract(first, &inputs)?;
            // One claim per revenue coin; the coin is the call's only type argument
            let coins = index
                .all(operation)
                .iter()
                .map(|call| {
                    type_argument(call, 0)
                        .map(str::to_string)
                        .map_err(|e| e.in_field("coins"))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Intention::ClaimRevenueReferral(ClaimRevenueReferral {
                ve_sca_key: key.object_id("veScaKey")?,
                coins,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testing::TxBuilder;

    const VE_SCA_PKG: &str = "0xcfe2";
    const REFERRAL_PKG: &str = "0x5658";

    fn claim(b: &mut TxBuilder, key: &str, coin: &str) {
        let version = b.object("0xversion");
        let pool = b.object("0xrevenuepool");
        let key = b.object(key);
        let clock = b.object("0x6");
        b.call(
            REFERRAL_PKG,
            "referral_revenue_pool",
            "claim_revenue_with_ve_sca_key",
            &[coin],
            &[version, pool, key, clock],
        );
    }

    #[test]
    fn test_create_referral_link() {
        let mut b = TxBuilder::default();
        b.call(VE_SCA_PKG, "ve_sca", "mint_ve_sca_placeholder_key", &[], &[]);
        let tx = b.build();

        let intention = decode(&tx, &PackageFilter::default()).unwrap();
        assert_eq!(intention, Intention::CreateReferralLink(CreateReferralLink {}));
    }

    #[test]
    fn test_claim_revenue_collects_every_coin() {
        let mut b = TxBuilder::default();
        claim(&mut b, "0xkey", "0x2::sui::SUI");
        claim(&mut b, "0xkey", "0x7016::sca::SCA");
        let tx = b.build();

        let intention = decode(&tx, &PackageFilter::default()).unwrap();
        assert_eq!(
            intention,
            Intention::ClaimRevenueReferral(ClaimRevenueReferral {
                ve_sca_key: "0xkey".into(),
                coins: vec!["0x2::sui::SUI".into(), "0x7016::sca::SCA".into()],
            })
        );
    }

    #[test]
    fn test_function_name_in_other_module_is_ignored() {
        let mut b = TxBuilder::default();
        b.call(VE_SCA_PKG, "other", "mint_ve_sca_placeholder_key", &[], &[]);
        let tx = b.build();

        assert!(decode(&tx, &PackageFilter::default()).unwrap_err().is_unrecognized());
    }

    #[test]
    fn test_mint_takes_priority_over_claim() {
        let mut b = TxBuilder::default();
        claim(&mut b, "0xkey", "0x2::sui::SUI");
        b.call(VE_SCA_PKG, "ve_sca", "mint_ve_sca_placeholder_key", &[], &[]);
        let tx = b.build();

        let intention = decode(&tx, &PackageFilter::default()).unwrap();
        assert_eq!(intention.sub_type(), "CreateReferralLink");
    }

    #[test]
    fn test_claim_with_pure_key_is_malformed() {
        let mut b = TxBuilder::default();
        let version = b.object("0xversion");
        let pool = b.object("0xrevenuepool");
        let key = b.pure("AQ==");
        b.call(
            REFERRAL_PKG,
            "referral_revenue_pool",
            "claim_revenue_with_ve_sca_key",
            &["0x2::sui::SUI"],
            &[version, pool, key],
        );
        let tx = b.build();

        let err = decode(&tx, &PackageFilter::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("veScaKey"));
    }
}
