//! Decoded intention records.
//!
//! Field names are the ones the transaction builders accept, so a decoded record
//! can be fed back to rebuild an equivalent transaction.

use serde::{Deserialize, Serialize};

/// Top-level transaction category. Every DeFi intention is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    Other,
}

/// The result of decoding one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeResult {
    #[serde(rename = "txType")]
    pub tx_type: TxType,
    #[serde(flatten)]
    pub intention: Intention,
}

impl DecodeResult {
    pub fn new(intention: Intention) -> Self {
        Self {
            tx_type: TxType::Other,
            intention,
        }
    }
}

/// A decoded intention, keyed by operation sub-type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "intentionData")]
pub enum Intention {
    OpenAndAddLiquidity(OpenAndAddLiquidity),
    ProvideLiquidity(ProvideLiquidity),
    RemoveLiquidity(RemoveLiquidity),
    CollectRewards(CollectRewards),
    CollectFee(CollectFee),
    CreateReferralLink(CreateReferralLink),
    ClaimRevenueReferral(ClaimRevenueReferral),
    Repay(Repay),
}

impl Intention {
    /// Sub-type name, as serialized in `type`.
    pub fn sub_type(&self) -> &'static str {
        match self {
            Intention::OpenAndAddLiquidity(_) => "OpenAndAddLiquidity",
            Intention::ProvideLiquidity(_) => "ProvideLiquidity",
            Intention::RemoveLiquidity(_) => "RemoveLiquidity",
            Intention::CollectRewards(_) => "CollectRewards",
            Intention::CollectFee(_) => "CollectFee",
            Intention::CreateReferralLink(_) => "CreateReferralLink",
            Intention::ClaimRevenueReferral(_) => "ClaimRevenueReferral",
            Intention::Repay(_) => "Repay",
        }
    }

    /// Reward collections attached to this intention, if its kind carries them.
    pub fn collect_rewards(&self) -> Option<&[RewardCollection]> {
        match self {
            Intention::ProvideLiquidity(i) => Some(&i.collect_rewards),
            Intention::RemoveLiquidity(i) => Some(&i.collect_rewards),
            Intention::CollectRewards(i) => Some(&i.collect_rewards),
            Intention::CollectFee(i) => Some(&i.collect_rewards),
            _ => None,
        }
    }

    /// Scalar fields as `(name, display value)` pairs, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Intention::OpenAndAddLiquidity(i) => vec![
                ("pool", i.pool.clone()),
                ("lowerTick", i.lower_tick.to_string()),
                ("upperTick", i.upper_tick.to_string()),
                ("tokenAmount", i.token_amount.to_string()),
                ("maxAmountTokenA", i.max_amount_token_a.to_string()),
                ("maxAmountTokenB", i.max_amount_token_b.to_string()),
                ("isTokenAFixed", i.is_token_a_fixed.to_string()),
            ],
            Intention::ProvideLiquidity(i) => vec![
                ("pool", i.pool.clone()),
                ("position", i.position.clone()),
                ("tokenAmount", i.token_amount.to_string()),
                ("maxAmountTokenA", i.max_amount_token_a.to_string()),
                ("maxAmountTokenB", i.max_amount_token_b.to_string()),
                ("isTokenAFixed", i.is_token_a_fixed.to_string()),
            ],
            Intention::RemoveLiquidity(i) => vec![
                ("pool", i.pool.clone()),
                ("position", i.position.clone()),
                ("liquidity", i.liquidity.to_string()),
                ("maxAmountTokenA", i.max_amount_token_a.to_string()),
                ("maxAmountTokenB", i.max_amount_token_b.to_string()),
                ("transferTokensTo", i.transfer_tokens_to.clone()),
            ],
            Intention::CollectRewards(_) | Intention::CollectFee(_) => vec![],
            Intention::CreateReferralLink(_) => vec![],
            Intention::ClaimRevenueReferral(i) => vec![
                ("veScaKey", i.ve_sca_key.clone()),
                ("coins", i.coins.join(", ")),
            ],
            Intention::Repay(i) => vec![
                ("protocol", i.protocol.clone()),
                ("collateralType", i.collateral_type.clone()),
                ("amount", i.amount.to_string()),
            ],
        }
    }
}

/// One `collect_reward` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCollection {
    pub pool: String,
    pub position: String,
    pub reward_coin_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAndAddLiquidity {
    pub pool: String,
    pub lower_tick: i32,
    pub upper_tick: i32,
    #[serde(with = "decimal")]
    pub token_amount: u64,
    #[serde(with = "decimal")]
    pub max_amount_token_a: u64,
    #[serde(with = "decimal")]
    pub max_amount_token_b: u64,
    pub is_token_a_fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvideLiquidity {
    pub pool: String,
    pub position: String,
    #[serde(with = "decimal")]
    pub token_amount: u64,
    #[serde(with = "decimal")]
    pub max_amount_token_a: u64,
    #[serde(with = "decimal")]
    pub max_amount_token_b: u64,
    pub is_token_a_fixed: bool,
    pub collect_rewards: Vec<RewardCollection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLiquidity {
    pub pool: String,
    pub position: String,
    #[serde(with = "decimal")]
    pub liquidity: u128,
    #[serde(with = "decimal")]
    pub max_amount_token_a: u64,
    #[serde(with = "decimal")]
    pub max_amount_token_b: u64,
    pub transfer_tokens_to: String,
    pub collect_rewards: Vec<RewardCollection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRewards {
    pub collect_rewards: Vec<RewardCollection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectFee {
    pub collect_rewards: Vec<RewardCollection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReferralLink {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRevenueReferral {
    pub ve_sca_key: String,
    pub coins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repay {
    pub protocol: String,
    pub collateral_type: String,
    #[serde(with = "decimal")]
    pub amount: u64,
}

/// Integers carried as decimal strings, so 64/128-bit values survive JSON consumers.
mod decimal {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
