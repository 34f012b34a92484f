//! Bluefin spot (concentrated liquidity) transactions.

use crate::decode::classify::{CallIndex, CallTarget, PackageFilter, Registration};
use crate::decode::inputs::{InputTable, type_argument};
use crate::decode::intention::{
    CollectFee, CollectRewards, Intention, OpenAndAddLiquidity, ProvideLiquidity, RemoveLiquidity,
    RewardCollection,
};
use crate::decode::schema::{CallSchema, FieldKind, FieldSpec};
use crate::error::{Error, Result};
use crate::tx::TransactionData;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    OpenPosition,
    ProvideLiquidity,
    RemoveLiquidity,
    CollectReward,
    CollectFee,
}

/// Published spot packages (base and current upgrade). Targets match on
/// function name only, so calls are restricted to these packages unless the
/// caller supplies its own package filter.
pub const PACKAGES: &[&str] = &[
    "0x3492c874c1e3b3e2984e8c41b589e642d4d0a5d6459e5a9cfc2d52fd7c89c267",
    "0x702301e7c6ca527a6f6a83f12c5edf2dcd6ec7a23fb5318ec86d88282eab7057",
];

pub const REGISTRATIONS: &[Registration<Operation>] = &[
    Registration {
        target: CallTarget::function("open_position"),
        kind: Operation::OpenPosition,
    },
    Registration {
        target: CallTarget::function("provide_liquidity_with_fixed_amount"),
        kind: Operation::ProvideLiquidity,
    },
    Registration {
        target: CallTarget::function("remove_liquidity"),
        kind: Operation::RemoveLiquidity,
    },
    Registration {
        target: CallTarget::function("collect_reward"),
        kind: Operation::CollectReward,
    },
    Registration {
        target: CallTarget::function("collect_fee"),
        kind: Operation::CollectFee,
    },
];

const PRIORITY: &[Operation] = &[
    Operation::OpenPosition,
    Operation::ProvideLiquidity,
    Operation::RemoveLiquidity,
    Operation::CollectReward,
    Operation::CollectFee,
];

impl Operation {
    /// Intention sub-type produced when this operation classifies the transaction.
    pub fn intention(self) -> &'static str {
        match self {
            Operation::OpenPosition => "OpenAndAddLiquidity",
            Operation::ProvideLiquidity => "ProvideLiquidity",
            Operation::RemoveLiquidity => "RemoveLiquidity",
            Operation::CollectReward => "CollectRewards",
            Operation::CollectFee => "CollectFee",
        }
    }
}

// open_position(config, pool, lower_tick_bits, upper_tick_bits)
const OPEN_POSITION: CallSchema = CallSchema {
    function: "open_position",
    fields: &[
        FieldSpec::new("pool", 1, FieldKind::Object),
        FieldSpec::new("lowerTick", 2, FieldKind::Tick),
        FieldSpec::new("upperTick", 3, FieldKind::Tick),
    ],
};

// provide_liquidity_with_fixed_amount(clock, config, pool, position, coin_a, coin_b,
//     amount, coin_a_max, coin_b_max, is_fixed_a)
const PROVIDE_LIQUIDITY: CallSchema = CallSchema {
    function: "provide_liquidity_with_fixed_amount",
    fields: &[
        FieldSpec::new("pool", 2, FieldKind::Object),
        FieldSpec::new("position", 3, FieldKind::Object),
        FieldSpec::new("tokenAmount", 6, FieldKind::U64),
        FieldSpec::new("maxAmountTokenA", 7, FieldKind::U64),
        FieldSpec::new("maxAmountTokenB", 8, FieldKind::U64),
        FieldSpec::new("isTokenAFixed", 9, FieldKind::Bool),
    ],
};

// The amount fields alone. When opening a position in the same transaction the
// position argument is the open_position result, not an input.
const PROVIDE_AMOUNTS: CallSchema = CallSchema {
    function: "provide_liquidity_with_fixed_amount",
    fields: &[
        FieldSpec::new("tokenAmount", 6, FieldKind::U64),
        FieldSpec::new("maxAmountTokenA", 7, FieldKind::U64),
        FieldSpec::new("maxAmountTokenB", 8, FieldKind::U64),
        FieldSpec::new("isTokenAFixed", 9, FieldKind::Bool),
    ],
};

// remove_liquidity(clock, config, pool, position, liquidity, min_a, min_b, destination)
const REMOVE_LIQUIDITY: CallSchema = CallSchema {
    function: "remove_liquidity",
    fields: &[
        FieldSpec::new("pool", 2, FieldKind::Object),
        FieldSpec::new("position", 3, FieldKind::Object),
        FieldSpec::new("liquidity", 4, FieldKind::U128),
        FieldSpec::new("maxAmountTokenA", 5, FieldKind::U64),
        FieldSpec::new("maxAmountTokenB", 6, FieldKind::U64),
        FieldSpec::new("transferTokensTo", 7, FieldKind::Address),
    ],
};

// collect_reward<CoinA, CoinB, Reward>(config, pool, position, ...)
const COLLECT_REWARD: CallSchema = CallSchema {
    function: "collect_reward",
    fields: &[
        FieldSpec::new("pool", 1, FieldKind::Object),
        FieldSpec::new("position", 2, FieldKind::Object),
    ],
};

const REWARD_COIN_TYPE_ARG: usize = 2;

/// Decode a Bluefin spot transaction.
pub fn decode(tx: &TransactionData, filter: &PackageFilter) -> Result<Intention> {
    let default_scope;
    let filter = if filter.is_empty() {
        default_scope = PackageFilter::new(PACKAGES)?;
        &default_scope
    } else {
        filter
    };
    let index = CallIndex::build(tx, REGISTRATIONS, filter);
    let inputs = InputTable::new(&tx.inputs);

    let Some(operation) = index.classify(PRIORITY) else {
        return Err(Error::UnrecognizedTransaction(
            "no Bluefin spot call found".to_string(),
        ));
    };
    debug!(?operation, "classified Bluefin transaction");

    match operation {
        Operation::OpenPosition => {
            let open = OPEN_POSITION.extract(index.require(operation, "open_position")?, &inputs)?;
            let add = PROVIDE_AMOUNTS.extract(
                index.require(Operation::ProvideLiquidity, "provide_liquidity_with_fixed_amount")?,
                &inputs,
            )?;
            Ok(Intention::OpenAndAddLiquidity(OpenAndAddLiquidity {
                pool: open.object_id("pool")?,
                lower_tick: open.tick("lowerTick")?,
                upper_tick: open.tick("upperTick")?,
                token_amount: add.u64("tokenAmount")?,
                max_amount_token_a: add.u64("maxAmountTokenA")?,
                max_amount_token_b: add.u64("maxAmountTokenB")?,
                is_token_a_fixed: add.bool("isTokenAFixed")?,
            }))
        }
        Operation::ProvideLiquidity => {
            let add = PROVIDE_LIQUIDITY.extract(
                index.require(operation, "provide_liquidity_with_fixed_amount")?,
                &inputs,
            )?;
            Ok(Intention::ProvideLiquidity(ProvideLiquidity {
                pool: add.object_id("pool")?,
                position: add.object_id("position")?,
                token_amount: add.u64("tokenAmount")?,
                max_amount_token_a: add.u64("maxAmountTokenA")?,
                max_amount_token_b: add.u64("maxAmountTokenB")?,
                is_token_a_fixed: add.bool("isTokenAFixed")?,
                collect_rewards: reward_collections(&index, &inputs)?,
            }))
        }
        Operation::RemoveLiquidity => {
            let remove =
                REMOVE_LIQUIDITY.extract(index.require(operation, "remove_liquidity")?, &inputs)?;
            Ok(Intention::RemoveLiquidity(RemoveLiquidity {
                pool: remove.object_id("pool")?,
                position: remove.object_id("position")?,
                liquidity: remove.u128("liquidity")?,
                max_amount_token_a: remove.u64("maxAmountTokenA")?,
                max_amount_token_b: remove.u64("maxAmountTokenB")?,
                transfer_tokens_to: remove.address("transferTokensTo")?,
                collect_rewards: reward_collections(&index, &inputs)?,
            }))
        }
        Operation::CollectReward => Ok(Intention::CollectRewards(CollectRewards {
            collect_rewards: reward_collections(&index, &inputs)?,
        })),
        Operation::CollectFee => Ok(Intention::CollectFee(CollectFee {
            collect_rewards: reward_collections(&index, &inputs)?,
        })),
    }
}

/// One record per `collect_reward` call, in stream order.
fn reward_collections(
    index: &CallIndex<'_, Operation>,
    inputs: &InputTable<'_>,
) -> Result<Vec<RewardCollection>> {
    index
        .all(Operation::CollectReward)
        .iter()
        .map(|call| {
            let fields = COLLECT_REWARD.extract(call, inputs)?;
            let reward_coin_type = type_argument(call, REWARD_COIN_TYPE_ARG)
                .map_err(|e| e.in_field("rewardCoinType"))?;
            Ok(RewardCollection {
                pool: fields.object_id("pool")?,
                position: fields.object_id("position")?,
                reward_coin_type: reward_coin_type.to_string(),
            })
        })
        .collect()
}
