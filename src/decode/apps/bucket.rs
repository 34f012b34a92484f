//! Bucket protocol debt repayment.
//!
//! The repaid amount is not an argument of the repay call itself: the call takes
//! a coin (or balance) produced earlier in the transaction. The decoder follows
//! that result back to the `SplitCoins` command that created it and reads the
//! pure amount there.

use crate::decode::bcs;
use crate::decode::classify::{CallIndex, CallTarget, PackageFilter, Registration};
use crate::decode::inputs::{InputTable, type_argument};
use crate::decode::intention::{Intention, Repay};
use crate::decode::schema::{CallSchema, FieldKind, FieldSpec};
use crate::error::{Error, Result};
use crate::tx::{Argument, Command, TransactionData};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Repay,
}

pub const REGISTRATIONS: &[Registration<Operation>] = &[Registration {
    target: CallTarget::qualified("buck", "repay_debt"),
    kind: Operation::Repay,
}];

const PRIORITY: &[Operation] = &[Operation::Repay];

impl Operation {
    pub fn intention(self) -> &'static str {
        match self {
            Operation::Repay => "Repay",
        }
    }
}

// repay_debt<Collateral>(protocol, buck_input, clock)
const REPAY_DEBT: CallSchema = CallSchema {
    function: "repay_debt",
    fields: &[FieldSpec::new("protocol", 0, FieldKind::Object)],
};

const REPAYMENT_ARG: usize = 1;

/// Decode a Bucket repay transaction.
pub fn decode(tx: &TransactionData, filter: &PackageFilter) -> Result<Intention> {
    let index = CallIndex::build(tx, REGISTRATIONS, filter);
    let inputs = InputTable::new(&tx.inputs);

    let Some(operation) = index.classify(PRIORITY) else {
        return Err(Error::UnrecognizedTransaction(
            "no Bucket repay call found".to_string(),
        ));
    };
    debug!(?operation, "classified Bucket transaction");

    match operation {
        Operation::Repay => {
            let call = index.require(operation, "repay_debt")?;
            let fields = REPAY_DEBT.extract(call, &inputs)?;
            let collateral_type =
                type_argument(call, 0).map_err(|e| e.in_field("collateralType"))?;
            let repayment = call.arguments.get(REPAYMENT_ARG).copied().ok_or_else(|| {
                Error::MalformedInput(format!(
                    "amount: repay_debt has no argument {}",
                    REPAYMENT_ARG
                ))
            })?;
            // Position of the repay call itself; the coin must come from before it
            let position = tx
                .commands
                .iter()
                .position(|c| c.as_move_call().is_some_and(|m| std::ptr::eq(m, call)))
                .unwrap_or(tx.commands.len());
            let amount = split_amount(tx, &inputs, repayment, position)
                .map_err(|e| e.in_field("amount"))?;

            Ok(Intention::Repay(Repay {
                protocol: fields.object_id("protocol")?,
                collateral_type: collateral_type.to_string(),
                amount,
            }))
        }
    }
}

/// Follow `arg` back to the `SplitCoins` amount that produced it.
///
/// Single-argument Move calls (such as `coin::into_balance`) are treated as
/// pass-through. Each step must point at a command before `bound`, the index of
/// the command consuming `arg`.
fn split_amount(
    tx: &TransactionData,
    inputs: &InputTable<'_>,
    arg: Argument,
    bound: usize,
) -> Result<u64> {
    let mut current = arg;
    let mut bound = bound;

    loop {
        let (cmd_index, element) = match current {
            Argument::Result(i) => (usize::from(i), None),
            Argument::NestedResult(i, j) => (usize::from(i), Some(usize::from(j))),
            other => {
                return Err(Error::MalformedInput(format!(
                    "repayment is {:?}, expected the result of an earlier command",
                    other
                )));
            }
        };
        if cmd_index >= bound {
            return Err(Error::MalformedInput(format!(
                "result reference to command {} does not point backwards",
                cmd_index
            )));
        }
        bound = cmd_index;
        trace!(cmd_index, ?element, "following repayment coin");

        match &tx.commands[cmd_index] {
            Command::SplitCoins(split) => {
                let amount = match (element, split.amounts.len()) {
                    (Some(j), _) => split.amounts.get(j),
                    (None, 1) => split.amounts.first(),
                    (None, _) => None,
                };
                return match amount {
                    Some(Argument::Input(idx)) => bcs::read_u64(inputs.pure_bytes(*idx)?),
                    Some(other) => Err(Error::MalformedInput(format!(
                        "split amount is {:?}, expected an input reference",
                        other
                    ))),
                    None => Err(Error::MalformedInput(format!(
                        "cannot pick a single amount from SplitCoins command {}",
                        cmd_index
                    ))),
                };
            }
            Command::MoveCall(call) if call.arguments.len() == 1 => {
                current = call.arguments[0];
            }
            other => {
                return Err(Error::MalformedInput(format!(
                    "repayment comes from {:?}, which is not a coin split",
                    other
                )));
            }
        }
    }
}
