//! Programmable transaction model: the command stream and its input table.

mod command;
mod input;

pub use command::{Argument, Command, MoveCall, SplitCoins};
pub use input::Input;

use crate::error::Result;
use serde::Deserialize;

/// The data of one programmable transaction, as serialized by the transaction-model SDK.
///
/// Only the parts the decoder reads are modelled; gas data, expiration and the like are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionData {
    /// Sender address, when the document carries one.
    #[serde(default)]
    pub sender: Option<String>,
    /// Input table, referenced by index from command arguments.
    #[serde(default)]
    pub inputs: Vec<Input>,
    /// Ordered command stream.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl TransactionData {
    /// Iterate over the Move calls of the command stream, in order.
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(Command::as_move_call)
    }
}

/// Parse a transaction document from JSON text.
pub fn parse_transaction(text: &str) -> Result<TransactionData> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sdk_document() {
        let doc = r#"{
            "version": 2,
            "sender": "0x1",
            "expiration": null,
            "gasData": {"budget": null, "price": null, "owner": null, "payment": null},
            "inputs": [
                {"$kind": "UnresolvedObject", "UnresolvedObject": {"objectId": "0xabc"}},
                {"$kind": "Pure", "Pure": {"bytes": "AQ=="}}
            ],
            "commands": [
                {"$kind": "MoveCall", "MoveCall": {
                    "package": "0x2", "module": "pool", "function": "open_position",
                    "typeArguments": ["0x2::sui::SUI"],
                    "arguments": [{"$kind": "Input", "Input": 0, "type": "object"}, {"$kind": "Input", "Input": 1, "type": "pure"}]
                }},
                {"$kind": "TransferObjects", "TransferObjects": {"objects": [], "address": {"$kind": "Input", "Input": 1}}}
            ]
        }"#;

        let tx = parse_transaction(doc).unwrap();
        assert_eq!(tx.sender.as_deref(), Some("0x1"));
        assert_eq!(tx.inputs.len(), 2);
        assert_eq!(tx.commands.len(), 2);
        assert_eq!(tx.move_calls().count(), 1);
        assert!(matches!(&tx.commands[1], Command::Other { kind } if kind == "TransferObjects"));
    }

    #[test]
    fn test_parse_empty_document() {
        let tx = parse_transaction("{}").unwrap();
        assert!(tx.inputs.is_empty());
        assert!(tx.commands.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_transaction("{not json");
        assert!(matches!(result, Err(crate::Error::InvalidJson(_))));
    }
}
