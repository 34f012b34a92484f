//! Commands and their arguments.

use serde::Deserialize;

/// One command of the programmable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CommandRepr")]
pub enum Command {
    /// A call into a Move function.
    MoveCall(MoveCall),
    /// Split amounts off a coin.
    SplitCoins(SplitCoins),
    /// Any other command kind; kept only so result indices stay aligned.
    Other { kind: String },
}

impl Command {
    /// The Move call carried by this command, if it is one.
    pub fn as_move_call(&self) -> Option<&MoveCall> {
        match self {
            Command::MoveCall(call) => Some(call),
            _ => None,
        }
    }
}

/// A call into `package::module::function`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// Fully qualified target, `package::module::function`.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// `SplitCoins` payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SplitCoins {
    pub coin: Argument,
    #[serde(default)]
    pub amounts: Vec<Argument>,
}

/// A command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ArgumentRepr")]
pub enum Argument {
    /// The gas coin.
    GasCoin,
    /// Entry of the input table.
    Input(u16),
    /// Result of an earlier command.
    Result(u16),
    /// One element of an earlier command's tuple result.
    NestedResult(u16, u16),
}

/// Wire shape of a command: `{"$kind": "MoveCall", "MoveCall": {...}}`.
#[derive(Deserialize)]
struct CommandRepr {
    #[serde(rename = "$kind")]
    kind: Option<String>,
    #[serde(rename = "MoveCall")]
    move_call: Option<MoveCall>,
    #[serde(rename = "SplitCoins")]
    split_coins: Option<SplitCoins>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl From<CommandRepr> for Command {
    fn from(repr: CommandRepr) -> Self {
        if let Some(call) = repr.move_call {
            return Command::MoveCall(call);
        }
        if let Some(split) = repr.split_coins {
            return Command::SplitCoins(split);
        }

        // Without a $kind the payload key names the command
        let kind = repr
            .kind
            .or_else(|| repr.rest.keys().next().cloned())
            .unwrap_or_else(|| "Unknown".to_string());
        Command::Other { kind }
    }
}

/// Wire shape of an argument: `{"$kind": "Input", "Input": 3, "type": "pure"}`.
#[derive(Deserialize)]
struct ArgumentRepr {
    #[serde(rename = "GasCoin")]
    gas_coin: Option<bool>,
    #[serde(rename = "Input")]
    input: Option<u16>,
    #[serde(rename = "Result")]
    result: Option<u16>,
    #[serde(rename = "NestedResult")]
    nested_result: Option<(u16, u16)>,
}

impl TryFrom<ArgumentRepr> for Argument {
    type Error = String;

    fn try_from(repr: ArgumentRepr) -> Result<Self, Self::Error> {
        match repr {
            ArgumentRepr {
                input: Some(idx), ..
            } => Ok(Argument::Input(idx)),
            ArgumentRepr {
                result: Some(idx), ..
            } => Ok(Argument::Result(idx)),
            ArgumentRepr {
                nested_result: Some((cmd, idx)),
                ..
            } => Ok(Argument::NestedResult(cmd, idx)),
            ArgumentRepr {
                gas_coin: Some(_), ..
            } => Ok(Argument::GasCoin),
            _ => Err("argument must be one of GasCoin, Input, Result or NestedResult".to_string()),
        }
    }
}
