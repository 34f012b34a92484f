//! Hand-built transactions for unit tests.

use crate::tx::{Argument, Command, Input, MoveCall, SplitCoins, TransactionData};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub fn u32_b64(value: u32) -> String {
    STANDARD.encode(value.to_le_bytes())
}

pub fn u64_b64(value: u64) -> String {
    STANDARD.encode(value.to_le_bytes())
}

/// Appends inputs and commands, handing back their indices.
#[derive(Debug, Default)]
pub struct TxBuilder {
    inputs: Vec<Input>,
    commands: Vec<Command>,
}

impl TxBuilder {
    pub fn object(&mut self, id: &str) -> u16 {
        self.push_input(Input::UnresolvedObject {
            object_id: id.to_string(),
        })
    }

    pub fn pure(&mut self, bytes: &str) -> u16 {
        self.push_input(Input::Pure {
            bytes: bytes.to_string(),
        })
    }

    fn push_input(&mut self, input: Input) -> u16 {
        self.inputs.push(input);
        (self.inputs.len() - 1) as u16
    }

    /// Move call whose arguments are all input references.
    pub fn call(
        &mut self,
        package: &str,
        module: &str,
        function: &str,
        type_arguments: &[&str],
        inputs: &[u16],
    ) -> u16 {
        let arguments = inputs.iter().copied().map(Argument::Input).collect();
        self.call_with(package, module, function, type_arguments, arguments)
    }

    pub fn call_with(
        &mut self,
        package: &str,
        module: &str,
        function: &str,
        type_arguments: &[&str],
        arguments: Vec<Argument>,
    ) -> u16 {
        self.push_command(Command::MoveCall(MoveCall {
            package: package.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: type_arguments.iter().map(|t| t.to_string()).collect(),
            arguments,
        }))
    }

    pub fn split_coins(&mut self, coin: Argument, amounts: &[u16]) -> u16 {
        self.push_command(Command::SplitCoins(SplitCoins {
            coin,
            amounts: amounts.iter().copied().map(Argument::Input).collect(),
        }))
    }

    fn push_command(&mut self, command: Command) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }

    pub fn build(self) -> TransactionData {
        TransactionData {
            sender: None,
            inputs: self.inputs,
            commands: self.commands,
        }
    }
}
