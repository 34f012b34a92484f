//! Resolving command arguments through the input table.

use crate::error::{Error, Result};
use crate::tx::{Argument, Input, MoveCall};

/// Read-only view over a transaction's input table.
#[derive(Debug, Clone, Copy)]
pub struct InputTable<'a> {
    inputs: &'a [Input],
}

impl<'a> InputTable<'a> {
    pub fn new(inputs: &'a [Input]) -> Self {
        Self { inputs }
    }

    /// Entry at `index`, or `MalformedInput` when out of bounds.
    pub fn get(&self, index: u16) -> Result<&'a Input> {
        self.inputs.get(usize::from(index)).ok_or_else(|| {
            Error::MalformedInput(format!(
                "input index {} out of bounds ({} inputs)",
                index,
                self.inputs.len()
            ))
        })
    }

    /// Object id stored at `index`.
    pub fn object_id(&self, index: u16) -> Result<&'a str> {
        match self.get(index)? {
            Input::UnresolvedObject { object_id } | Input::Object { object_id } => Ok(object_id),
            other => Err(Error::MalformedInput(format!(
                "input {} is {}, expected an object",
                index,
                other.kind()
            ))),
        }
    }

    /// Base64 blob stored at `index`.
    pub fn pure_bytes(&self, index: u16) -> Result<&'a str> {
        match self.get(index)? {
            Input::Pure { bytes } => Ok(bytes),
            other => Err(Error::MalformedInput(format!(
                "input {} is {}, expected a pure value",
                index,
                other.kind()
            ))),
        }
    }

    /// Object id referenced by argument `position` of `call`.
    pub fn call_object_id(&self, call: &MoveCall, position: usize) -> Result<&'a str> {
        self.object_id(input_index(call, position)?)
    }

    /// Pure blob referenced by argument `position` of `call`.
    pub fn call_pure_bytes(&self, call: &MoveCall, position: usize) -> Result<&'a str> {
        self.pure_bytes(input_index(call, position)?)
    }
}

/// Input-table index referenced by argument `position` of `call`.
///
/// Fails when the call has fewer arguments, or when the argument is not an input reference.
pub fn input_index(call: &MoveCall, position: usize) -> Result<u16> {
    match call.arguments.get(position) {
        Some(Argument::Input(index)) => Ok(*index),
        Some(other) => Err(Error::MalformedInput(format!(
            "argument {} of {} is {:?}, expected an input reference",
            position, call.function, other
        ))),
        None => Err(Error::MalformedInput(format!(
            "{} has no argument {} ({} arguments)",
            call.function,
            position,
            call.arguments.len()
        ))),
    }
}

/// Type argument `position` of `call`.
pub fn type_argument(call: &MoveCall, position: usize) -> Result<&str> {
    call.type_arguments
        .get(position)
        .map(String::as_str)
        .ok_or_else(|| {
            Error::MalformedInput(format!(
                "{} has no type argument {} ({} type arguments)",
                call.function,
                position,
                call.type_arguments.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> Vec<Input> {
        vec![
            Input::UnresolvedObject {
                object_id: "0xpool".into(),
            },
            Input::Pure {
                bytes: "AQ==".into(),
            },
            Input::Object {
                object_id: "0xshared".into(),
            },
            Input::Other {
                kind: "UnresolvedPure".into(),
            },
        ]
    }

    fn call(arguments: Vec<Argument>) -> MoveCall {
        MoveCall {
            package: "0x1".into(),
            module: "m".into(),
            function: "f".into(),
            type_arguments: vec!["0x2::sui::SUI".into()],
            arguments,
        }
    }

    #[test]
    fn test_object_and_pure_lookup() {
        let inputs = inputs();
        let table = InputTable::new(&inputs);
        assert_eq!(table.object_id(0).unwrap(), "0xpool");
        assert_eq!(table.object_id(2).unwrap(), "0xshared");
        assert_eq!(table.pure_bytes(1).unwrap(), "AQ==");
    }

    #[test]
    fn test_out_of_bounds() {
        let inputs = inputs();
        let table = InputTable::new(&inputs);
        let err = table.get(4).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_kind_mismatch() {
        let inputs = inputs();
        let table = InputTable::new(&inputs);
        assert!(matches!(table.object_id(1), Err(Error::MalformedInput(_))));
        assert!(matches!(table.pure_bytes(0), Err(Error::MalformedInput(_))));
        assert!(matches!(table.pure_bytes(3), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_call_argument_resolution() {
        let inputs = inputs();
        let table = InputTable::new(&inputs);
        let call = call(vec![Argument::Input(0), Argument::Input(1), Argument::Result(0)]);

        assert_eq!(table.call_object_id(&call, 0).unwrap(), "0xpool");
        assert_eq!(table.call_pure_bytes(&call, 1).unwrap(), "AQ==");
        // Result reference where an input is expected
        assert!(matches!(
            table.call_pure_bytes(&call, 2),
            Err(Error::MalformedInput(_))
        ));
        // Missing argument position
        assert!(matches!(input_index(&call, 3), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_type_argument() {
        let call = call(vec![]);
        assert_eq!(type_argument(&call, 0).unwrap(), "0x2::sui::SUI");
        assert!(matches!(type_argument(&call, 2), Err(Error::MalformedInput(_))));
    }
}
