//! Declared argument layouts of the on-chain functions the decoder understands.
//!
//! Argument positions are a fixed contract of each function's signature. They
//! are written down once here, as a [`CallSchema`], and every extraction goes
//! through [`CallSchema::extract`].

use crate::decode::bcs;
use crate::decode::inputs::InputTable;
use crate::error::{Error, Result};
use crate::tx::MoveCall;
use tracing::trace;

/// How a field is encoded in the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Object reference, rendered as its id.
    Object,
    /// u32 on the wire, signed i32 value.
    Tick,
    U64,
    U128,
    Bool,
    Address,
}

/// One named field read from a fixed argument position.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub position: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, position: usize, kind: FieldKind) -> Self {
        Self {
            name,
            position,
            kind,
        }
    }
}

/// The argument layout of one on-chain function.
#[derive(Debug, Clone, Copy)]
pub struct CallSchema {
    pub function: &'static str,
    pub fields: &'static [FieldSpec],
}

impl CallSchema {
    /// Fewest arguments a call needs for every declared position to exist.
    pub fn min_arguments(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check `call` is long enough for this schema.
    pub fn validate(&self, call: &MoveCall) -> Result<()> {
        let needed = self.min_arguments();
        if call.arguments.len() < needed {
            return Err(Error::MalformedInput(format!(
                "{} expects at least {} arguments, got {}",
                self.function,
                needed,
                call.arguments.len()
            )));
        }
        Ok(())
    }

    /// Read every declared field of `call`.
    pub fn extract(&self, call: &MoveCall, inputs: &InputTable<'_>) -> Result<Fields> {
        self.validate(call)?;

        let values = self
            .fields
            .iter()
            .map(|spec| {
                read_field(spec, call, inputs)
                    .map(|value| (spec.name, value))
                    .map_err(|e| e.in_field(spec.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Fields {
            function: self.function,
            values,
        })
    }
}

fn read_field(spec: &FieldSpec, call: &MoveCall, inputs: &InputTable<'_>) -> Result<FieldValue> {
    trace!(function = %call.function, field = spec.name, position = spec.position, "reading field");
    let value = match spec.kind {
        FieldKind::Object => {
            FieldValue::ObjectId(inputs.call_object_id(call, spec.position)?.to_string())
        }
        FieldKind::Tick => {
            let raw = bcs::read_u32(inputs.call_pure_bytes(call, spec.position)?)?;
            FieldValue::Tick(bcs::tick_from_wire(raw))
        }
        FieldKind::U64 => FieldValue::U64(bcs::read_u64(
            inputs.call_pure_bytes(call, spec.position)?,
        )?),
        FieldKind::U128 => FieldValue::U128(bcs::read_u128(
            inputs.call_pure_bytes(call, spec.position)?,
        )?),
        FieldKind::Bool => FieldValue::Bool(bcs::read_bool(
            inputs.call_pure_bytes(call, spec.position)?,
        )?),
        FieldKind::Address => FieldValue::Address(bcs::read_address(
            inputs.call_pure_bytes(call, spec.position)?,
        )?),
    };
    Ok(value)
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    ObjectId(String),
    Tick(i32),
    U64(u64),
    U128(u128),
    Bool(bool),
    Address(String),
}

/// Fields extracted from one call, looked up by name.
#[derive(Debug, Clone)]
pub struct Fields {
    function: &'static str,
    values: Vec<(&'static str, FieldValue)>,
}

impl Fields {
    fn get(&self, name: &str) -> Result<&FieldValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                Error::MalformedInput(format!("{} declares no field '{}'", self.function, name))
            })
    }

    fn mismatch(&self, name: &str, expected: &str) -> Error {
        Error::MalformedInput(format!(
            "field '{}' of {} is not {}",
            name, self.function, expected
        ))
    }

    pub fn object_id(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            FieldValue::ObjectId(id) => Ok(id.clone()),
            _ => Err(self.mismatch(name, "an object")),
        }
    }

    pub fn tick(&self, name: &str) -> Result<i32> {
        match self.get(name)? {
            FieldValue::Tick(t) => Ok(*t),
            _ => Err(self.mismatch(name, "a tick")),
        }
    }

    pub fn u64(&self, name: &str) -> Result<u64> {
        match self.get(name)? {
            FieldValue::U64(v) => Ok(*v),
            _ => Err(self.mismatch(name, "a u64")),
        }
    }

    pub fn u128(&self, name: &str) -> Result<u128> {
        match self.get(name)? {
            FieldValue::U128(v) => Ok(*v),
            _ => Err(self.mismatch(name, "a u128")),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            FieldValue::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(name, "a bool")),
        }
    }

    pub fn address(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            FieldValue::Address(a) => Ok(a.clone()),
            _ => Err(self.mismatch(name, "an address")),
        }
    }
}
