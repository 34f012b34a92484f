//! Input table entries.

use serde::Deserialize;

/// One entry of the input table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "InputRepr")]
pub enum Input {
    /// Inline value, base64 of its BCS bytes.
    Pure { bytes: String },
    /// Object referenced by id only; version and digest are resolved later.
    UnresolvedObject { object_id: String },
    /// Fully resolved object reference (owned, shared or receiving).
    Object { object_id: String },
    /// Any other entry kind, such as an unresolved pure value.
    Other { kind: String },
}

impl Input {
    /// Short name of the entry kind, for error messages.
    pub fn kind(&self) -> &str {
        match self {
            Input::Pure { .. } => "Pure",
            Input::UnresolvedObject { .. } => "UnresolvedObject",
            Input::Object { .. } => "Object",
            Input::Other { kind } => kind,
        }
    }
}

#[derive(Deserialize)]
struct InputRepr {
    #[serde(rename = "$kind")]
    kind: Option<String>,
    #[serde(rename = "Pure")]
    pure: Option<PureRepr>,
    #[serde(rename = "UnresolvedObject")]
    unresolved_object: Option<ObjectIdRepr>,
    #[serde(rename = "Object")]
    object: Option<ObjectArgRepr>,
}

#[derive(Deserialize)]
struct PureRepr {
    bytes: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectIdRepr {
    object_id: String,
}

#[derive(Deserialize)]
struct ObjectArgRepr {
    #[serde(rename = "ImmOrOwnedObject")]
    imm_or_owned: Option<ObjectIdRepr>,
    #[serde(rename = "SharedObject")]
    shared: Option<ObjectIdRepr>,
    #[serde(rename = "Receiving")]
    receiving: Option<ObjectIdRepr>,
}

impl From<InputRepr> for Input {
    fn from(repr: InputRepr) -> Self {
        if let Some(pure) = repr.pure {
            return Input::Pure { bytes: pure.bytes };
        }
        if let Some(obj) = repr.unresolved_object {
            return Input::UnresolvedObject {
                object_id: obj.object_id,
            };
        }
        if let Some(obj) = repr
            .object
            .and_then(|o| o.imm_or_owned.or(o.shared).or(o.receiving))
        {
            return Input::Object {
                object_id: obj.object_id,
            };
        }
        Input::Other {
            kind: repr.kind.unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}
