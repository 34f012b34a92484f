//! Fixed-width scalar reads from base64-encoded BCS blobs.
//!
//! Pure inputs carry their value as the base64 of its BCS encoding. Integers are
//! little-endian with no length prefix, booleans are a single `0`/`1` byte and
//! addresses are 32 raw bytes.

use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use tracing::trace;

/// Length of an on-chain address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Scalar types a pure input can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    U32,
    U64,
    U128,
    Bool,
    Address,
}

impl ScalarType {
    /// Encoded width in bytes.
    pub fn width(self) -> usize {
        match self {
            ScalarType::U32 => 4,
            ScalarType::U64 => 8,
            ScalarType::U128 => 16,
            ScalarType::Bool => 1,
            ScalarType::Address => ADDRESS_LENGTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::U128 => "u128",
            ScalarType::Bool => "bool",
            ScalarType::Address => "address",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a base64 blob into raw bytes.
pub fn decode_base64(blob: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(blob)
        .map_err(|e| Error::MalformedInput(format!("pure value is not valid base64: {}", e)))
}

/// Decode `blob` and check it is exactly `N` bytes wide.
fn fixed<const N: usize>(blob: &str, scalar: ScalarType) -> Result<[u8; N]> {
    let bytes = decode_base64(blob)?;
    trace!(%scalar, len = bytes.len(), "reading pure value");
    let actual = bytes.len();
    bytes.try_into().map_err(|_| Error::UnsupportedFieldWidth {
        scalar,
        expected: N,
        actual,
    })
}

pub fn read_u32(blob: &str) -> Result<u32> {
    Ok(u32::from_le_bytes(fixed(blob, ScalarType::U32)?))
}

pub fn read_u64(blob: &str) -> Result<u64> {
    Ok(u64::from_le_bytes(fixed(blob, ScalarType::U64)?))
}

pub fn read_u128(blob: &str) -> Result<u128> {
    Ok(u128::from_le_bytes(fixed(blob, ScalarType::U128)?))
}

/// Read a BCS boolean. Any byte other than `0` or `1` is rejected.
pub fn read_bool(blob: &str) -> Result<bool> {
    match fixed::<1>(blob, ScalarType::Bool)? {
        [0] => Ok(false),
        [1] => Ok(true),
        [b] => Err(Error::MalformedInput(format!(
            "invalid bool byte 0x{:02x}",
            b
        ))),
    }
}

/// Read a 32-byte address and render it as `0x` followed by 64 lowercase hex digits.
pub fn read_address(blob: &str) -> Result<String> {
    let bytes: [u8; ADDRESS_LENGTH] = fixed(blob, ScalarType::Address)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Reinterpret a u32 tick as the signed i32 it encodes (two's complement).
pub fn tick_from_wire(raw: u32) -> i32 {
    raw as i32
}

/// Normalize an address or package id to `0x` + 64 lowercase hex digits.
///
/// Short forms such as `0x2` are left-padded with zeros. Returns `None` for
/// strings that are not hex or are longer than an address.
pub fn normalize_address(addr: &str) -> Option<String> {
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    if digits.is_empty()
        || digits.len() > ADDRESS_LENGTH * 2
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    Some(format!(
        "0x{:0>width$}",
        digits.to_ascii_lowercase(),
        width = ADDRESS_LENGTH * 2
    ))
}
