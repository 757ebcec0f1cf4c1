//! Adapter between provider maps and the values a storage driver reads and
//! writes.

use tracing::warn;

use crate::codec;
use crate::error::CodecError;
use crate::provider::ProviderMap;

/// A single column value as handed over by a storage driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Bool(bool),
    Text(String),
    Blob(Vec<u8>),
}

impl ColumnValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnValue::Null => "null",
            ColumnValue::Integer(_) => "integer",
            ColumnValue::Real(_) => "real",
            ColumnValue::Bool(_) => "bool",
            ColumnValue::Text(_) => "text",
            ColumnValue::Blob(_) => "blob",
        }
    }

    /// Raw bytes of textual values; `None` for every other representation.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ColumnValue::Text(s) => Some(s.as_bytes()),
            ColumnValue::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl ProviderMap {
    /// Value to write into the storage column.
    pub fn to_column(&self) -> Result<ColumnValue, CodecError> {
        codec::encode(self).map(ColumnValue::Text)
    }

    /// Reads a provider map back from a storage column.
    ///
    /// Only text and blob values are accepted; the representation is checked
    /// before any decoding happens.
    pub fn from_column(value: &ColumnValue) -> Result<Self, CodecError> {
        let Some(bytes) = value.as_bytes() else {
            warn!(found = value.type_name(), "Rejected non-byte column value");
            return Err(CodecError::Type {
                found: value.type_name(),
            });
        };
        codec::decode(bytes)
    }
}

impl TryFrom<&ColumnValue> for ProviderMap {
    type Error = CodecError;

    fn try_from(value: &ColumnValue) -> Result<Self, Self::Error> {
        ProviderMap::from_column(value)
    }
}
