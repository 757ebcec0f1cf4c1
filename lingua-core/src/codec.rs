//! JSON persistence of provider maps.
//!
//! The stored shape is an object of objects of strings: outer keys are
//! provider names, inner keys are language codes. Keys are written sorted so
//! equal maps always encode to the same text.

use crate::error::CodecError;
use crate::provider::ProviderMap;

/// Encodes `content` for storage in a single text column.
pub fn encode(content: &ProviderMap) -> Result<String, CodecError> {
    serde_json::to_string(content).map_err(CodecError::Encode)
}

/// Rebuilds a provider map from stored bytes.
///
/// A stored `null` yields an empty map. Anything that is not an object of
/// objects of strings fails; nothing is partially decoded.
pub fn decode(stored: &[u8]) -> Result<ProviderMap, CodecError> {
    serde_json::from_slice(stored).map_err(CodecError::Decode)
}
