use thiserror::Error;

/// Failures raised while moving a provider map in or out of a storage column.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("lingua/content: cannot serialize value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("lingua/content: cannot decode stored value: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("lingua/content: cannot scan type into bytes: {found}")]
    Type { found: &'static str },
}

impl CodecError {
    pub fn is_decode(&self) -> bool {
        matches!(self, CodecError::Decode(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, CodecError::Type { .. })
    }
}
