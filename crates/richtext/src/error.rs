use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The document is empty or has no text leaf where one is required.
    #[error("invalid document: {reason}")]
    InvalidDocument { reason: &'static str },
}

impl DocumentError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Self::InvalidDocument { reason }
    }
}
