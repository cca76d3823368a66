use thiserror::Error;
use village_richtext::DocumentError;

/// Failure reported by a data-layer implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("store error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    /// A profile load finished without a user for the requested id.
    #[error("missing user for userId {user_id}")]
    MissingUser { user_id: String },

    /// The component was configured in a state that needs a callback it was
    /// not given.
    #[error("missing required callback: {name}")]
    MissingRequiredCallback { name: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ViewError {
    pub fn missing_user(user_id: impl Into<String>) -> Self {
        Self::MissingUser {
            user_id: user_id.into(),
        }
    }
}
