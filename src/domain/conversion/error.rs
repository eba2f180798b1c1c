use crate::infrastructure::repositories::{StoreError, TtsError};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The speech provider refused the request
    #[error("{0}")]
    Upstream(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("status update conflict: {0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl From<TtsError> for ConversionError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::Rejected { .. } => ConversionError::Upstream(err.to_string()),
            TtsError::Transport { .. } => ConversionError::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for ConversionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PreconditionFailed(key) => ConversionError::Conflict(format!(
                "{} was modified concurrently",
                key
            )),
            StoreError::Backend(msg) => ConversionError::Storage(msg),
        }
    }
}
