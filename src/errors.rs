use thiserror::Error;

/// Failures from the remote data store.
///
/// The variants exist for log fidelity only; callers treat every variant as
/// the same "store operation failed" condition.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to reach the data store: {0}")]
    Http(String),

    #[error("Data store rejected the write (status {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to decode the data store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        StoreError::Http(error.to_string())
    }
}
