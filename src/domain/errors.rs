use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid size: {0}")]
    InvalidSize(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Order not found")]
    NotFound,
    #[error("No status transition available from {0}")]
    NoTransitionAvailable(String),
    #[error("Order {0} was modified concurrently")]
    ConcurrentModification(String),

    // Store-layer failures.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Order code allocation failed: {0}")]
    AllocationFailed(String),
    #[error("Commit failed: {0}")]
    CommitFailed(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl DomainError {
    /// True for failures of the store rather than of the request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            DomainError::StorageUnavailable(_)
                | DomainError::AllocationFailed(_)
                | DomainError::CommitFailed(_)
                | DomainError::CorruptRecord(_)
        )
    }
}
