use thiserror::Error;

/// Rejected user input. Nothing is written when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a todo!")]
    EmptyText,
}

/// Failure of the key-value backend itself.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Storage document is not a valid key-value map")]
    Format(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The largest id in the list is `u64::MAX`, so no later id exists.
    #[error("No ids left after the largest stored id")]
    IdsExhausted,
    /// The persisted list could not be parsed. Not recovered.
    #[error("Stored todo list is corrupt")]
    Corrupt(#[source] serde_json::Error),
}
