use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading or flushing the code store.
///
/// Note the asymmetry with the store's boolean results: "store full",
/// "slot out of range" and "tag not found" are expected outcomes and come
/// back as `Ok(false)` / `None`; an error here always means the persistent
/// medium itself misbehaved.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying medium failed to read or write.
    #[error("medium I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An access fell outside the medium's bounds.
    #[error("access outside medium bounds: offset {offset}, len {len}, medium size {size}")]
    OutOfBounds { offset: u64, len: usize, size: u64 },

    /// The medium cannot hold the requested number of slots.
    #[error("medium too small: need {needed} bytes, have {actual}")]
    MediumTooSmall { needed: u64, actual: u64 },
}
