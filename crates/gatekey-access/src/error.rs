use thiserror::Error;

/// Result type alias for access controller operations.
pub type AccessResult<T> = std::result::Result<T, AccessError>;

/// Errors surfaced by the access controller.
///
/// The controller itself never fails; it only forwards failures from the
/// decoder's reader port or the store's persistent medium.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Reader port failure.
    #[error(transparent)]
    Decoder(#[from] gatekey_decoder::DecoderError),

    /// Persistent medium failure.
    #[error(transparent)]
    Store(#[from] gatekey_store::StoreError),
}
