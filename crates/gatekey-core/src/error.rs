use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A tag code collided with one of the persisted empty-slot sentinels.
    #[error("reserved tag code value: {value:#010X}")]
    ReservedTagCode { value: u32 },

    /// A byte did not map to any known code kind.
    #[error("invalid code kind: {code}")]
    InvalidCodeKind { code: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
