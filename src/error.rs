use thiserror::Error;

use crate::format::layout::Field;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("not a SealVault key-exchange file")]
    InvalidMagic,

    #[error("incompatible file format for this version of SealVault")]
    IncompatibleFormat,

    #[error("corrupt file: {field} needs {len} bytes at offset {offset}")]
    Truncated {
        field: Field,
        offset: u64,
        len: usize,
    },

    #[error("invalid {field} length: expected {expected}, got {actual}")]
    InvalidFieldLength {
        field: Field,
        expected: usize,
        actual: usize,
    },

    #[error("file name too long")]
    FileNameTooLong,
}

pub type Result<T> = std::result::Result<T, HeaderError>;
