use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("status record must be 20 bytes, got {len}")]
    WrongLength { len: usize },
}
