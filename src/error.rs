use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrCodeError>;

#[derive(Error, Debug)]
pub enum BrCodeError {
    #[error("value for field {tag} is too long: {len} characters (max 99)")]
    FieldTooLong { tag: &'static str, len: usize },
    #[error("value for field {tag} contains non-ASCII characters")]
    NonAscii { tag: &'static str },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
