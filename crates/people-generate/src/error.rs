use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// A level size that is not a non-negative integer.
    #[error("invalid size {value:?} at level {position}: sizes must be non-negative integers")]
    InvalidSize { position: usize, value: String },
    /// The requested shape would produce too many records.
    #[error("size sequence yields more than {max} records")]
    TooLarge { max: usize },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
