use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column {0} cannot be grouped")]
    NotGroupable(&'static str),
    #[error("page size {size} is not one of {allowed:?}")]
    PageSize { size: usize, allowed: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, ModelError>;
