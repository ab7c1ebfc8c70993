use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocmillError {
    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
