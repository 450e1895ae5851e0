use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field layout: {message}")]
    InvalidLayout { message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
