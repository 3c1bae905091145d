use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("constraint violated: {0}")]
    Validation(String),
}
