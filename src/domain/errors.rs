use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No variant of product {product_id} in size {size}")]
    VariantNotFound { product_id: Uuid, size: String },
    #[error(
        "Insufficient stock for product {product_id} in size {size}: \
         requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: Uuid,
        size: String,
        requested: i32,
        available: i32,
    },
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}
