//! Error types for the Product actor.

use crate::model::{ImageId, ProductId};
use atelier_actor::FrameworkError;
use thiserror::Error;

/// Errors returned by product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// No product has the requested id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product exists but has no image with the requested id.
    #[error("Image {image_id} not found on product {product_id}")]
    ImageNotFound {
        product_id: ProductId,
        image_id: ImageId,
    },

    /// The storage backend rejected a read or write.
    #[error("Product storage error: {0}")]
    Storage(String),

    /// The actor is gone or dropped the reply.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Storage(e) => ProductError::Storage(e.to_string()),
            FrameworkError::EntityError(e) => match e.downcast::<ProductError>() {
                Ok(e) => *e,
                Err(e) => ProductError::ActorCommunicationError(e.to_string()),
            },
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
