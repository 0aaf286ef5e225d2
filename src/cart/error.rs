//! Error types for the cart.

use crate::api::ApiError;
use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Quantities start at one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Cart unavailable: {0}")]
    Framework(#[from] FrameworkError),
}
