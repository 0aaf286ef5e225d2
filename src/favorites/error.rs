//! Error types for the favorites list.

use crate::cart::CartError;
use crate::framework::FrameworkError;
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoritesError {
    #[error("Product is not a favorite: {0}")]
    NotListed(ProductId),

    /// Adding to the cart needs a signed-in customer.
    #[error("Sign in to add products to the cart")]
    SignedOut,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Favorites unavailable: {0}")]
    Framework(#[from] FrameworkError),
}
