//! Error types for the address book.

use crate::address_book::ValidationErrors;
use crate::api::ApiError;
use crate::framework::FrameworkError;
use crate::model::AddressId;
use thiserror::Error;

/// Errors that can occur during address operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    /// The form failed client-side validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Address changes need a signed-in customer.
    #[error("No customer signed in")]
    SignedOut,

    /// The address is not in the loaded list.
    #[error("Address not found: {0}")]
    NotFound(AddressId),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Address book unavailable: {0}")]
    Framework(#[from] FrameworkError),
}
