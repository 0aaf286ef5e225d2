//! Error types for checkout.

use crate::api::ApiError;
use crate::model::OrderId;
use crate::notify::Notice;
use thiserror::Error;

const PAYMENT_FALLBACK: &str = "There was a problem with the payment.";

/// Why a checkout stopped.
///
/// The first four variants are caught before any request is sent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("no authenticated user")]
    NotAuthenticated,

    #[error("cart is empty")]
    EmptyCart,

    #[error("no delivery address selected")]
    NoAddressSelected,

    /// The selected id is not in the loaded address book.
    #[error("selected delivery address is not in the address book")]
    AddressMissing,

    #[error("order creation failed: {0}")]
    CreateOrder(#[source] ApiError),

    /// The order exists and awaits payment; delivery can be attached later.
    #[error("delivery registration failed for order {order}: {source}")]
    AttachDelivery {
        order: OrderId,
        #[source]
        source: ApiError,
    },

    /// The order exists but is unpaid.
    #[error("payment failed for order {order}: {source}")]
    RegisterPayment {
        order: OrderId,
        #[source]
        source: ApiError,
    },
}

impl CheckoutError {
    /// The order that was left behind, if the failure happened after creation.
    pub fn order(&self) -> Option<&OrderId> {
        match self {
            CheckoutError::AttachDelivery { order, .. } | CheckoutError::RegisterPayment { order, .. } => {
                Some(order)
            }
            _ => None,
        }
    }

    /// What to tell the user.
    pub fn notice(&self) -> Notice {
        match self {
            CheckoutError::NotAuthenticated => Notice::error("Authentication error.").titled("Error"),
            CheckoutError::EmptyCart => Notice::warning("Your cart is empty.").titled("Attention"),
            CheckoutError::NoAddressSelected => {
                Notice::warning("Select a delivery address.").titled("Attention")
            }
            CheckoutError::AddressMissing => {
                Notice::error("Could not retrieve the delivery address.").titled("Error")
            }
            CheckoutError::CreateOrder(_) => Notice::error("Could not create the order.").titled("Error"),
            CheckoutError::AttachDelivery { .. } => {
                Notice::error("Could not register delivery details.").titled("Error")
            }
            CheckoutError::RegisterPayment { source, .. } => {
                let reason = source.first_message().unwrap_or(PAYMENT_FALLBACK);
                Notice::warning(format!("Order created, but: {reason}")).titled("Attention")
            }
        }
    }
}
