//! Backend REST API.
//!
//! [`StoreApi`] is the seam between session logic and the network. The
//! production implementation is [`HttpApi`]; tests use [`mock::MockApi`].

pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use http::HttpApi;

use crate::model::{
    Address, AddressId, AddressRequest, Cart, CartItemRequest, DeliveryRequest,
    ExpressCheckoutRequest, Order, OrderId, PaymentRequest, ProductId, UserId,
};
use async_trait::async_trait;

/// Operations the storefront consumes from the backend.
///
/// None of them retry: a failure is returned as-is and the caller decides
/// what to tell the user.
#[async_trait]
pub trait StoreApi: Send + Sync {
    // --- Addresses ---

    async fn list_addresses(&self, user: &UserId) -> Result<Vec<Address>, ApiError>;

    async fn add_address(&self, user: &UserId, request: &AddressRequest) -> Result<Address, ApiError>;

    async fn update_address(&self, id: &AddressId, request: &AddressRequest) -> Result<Address, ApiError>;

    async fn remove_address(&self, id: &AddressId) -> Result<(), ApiError>;

    async fn set_primary_address(&self, id: &AddressId) -> Result<(), ApiError>;

    // --- Cart ---

    async fn load_cart(&self, user: &UserId) -> Result<Cart, ApiError>;

    async fn add_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError>;

    async fn update_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError>;

    async fn remove_cart_item(&self, user: &UserId, product: &ProductId) -> Result<Cart, ApiError>;

    // --- Orders ---

    /// Turns the user's cart into an order awaiting payment.
    async fn checkout(&self, user: &UserId) -> Result<Order, ApiError>;

    /// Creates the order and its delivery from a saved address in one call.
    async fn express_checkout(
        &self,
        user: &UserId,
        request: &ExpressCheckoutRequest,
    ) -> Result<Order, ApiError>;

    async fn attach_delivery(&self, order: &OrderId, request: &DeliveryRequest) -> Result<(), ApiError>;

    async fn register_payment(&self, order: &OrderId, request: &PaymentRequest) -> Result<(), ApiError>;

    async fn get_order(&self, order: &OrderId) -> Result<Order, ApiError>;
}
