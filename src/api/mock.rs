//! # Mock Backend
//!
//! A scripted [`StoreApi`] for testing session logic without a server.
//!
//! Queue the responses you expect, in order, then hand the mock to the code
//! under test. Every call pops the next expectation; a call that does not
//! match it panics. [`MockApi::verify`] fails if anything was left unused,
//! and [`MockApi::calls`] shows what was actually sent.
//!
//! # Example
//! ```ignore
//! let mock = MockApi::new();
//! mock.expect_checkout().return_ok(order);
//! mock.expect_attach_delivery().return_ok(());
//! mock.expect_register_payment().return_err(ApiError::status("/pagamento", 402));
//!
//! let api: Arc<dyn StoreApi> = Arc::new(mock.clone());
//! // ... run the checkout ...
//! mock.verify();
//! ```

use crate::api::{ApiError, StoreApi};
use crate::model::{
    Address, AddressId, AddressRequest, Cart, CartItemRequest, DeliveryRequest,
    ExpressCheckoutRequest, Order, OrderId, PaymentRequest, ProductId, UserId,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted response, one variant per backend operation.
#[derive(Debug)]
enum Expectation {
    ListAddresses(Result<Vec<Address>, ApiError>),
    AddAddress(Result<Address, ApiError>),
    UpdateAddress(Result<Address, ApiError>),
    RemoveAddress(Result<(), ApiError>),
    SetPrimaryAddress(Result<(), ApiError>),
    LoadCart(Result<Cart, ApiError>),
    AddCartItem(Result<Cart, ApiError>),
    UpdateCartItem(Result<Cart, ApiError>),
    RemoveCartItem(Result<Cart, ApiError>),
    Checkout(Result<Order, ApiError>),
    ExpressCheckout(Result<Order, ApiError>),
    AttachDelivery(Result<(), ApiError>),
    RegisterPayment(Result<(), ApiError>),
    GetOrder(Result<Order, ApiError>),
}

/// A request the mock received, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListAddresses(UserId),
    AddAddress(UserId, AddressRequest),
    UpdateAddress(AddressId, AddressRequest),
    RemoveAddress(AddressId),
    SetPrimaryAddress(AddressId),
    LoadCart(UserId),
    AddCartItem(UserId, CartItemRequest),
    UpdateCartItem(UserId, CartItemRequest),
    RemoveCartItem(UserId, ProductId),
    Checkout(UserId),
    ExpressCheckout(UserId, ExpressCheckoutRequest),
    AttachDelivery(OrderId, DeliveryRequest),
    RegisterPayment(OrderId, PaymentRequest),
    GetOrder(OrderId),
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A backend double with expectation tracking. Clones share the same script.
#[derive(Clone, Default)]
pub struct MockApi {
    expectations: Queue,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<R> {
    expectations: Queue,
    wrap: fn(Result<R, ApiError>) -> Expectation,
}

impl<R> ExpectationBuilder<R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, ApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back((self.wrap)(response));
    }
}

macro_rules! expect_fns {
    ($($fn_name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $fn_name(&self) -> ExpectationBuilder<$ty> {
                ExpectationBuilder {
                    expectations: self.expectations.clone(),
                    wrap: Expectation::$variant,
                }
            }
        )*
    };
}

/// Records the call and pops the matching expectation, panicking on mismatch.
macro_rules! answer {
    ($self:ident, $call:expr, $variant:ident) => {{
        let call = $call;
        $self.calls.lock().unwrap().push(call.clone());
        let next = $self.expectations.lock().unwrap().pop_front();
        match next {
            Some(Expectation::$variant(response)) => response,
            other => panic!("Unexpected request {call:?}; next expectation was {other:?}"),
        }
    }};
}

impl MockApi {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    expect_fns! {
        expect_list_addresses => ListAddresses: Vec<Address>,
        expect_add_address => AddAddress: Address,
        expect_update_address => UpdateAddress: Address,
        expect_remove_address => RemoveAddress: (),
        expect_set_primary_address => SetPrimaryAddress: (),
        expect_load_cart => LoadCart: Cart,
        expect_add_cart_item => AddCartItem: Cart,
        expect_update_cart_item => UpdateCartItem: Cart,
        expect_remove_cart_item => RemoveCartItem: Cart,
        expect_checkout => Checkout: Order,
        expect_express_checkout => ExpressCheckout: Order,
        expect_attach_delivery => AttachDelivery: (),
        expect_register_payment => RegisterPayment: (),
        expect_get_order => GetOrder: Order,
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining: {:?}", exps.len(), exps);
        }
    }
}

#[async_trait]
impl StoreApi for MockApi {
    async fn list_addresses(&self, user: &UserId) -> Result<Vec<Address>, ApiError> {
        answer!(self, ApiCall::ListAddresses(user.clone()), ListAddresses)
    }

    async fn add_address(&self, user: &UserId, request: &AddressRequest) -> Result<Address, ApiError> {
        answer!(self, ApiCall::AddAddress(user.clone(), request.clone()), AddAddress)
    }

    async fn update_address(&self, id: &AddressId, request: &AddressRequest) -> Result<Address, ApiError> {
        answer!(self, ApiCall::UpdateAddress(id.clone(), request.clone()), UpdateAddress)
    }

    async fn remove_address(&self, id: &AddressId) -> Result<(), ApiError> {
        answer!(self, ApiCall::RemoveAddress(id.clone()), RemoveAddress)
    }

    async fn set_primary_address(&self, id: &AddressId) -> Result<(), ApiError> {
        answer!(self, ApiCall::SetPrimaryAddress(id.clone()), SetPrimaryAddress)
    }

    async fn load_cart(&self, user: &UserId) -> Result<Cart, ApiError> {
        answer!(self, ApiCall::LoadCart(user.clone()), LoadCart)
    }

    async fn add_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError> {
        answer!(self, ApiCall::AddCartItem(user.clone(), request.clone()), AddCartItem)
    }

    async fn update_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError> {
        answer!(self, ApiCall::UpdateCartItem(user.clone(), request.clone()), UpdateCartItem)
    }

    async fn remove_cart_item(&self, user: &UserId, product: &ProductId) -> Result<Cart, ApiError> {
        answer!(self, ApiCall::RemoveCartItem(user.clone(), product.clone()), RemoveCartItem)
    }

    async fn checkout(&self, user: &UserId) -> Result<Order, ApiError> {
        answer!(self, ApiCall::Checkout(user.clone()), Checkout)
    }

    async fn express_checkout(
        &self,
        user: &UserId,
        request: &ExpressCheckoutRequest,
    ) -> Result<Order, ApiError> {
        answer!(self, ApiCall::ExpressCheckout(user.clone(), request.clone()), ExpressCheckout)
    }

    async fn attach_delivery(&self, order: &OrderId, request: &DeliveryRequest) -> Result<(), ApiError> {
        answer!(self, ApiCall::AttachDelivery(order.clone(), request.clone()), AttachDelivery)
    }

    async fn register_payment(&self, order: &OrderId, request: &PaymentRequest) -> Result<(), ApiError> {
        answer!(self, ApiCall::RegisterPayment(order.clone(), request.clone()), RegisterPayment)
    }

    async fn get_order(&self, order: &OrderId) -> Result<Order, ApiError> {
        answer!(self, ApiCall::GetOrder(order.clone()), GetOrder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_answers_in_order_and_records_calls() {
        let mock = MockApi::new();
        mock.expect_load_cart().return_ok(Cart::default());
        mock.expect_remove_address().return_err(ApiError::status("/enderecos/a1", 500));

        let user = UserId::from("u1");
        assert!(mock.load_cart(&user).await.unwrap().is_empty());
        let err = mock.remove_address(&AddressId::from("a1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));

        assert_eq!(
            mock.calls(),
            vec![
                ApiCall::LoadCart(user),
                ApiCall::RemoveAddress(AddressId::from("a1")),
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mismatched_call_panics() {
        let mock = MockApi::new();
        mock.expect_load_cart().return_ok(Cart::default());
        let _ = mock.get_order(&OrderId::from("o1")).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_leftovers() {
        let mock = MockApi::new();
        mock.expect_checkout().return_err(ApiError::status("/pedidos/checkout/u1", 500));
        mock.verify();
    }
}
