//! Checkout orchestration.
//!
//! A checkout is three dependent requests:
//!
//! 1. create the order from the cart;
//! 2. attach the delivery details to the new order;
//! 3. register the payment.
//!
//! Steps 1 and 2 abort the flow. A failure at step 2 leaves the order
//! awaiting payment on the backend, from where the customer can retry on
//! the order page. Step 3 is best-effort: its failure is reported as a
//! partial success and the customer is sent to the order page instead of
//! the confirmation page. Nothing is retried automatically.

pub mod error;

pub use error::*;

use crate::address_book::AddressBook;
use crate::api::StoreApi;
use crate::clients::CartClient;
use crate::config::StorefrontConfig;
use crate::model::{
    Address, Cart, DeliveryRequest, ExpressCheckoutRequest, OrderId, PaymentMethod, PaymentRequest, UserId,
};
use crate::notify::{Notice, Route};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Everything the checkout page knows when the customer confirms.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub user: Option<UserId>,
    pub cart: Cart,
    pub addresses: AddressBook,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// Order placed and paid.
    Completed,
    /// Order placed, payment not registered.
    PaymentPending,
    /// Stopped before the order could be completed.
    Aborted,
}

/// Result of one checkout attempt, ready for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub status: CheckoutStatus,
    pub order: Option<OrderId>,
    pub notice: Notice,
    pub route: Option<Route>,
}

/// Runs checkouts against the backend and clears the local cart on success.
#[derive(Clone)]
pub struct Checkout {
    api: Arc<dyn StoreApi>,
    cart: CartClient,
    shipping_cost: f64,
    delivery_days: u32,
    carrier: String,
}

impl Checkout {
    pub fn new(api: Arc<dyn StoreApi>, cart: CartClient, config: &StorefrontConfig) -> Self {
        Self {
            api,
            cart,
            shipping_cost: config.shipping_cost,
            delivery_days: config.delivery_days,
            carrier: config.carrier.clone(),
        }
    }

    /// Cart subtotal plus shipping, rounded to cents.
    pub fn total(&self, cart: &Cart) -> f64 {
        round_cents(cart.subtotal() + self.shipping_cost)
    }

    /// Create order, attach delivery, register payment.
    #[instrument(skip_all, fields(method = ?input.method))]
    pub async fn confirm(&self, input: &CheckoutInput) -> CheckoutOutcome {
        let result = self.place_order(input).await;
        self.conclude(result).await
    }

    /// Backend-assisted variant: the order and its delivery are created from
    /// the selected address in one call, then the payment is registered.
    #[instrument(skip_all, fields(method = ?input.method))]
    pub async fn confirm_express(&self, input: &CheckoutInput) -> CheckoutOutcome {
        let result = self.place_express_order(input).await;
        self.conclude(result).await
    }

    /// The three-step sequence without the UI translation.
    pub async fn place_order(&self, input: &CheckoutInput) -> Result<OrderId, CheckoutError> {
        let (user, address) = preflight(input)?;

        let order = self
            .api
            .checkout(user)
            .await
            .map_err(CheckoutError::CreateOrder)?;
        info!(order = %order.id, "Order created");

        let delivery = self.delivery_request(address);
        self.api
            .attach_delivery(&order.id, &delivery)
            .await
            .map_err(|source| CheckoutError::AttachDelivery {
                order: order.id.clone(),
                source,
            })?;
        info!(order = %order.id, "Delivery attached");

        self.pay(order.id, input).await
    }

    pub async fn place_express_order(&self, input: &CheckoutInput) -> Result<OrderId, CheckoutError> {
        let (user, address) = preflight(input)?;

        let request = ExpressCheckoutRequest {
            freight: self.shipping_cost,
            address_id: address.id.clone(),
        };
        let order = self
            .api
            .express_checkout(user, &request)
            .await
            .map_err(CheckoutError::CreateOrder)?;
        info!(order = %order.id, "Order created with delivery");

        self.pay(order.id, input).await
    }

    async fn pay(&self, order: OrderId, input: &CheckoutInput) -> Result<OrderId, CheckoutError> {
        let payment = PaymentRequest::new(input.method, self.total(&input.cart));
        match self.api.register_payment(&order, &payment).await {
            Ok(()) => {
                info!(%order, amount = payment.amount, "Payment registered");
                Ok(order)
            }
            Err(source) => Err(CheckoutError::RegisterPayment { order, source }),
        }
    }

    async fn conclude(&self, result: Result<OrderId, CheckoutError>) -> CheckoutOutcome {
        match result {
            Ok(order) => {
                if let Err(e) = self.cart.clear_local().await {
                    warn!(%order, error = %e, "Could not clear local cart");
                }
                CheckoutOutcome {
                    status: CheckoutStatus::Completed,
                    order: Some(order),
                    notice: Notice::success("Order placed successfully!").titled("Congratulations"),
                    route: Some(Route::Confirmation),
                }
            }
            Err(e) => {
                warn!(error = %e, "Checkout stopped");
                let notice = e.notice();
                match e {
                    CheckoutError::RegisterPayment { order, .. } => CheckoutOutcome {
                        status: CheckoutStatus::PaymentPending,
                        route: Some(Route::OrderDetail(order.clone())),
                        order: Some(order),
                        notice,
                    },
                    other => CheckoutOutcome {
                        status: CheckoutStatus::Aborted,
                        order: other.order().cloned(),
                        notice,
                        route: None,
                    },
                }
            }
        }
    }

    fn delivery_request(&self, address: &Address) -> DeliveryRequest {
        DeliveryRequest {
            cep: address.cep.clone(),
            street: address.street.clone(),
            number: address.number.clone(),
            complement: address.complement.clone(),
            neighborhood: address.neighborhood.clone(),
            city: address.city.clone(),
            uf: address.uf.clone(),
            freight: self.shipping_cost,
            business_days: self.delivery_days,
            carrier: self.carrier.clone(),
        }
    }
}

/// Client-side checks; a failure here means no request was sent.
fn preflight(input: &CheckoutInput) -> Result<(&UserId, &Address), CheckoutError> {
    let user = input.user.as_ref().ok_or(CheckoutError::NotAuthenticated)?;
    if input.cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if input.addresses.selected.is_none() {
        return Err(CheckoutError::NoAddressSelected);
    }
    let address = input
        .addresses
        .selected_address()
        .ok_or(CheckoutError::AddressMissing)?;
    Ok((user, address))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
