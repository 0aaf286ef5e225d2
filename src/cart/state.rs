//! [`StoreState`] implementation for the cart.

use crate::api::StoreApi;
use crate::cart::CartError;
use crate::framework::StoreState;
use crate::model::{Cart, CartItemRequest, ProductId, UserId};
use async_trait::async_trait;
use std::sync::Arc;

/// Local mirror of the backend cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub cart: Cart,
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.cart.subtotal()
    }
}

/// Mutations of the cart.
#[derive(Debug, Clone)]
pub enum CartCommand {
    Load(UserId),
    AddItem {
        user: UserId,
        product: ProductId,
        quantity: u32,
    },
    /// A quantity of zero removes the line.
    UpdateQuantity {
        user: UserId,
        product: ProductId,
        quantity: u32,
    },
    RemoveItem {
        user: UserId,
        product: ProductId,
    },
    /// Forgets the local copy without telling the backend. Used after a
    /// checkout, when the backend has already emptied the cart.
    ClearLocal,
}

#[async_trait]
impl StoreState for CartState {
    type Command = CartCommand;
    type Output = Cart;
    type Error = CartError;
    type Context = Arc<dyn StoreApi>;

    async fn apply(&mut self, command: CartCommand, api: &Arc<dyn StoreApi>) -> Result<Cart, CartError> {
        let cart = match command {
            CartCommand::Load(user) => api.load_cart(&user).await?,
            CartCommand::AddItem {
                user,
                product,
                quantity,
            } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity(quantity));
                }
                let request = CartItemRequest {
                    product_id: product,
                    quantity,
                };
                api.add_cart_item(&user, &request).await?
            }
            CartCommand::UpdateQuantity {
                user,
                product,
                quantity: 0,
            } => api.remove_cart_item(&user, &product).await?,
            CartCommand::UpdateQuantity {
                user,
                product,
                quantity,
            } => {
                let request = CartItemRequest {
                    product_id: product,
                    quantity,
                };
                api.update_cart_item(&user, &request).await?
            }
            CartCommand::RemoveItem { user, product } => api.remove_cart_item(&user, &product).await?,
            CartCommand::ClearLocal => Cart::default(),
        };
        self.cart = cart.clone();
        Ok(cart)
    }
}
