use crate::cart::{CartCommand, CartError, CartState};
use crate::clients::StoreClient;
use crate::framework::StateClient;
use crate::model::{Cart, ProductId, UserId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the cart state.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<CartState>,
}

impl CartClient {
    pub fn new(inner: StateClient<CartState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn load(&self, user: &UserId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner.dispatch(CartCommand::Load(user.clone())).await
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, user: &UserId, product: &ProductId, quantity: u32) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .dispatch(CartCommand::AddItem {
                user: user.clone(),
                product: product.clone(),
                quantity,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user: &UserId,
        product: &ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .dispatch(CartCommand::UpdateQuantity {
                user: user.clone(),
                product: product.clone(),
                quantity,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user: &UserId, product: &ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .dispatch(CartCommand::RemoveItem {
                user: user.clone(),
                product: product.clone(),
            })
            .await
    }

    /// Empties the local copy only.
    pub async fn clear_local(&self) -> Result<(), CartError> {
        self.inner.dispatch(CartCommand::ClearLocal).await.map(|_| ())
    }
}

#[async_trait]
impl StoreClient<CartState> for CartClient {
    fn inner(&self) -> &StateClient<CartState> {
        &self.inner
    }
}
