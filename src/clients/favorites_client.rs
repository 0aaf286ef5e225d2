use crate::clients::{CartClient, StoreClient};
use crate::favorites::{Favorites, FavoritesCommand, FavoritesError};
use crate::framework::StateClient;
use crate::model::{Favorite, ProductId, UserId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the favorites list.
#[derive(Clone)]
pub struct FavoritesClient {
    inner: StateClient<Favorites>,
}

impl FavoritesClient {
    pub fn new(inner: StateClient<Favorites>) -> Self {
        Self { inner }
    }

    pub async fn add(&self, favorite: Favorite) -> Result<usize, FavoritesError> {
        self.inner.dispatch(FavoritesCommand::Add(favorite)).await
    }

    pub async fn remove(&self, id: &ProductId) -> Result<usize, FavoritesError> {
        self.inner.dispatch(FavoritesCommand::Remove(id.clone())).await
    }

    pub async fn clear(&self) -> Result<(), FavoritesError> {
        self.inner.dispatch(FavoritesCommand::Clear).await.map(|_| ())
    }

    /// Puts one unit of a favorite product in the cart.
    ///
    /// Returns the favorite that was added so callers can name it.
    #[instrument(skip(self, cart))]
    pub async fn add_to_cart(
        &self,
        cart: &CartClient,
        user: Option<&UserId>,
        id: &ProductId,
    ) -> Result<Favorite, FavoritesError> {
        let user = user.ok_or(FavoritesError::SignedOut)?;
        let favorite = self
            .snapshot()
            .await?
            .get(id)
            .cloned()
            .ok_or_else(|| FavoritesError::NotListed(id.clone()))?;
        debug!(product = %favorite.id, "Adding favorite to cart");
        cart.add_item(user, &favorite.id, 1).await?;
        Ok(favorite)
    }
}

#[async_trait]
impl StoreClient<Favorites> for FavoritesClient {
    fn inner(&self) -> &StateClient<Favorites> {
        &self.inner
    }
}
