//! Favorite products for the current session.

pub mod error;
pub mod state;

pub use error::*;
pub use state::*;

use crate::clients::FavoritesClient;
use crate::framework::StateActor;
use crate::model::Favorite;

/// Creates a new favorites actor, optionally seeded, and its client.
pub fn new(buffer_size: usize, seed: Vec<Favorite>) -> (StateActor<Favorites>, FavoritesClient) {
    let (actor, generic_client) = StateActor::with_state(buffer_size, Favorites { items: seed });
    (actor, FavoritesClient::new(generic_client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockApi};
    use crate::api::StoreApi;
    use crate::clients::StoreClient;
    use crate::model::{Cart, ProductId, UserId};
    use std::sync::Arc;

    fn favorite(id: &str, in_stock: bool) -> Favorite {
        Favorite {
            id: ProductId::from(id),
            name: format!("Produto {id}"),
            category: "Ferramentas".into(),
            price: 299.90,
            image: String::new(),
            in_stock,
        }
    }

    #[tokio::test]
    async fn test_add_remove_clear() {
        let (actor, client) = new(8, vec![favorite("1", true)]);
        tokio::spawn(actor.run(()));

        assert_eq!(client.add(favorite("2", false)).await.unwrap(), 2);
        assert_eq!(client.add(favorite("2", true)).await.unwrap(), 2);
        assert!(client.current().get(&ProductId::from("2")).unwrap().in_stock);

        assert_eq!(client.remove(&ProductId::from("1")).await.unwrap(), 1);
        assert_eq!(
            client.remove(&ProductId::from("1")).await.unwrap_err(),
            FavoritesError::NotListed(ProductId::from("1"))
        );

        client.clear().await.unwrap();
        assert!(client.snapshot().await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_sign_in() {
        let (actor, client) = new(8, vec![favorite("1", true)]);
        tokio::spawn(actor.run(()));
        let mock = MockApi::new();
        let (cart_actor, cart) = crate::cart::new(8);
        let api: Arc<dyn StoreApi> = Arc::new(mock.clone());
        tokio::spawn(cart_actor.run(api));

        let err = client
            .add_to_cart(&cart, None, &ProductId::from("1"))
            .await
            .unwrap_err();
        assert_eq!(err, FavoritesError::SignedOut);

        mock.expect_add_cart_item().return_ok(Cart::default());
        let added = client
            .add_to_cart(&cart, Some(&UserId::from("u1")), &ProductId::from("1"))
            .await
            .unwrap();
        assert_eq!(added.name, "Produto 1");
        assert!(matches!(mock.calls()[0], ApiCall::AddCartItem(..)));
        mock.verify();
    }
}
