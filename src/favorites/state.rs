//! [`StoreState`] implementation for the favorites list.

use crate::favorites::FavoritesError;
use crate::framework::StoreState;
use crate::model::{Favorite, ProductId};
use async_trait::async_trait;

/// Bookmarked products, kept locally for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    pub items: Vec<Favorite>,
}

impl Favorites {
    pub fn get(&self, id: &ProductId) -> Option<&Favorite> {
        self.items.iter().find(|f| &f.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum FavoritesCommand {
    /// Adding an already listed product replaces its entry in place.
    Add(Favorite),
    Remove(ProductId),
    Clear,
}

#[async_trait]
impl StoreState for Favorites {
    type Command = FavoritesCommand;
    /// Number of favorites after the command.
    type Output = usize;
    type Error = FavoritesError;
    type Context = ();

    async fn apply(&mut self, command: FavoritesCommand, _ctx: &()) -> Result<usize, FavoritesError> {
        match command {
            FavoritesCommand::Add(favorite) => {
                match self.items.iter_mut().find(|f| f.id == favorite.id) {
                    Some(existing) => *existing = favorite,
                    None => self.items.push(favorite),
                }
            }
            FavoritesCommand::Remove(id) => {
                let before = self.items.len();
                self.items.retain(|f| f.id != id);
                if self.items.len() == before {
                    return Err(FavoritesError::NotListed(id));
                }
            }
            FavoritesCommand::Clear => self.items.clear(),
        }
        Ok(self.items.len())
    }
}
