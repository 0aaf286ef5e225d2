use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// A product the customer bookmarked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    pub in_stock: bool,
}
