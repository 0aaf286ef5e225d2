use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// The customer's shopping cart as held by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "itens", default)]
    pub items: Vec<CartItem>,
    #[serde(rename = "valorTotal", default)]
    pub total: Option<f64>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Backend total when present, otherwise the sum of line subtotals.
    pub fn subtotal(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.items.iter().map(CartItem::line_total).sum())
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "produtoId")]
    pub product_id: ProductId,
    #[serde(rename = "nomeProduto", default)]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "precoUnitario")]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: Option<f64>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.subtotal
            .unwrap_or(self.unit_price * f64::from(self.quantity))
    }
}

/// Body of `POST /carrinho/{user}/itens` and `PUT /carrinho/{user}/itens/{product}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRequest {
    #[serde(rename = "produtoId")]
    pub product_id: ProductId,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
}
