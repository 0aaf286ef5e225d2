#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use obra_storefront::api::mock::MockApi;
use obra_storefront::api::{ApiError, StoreApi};
use obra_storefront::config::StorefrontConfig;
use obra_storefront::lifecycle::Session;
use obra_storefront::model::{
    Address, AddressId, Cart, CartItem, Favorite, Order, OrderStatus, PostalAddress, ProductId,
};
use obra_storefront::postal::{PostalCode, PostalLookup};
use std::sync::{Arc, Mutex};

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn address(id: &str, primary: bool) -> Address {
    Address {
        id: AddressId::from(id),
        nickname: "Obra Pinheiros".into(),
        cep: "05422010".into(),
        street: "Rua dos Pinheiros".into(),
        number: "870".into(),
        complement: Some("Galpão 2".into()),
        neighborhood: "Pinheiros".into(),
        city: "São Paulo".into(),
        uf: "SP".into(),
        primary,
    }
}

/// Four bags of cement at 49.98: subtotal 199.92.
pub fn cement_cart() -> Cart {
    Cart {
        id: Some("c1".into()),
        items: vec![CartItem {
            product_id: ProductId::from("p-cimento"),
            product_name: "Cimento CP II 50kg".into(),
            quantity: 4,
            unit_price: 49.98,
            subtotal: Some(199.92),
        }],
        total: None,
    }
}

pub fn favorite(id: &str, name: &str) -> Favorite {
    Favorite {
        id: ProductId::from(id),
        name: name.into(),
        category: "Hidráulica".into(),
        price: 32.5,
        image: format!("https://cdn.example.com/{id}.jpg"),
        in_stock: true,
    }
}

pub fn new_order(id: &str) -> Order {
    Order::new(id, OrderStatus::AwaitingPayment, at(4, 10, 15))
}

/// Postal service double that answers every lookup the same way.
#[derive(Clone)]
pub struct FixedPostal {
    answer: Result<Option<PostalAddress>, ApiError>,
    pub looked_up: Arc<Mutex<Vec<String>>>,
}

impl FixedPostal {
    pub fn new(answer: Result<Option<PostalAddress>, ApiError>) -> Self {
        Self {
            answer,
            looked_up: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl PostalLookup for FixedPostal {
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>, ApiError> {
        self.looked_up.lock().unwrap().push(code.to_string());
        self.answer.clone()
    }
}

pub fn start_session(mock: &MockApi, postal: FixedPostal, favorites: Vec<Favorite>) -> Session {
    let api: Arc<dyn StoreApi> = Arc::new(mock.clone());
    Session::start(&StorefrontConfig::default(), api, Arc::new(postal), favorites)
}
