//! Orders as returned by the backend, plus the request bodies used while
//! checking out.

use crate::model::serde_ext::{optional_timestamp, timestamp};
use crate::model::{AddressId, OrderId, ProductId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle stage of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "AGUARDANDO_PAGAMENTO")]
    AwaitingPayment,
    #[serde(rename = "PAGO")]
    Paid,
    #[serde(rename = "EM_PREPARACAO")]
    Preparing,
    #[serde(rename = "ENVIADO")]
    Shipped,
    #[serde(rename = "ENTREGUE")]
    Delivered,
    #[serde(rename = "CANCELADO")]
    Cancelled,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Position of the status along the fulfilment track.
    ///
    /// Cancelled orders have no position. Unknown statuses sit at the start.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            OrderStatus::AwaitingPayment | OrderStatus::Unknown => Some(0),
            OrderStatus::Paid => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Shipped => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::AwaitingPayment => "awaiting payment",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// A purchase as tracked by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(rename = "dataPedido", deserialize_with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "pagamento", default)]
    pub payment: Option<PaymentRecord>,
    #[serde(rename = "entrega", default)]
    pub delivery: Option<DeliveryRecord>,
    #[serde(rename = "itens", default)]
    pub items: Vec<OrderItem>,
    #[serde(rename = "valorTotal", default)]
    pub total: f64,
}

impl Order {
    /// Creates an order with no payment, delivery or items attached.
    pub fn new(id: impl Into<OrderId>, status: OrderStatus, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            status,
            created_at,
            payment: None,
            delivery: None,
            items: Vec::new(),
            total: 0.0,
        }
    }

    pub fn with_payment(mut self, payment: PaymentRecord) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryRecord) -> Self {
        self.delivery = Some(delivery);
        self
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "produtoId")]
    pub product_id: ProductId,
    #[serde(rename = "nomeProduto", default)]
    pub product_name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "precoUnitario")]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: f64,
}

/// Payment sub-record of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(rename = "dataPagamento", default, deserialize_with = "optional_timestamp")]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(rename = "metodo", default)]
    pub method: Option<PaymentMethod>,
    #[serde(rename = "valor", default)]
    pub amount: Option<f64>,
}

/// Delivery sub-record of an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    #[serde(rename = "dataEnvio", default, deserialize_with = "optional_timestamp")]
    pub shipped_at: Option<NaiveDateTime>,
    #[serde(rename = "dataEstimadaEntrega", default, deserialize_with = "optional_timestamp")]
    pub estimated_delivery: Option<NaiveDateTime>,
    #[serde(rename = "dataEntregaReal", default, deserialize_with = "optional_timestamp")]
    pub delivered_at: Option<NaiveDateTime>,
    #[serde(rename = "transportadora", default)]
    pub carrier: Option<String>,
    #[serde(rename = "valorFrete", default)]
    pub freight: Option<f64>,
}

/// Payment methods offered at checkout, with their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CARTAO_CREDITO")]
    Credit,
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "BOLETO")]
    Boleto,
}

impl PaymentMethod {
    /// Installment count sent with the payment. Every method pays in one go.
    pub fn installments(self) -> u32 {
        1
    }
}

/// Body of `POST /pedidos/{id}/entrega`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento", skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    pub uf: String,
    #[serde(rename = "valorFrete")]
    pub freight: f64,
    #[serde(rename = "prazoDiasUteis")]
    pub business_days: u32,
    #[serde(rename = "transportadora")]
    pub carrier: String,
}

/// Body of `POST /pedidos/{id}/pagamento`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(rename = "metodo")]
    pub method: PaymentMethod,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "numeroParcelas")]
    pub installments: u32,
}

impl PaymentRequest {
    pub fn new(method: PaymentMethod, amount: f64) -> Self {
        Self {
            method,
            amount,
            installments: method.installments(),
        }
    }
}

/// Body of the one-shot checkout, where the backend builds the delivery from
/// a saved address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressCheckoutRequest {
    #[serde(rename = "valorFrete")]
    pub freight: f64,
    #[serde(rename = "enderecoId")]
    pub address_id: AddressId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_from_backend_json() {
        let body = r#"{
            "id": "9f1c",
            "status": "ENVIADO",
            "dataPedido": "2025-03-10T14:05:00",
            "pagamento": { "dataPagamento": "2025-03-10T14:20:11.5", "metodo": "PIX", "valor": 215.8 },
            "entrega": { "dataEnvio": "2025-03-12T08:00:00", "dataEstimadaEntrega": "2025-03-17", "dataEntregaReal": null },
            "itens": [ { "produtoId": "p1", "nomeProduto": "Cimento CP II 50kg", "quantidade": 4, "precoUnitario": 49.98, "subtotal": 199.92 } ],
            "valorTotal": 215.8
        }"#;
        let order: Order = serde_json::from_str(body).unwrap();
        assert_eq!(order.id, OrderId::from("9f1c"));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.payment.as_ref().unwrap().method, Some(PaymentMethod::Pix));
        let delivery = order.delivery.unwrap();
        assert!(delivery.shipped_at.is_some());
        assert!(delivery.estimated_delivery.is_some());
        assert!(delivery.delivered_at.is_none());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 4);
    }

    #[test]
    fn test_unrecognised_status_maps_to_unknown_at_start() {
        let status: OrderStatus = serde_json::from_str("\"DEVOLVIDO\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
        assert_eq!(status.ordinal(), Some(0));
        assert_eq!(OrderStatus::Cancelled.ordinal(), None);
    }

    #[test]
    fn test_payment_request_uses_wire_names() {
        let body = serde_json::to_value(PaymentRequest::new(PaymentMethod::Credit, 100.0)).unwrap();
        assert_eq!(body["metodo"], "CARTAO_CREDITO");
        assert_eq!(body["numeroParcelas"], 1);
    }
}
