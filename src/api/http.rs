use crate::api::{validation_messages, ApiError, StoreApi};
use crate::config::StorefrontConfig;
use crate::model::{
    Address, AddressId, AddressRequest, Cart, CartItemRequest, DeliveryRequest,
    ExpressCheckoutRequest, Order, OrderId, PaymentRequest, ProductId, UserId,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// [`StoreApi`] over HTTP, rooted at [`StorefrontConfig::api_url`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        Ok(Self::with_client(client, &config.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "Response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let messages = validation_messages(&body);
        warn!(%url, status = status.as_u16(), ?messages, "Request rejected");
        Err(ApiError::rejected(url, status.as_u16(), messages))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T, ApiError> {
        let response = self.execute(request, url).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn submit(&self, request: RequestBuilder, url: &str) -> Result<(), ApiError> {
        self.execute(request, url).await.map(|_| ())
    }
}

#[async_trait]
impl StoreApi for HttpApi {
    #[instrument(skip(self))]
    async fn list_addresses(&self, user: &UserId) -> Result<Vec<Address>, ApiError> {
        let url = self.url(&format!("/enderecos/cliente/{user}"));
        self.fetch(self.client.get(&url), &url).await
    }

    #[instrument(skip(self, request))]
    async fn add_address(&self, user: &UserId, request: &AddressRequest) -> Result<Address, ApiError> {
        let url = self.url(&format!("/enderecos/cliente/{user}"));
        self.fetch(self.client.post(&url).json(request), &url).await
    }

    #[instrument(skip(self, request))]
    async fn update_address(&self, id: &AddressId, request: &AddressRequest) -> Result<Address, ApiError> {
        let url = self.url(&format!("/enderecos/{id}"));
        self.fetch(self.client.put(&url).json(request), &url).await
    }

    #[instrument(skip(self))]
    async fn remove_address(&self, id: &AddressId) -> Result<(), ApiError> {
        let url = self.url(&format!("/enderecos/{id}"));
        self.submit(self.client.delete(&url), &url).await
    }

    #[instrument(skip(self))]
    async fn set_primary_address(&self, id: &AddressId) -> Result<(), ApiError> {
        let url = self.url(&format!("/enderecos/{id}/principal"));
        self.submit(self.client.patch(&url).json(&serde_json::json!({})), &url)
            .await
    }

    #[instrument(skip(self))]
    async fn load_cart(&self, user: &UserId) -> Result<Cart, ApiError> {
        let url = self.url(&format!("/carrinho/{user}"));
        self.fetch(self.client.get(&url), &url).await
    }

    #[instrument(skip(self))]
    async fn add_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError> {
        let url = self.url(&format!("/carrinho/{user}/itens"));
        self.fetch(self.client.post(&url).json(request), &url).await
    }

    #[instrument(skip(self))]
    async fn update_cart_item(&self, user: &UserId, request: &CartItemRequest) -> Result<Cart, ApiError> {
        let url = self.url(&format!("/carrinho/{user}/itens/{}", request.product_id));
        self.fetch(self.client.put(&url).json(request), &url).await
    }

    #[instrument(skip(self))]
    async fn remove_cart_item(&self, user: &UserId, product: &ProductId) -> Result<Cart, ApiError> {
        let url = self.url(&format!("/carrinho/{user}/itens/{product}"));
        self.fetch(self.client.delete(&url), &url).await
    }

    #[instrument(skip(self))]
    async fn checkout(&self, user: &UserId) -> Result<Order, ApiError> {
        let url = self.url(&format!("/pedidos/checkout/{user}"));
        self.fetch(self.client.post(&url), &url).await
    }

    #[instrument(skip(self))]
    async fn express_checkout(
        &self,
        user: &UserId,
        request: &ExpressCheckoutRequest,
    ) -> Result<Order, ApiError> {
        let url = self.url(&format!("/pedidos/checkout/{user}"));
        self.fetch(self.client.post(&url).json(request), &url).await
    }

    #[instrument(skip(self, request))]
    async fn attach_delivery(&self, order: &OrderId, request: &DeliveryRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/pedidos/{order}/entrega"));
        self.submit(self.client.post(&url).json(request), &url).await
    }

    #[instrument(skip(self))]
    async fn register_payment(&self, order: &OrderId, request: &PaymentRequest) -> Result<(), ApiError> {
        let url = self.url(&format!("/pedidos/{order}/pagamento"));
        self.submit(self.client.post(&url).json(request), &url).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order: &OrderId) -> Result<Order, ApiError> {
        let url = self.url(&format!("/pedidos/{order}"));
        self.fetch(self.client.get(&url), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentMethod;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one request with the given status line and body and hands
    /// back the raw request that was received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                } else if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (base, handle)
    }

    #[test]
    fn test_urls_are_rooted_at_base() {
        let api = HttpApi::with_client(Client::new(), "http://localhost:8080/api/");
        assert_eq!(
            api.url("/enderecos/cliente/u1"),
            "http://localhost:8080/api/enderecos/cliente/u1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let api = HttpApi::with_client(Client::new(), "http://127.0.0.1:9");
        let err = api.get_order(&OrderId::from("1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_rejected_request_carries_backend_messages() {
        let (base, server) = serve_once("422 Unprocessable Entity", r#"["Cartão recusado"]"#).await;
        let api = HttpApi::with_client(Client::new(), &base);

        let err = api
            .register_payment(&OrderId::from("o-5"), &PaymentRequest::new(PaymentMethod::Credit, 215.82))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                url: format!("{base}/pedidos/o-5/pagamento"),
                status: 422,
                messages: vec!["Cartão recusado".to_string()],
            }
        );
        assert_eq!(err.first_message(), Some("Cartão recusado"));
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/pedidos/o-5/pagamento "), "{request}");
        assert!(request.contains("CARTAO_CREDITO"), "{request}");
    }

    #[tokio::test]
    async fn test_error_body_without_messages() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
        let api = HttpApi::with_client(Client::new(), &base);

        let err = api.get_order(&OrderId::from("o-6")).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, ref messages, .. } if messages.is_empty()));
        assert!(server.await.unwrap().starts_with("GET /api/pedidos/o-6 "));
    }
}
