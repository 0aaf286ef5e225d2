//! Postal-code (CEP) lookup.
//!
//! Resolving a CEP to street data is delegated to a ViaCEP-compatible
//! service. This module only normalises the code, calls the service and
//! interprets its "not found" convention.

use crate::api::ApiError;
use crate::config::StorefrontConfig;
use crate::model::PostalAddress;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostalError {
    /// The input does not contain exactly eight digits.
    #[error("postal code must have 8 digits, got `{0}`")]
    InvalidCode(String),

    #[error(transparent)]
    Lookup(#[from] ApiError),
}

/// An eight-digit Brazilian postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Strips everything but digits; accepts the result only if 8 digits remain.
    pub fn parse(raw: &str) -> Result<Self, PostalError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == 8 {
            Ok(Self(digits))
        } else {
            Err(PostalError::InvalidCode(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// `Ok(None)` when the service does not know the code.
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>, ApiError>;
}

/// [`PostalLookup`] against `GET {base}/{cep}/json/`.
#[derive(Debug, Clone)]
pub struct ViaCep {
    client: Client,
    base_url: String,
}

impl ViaCep {
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.postal_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PostalLookup for ViaCep {
    #[instrument(skip(self), fields(cep = %code))]
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>, ApiError> {
        let url = format!("{}/{}/json/", self.base_url, code);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(url, status.as_u16()));
        }
        let body: Value = response.json().await.map_err(|e| ApiError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;
        debug!(?body, "Postal lookup response");
        interpret_response(body).map_err(|message| ApiError::Decode { url, message })
    }
}

/// ViaCEP answers unknown codes with `{"erro": true}` (older deployments use
/// the string `"true"`).
fn interpret_response(body: Value) -> Result<Option<PostalAddress>, String> {
    let not_found = match body.get("erro") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag == "true",
        _ => false,
    };
    if not_found {
        return Ok(None);
    }
    serde_json::from_value(body).map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_postal_code_is_normalised() {
        assert_eq!(PostalCode::parse("01310-100").unwrap().as_str(), "01310100");
        assert_eq!(PostalCode::parse(" 01310100 ").unwrap().as_str(), "01310100");
        assert!(matches!(
            PostalCode::parse("1310-100"),
            Err(PostalError::InvalidCode(_))
        ));
        assert!(PostalCode::parse("013101000").is_err());
    }

    #[test]
    fn test_not_found_marker() {
        assert_eq!(interpret_response(json!({ "erro": true })).unwrap(), None);
        assert_eq!(interpret_response(json!({ "erro": "true" })).unwrap(), None);
    }

    #[test]
    fn test_found_address_fields() {
        let body = json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        });
        let address = interpret_response(body).unwrap().unwrap();
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.neighborhood, "Bela Vista");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.uf, "SP");
    }
}
