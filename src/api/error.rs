//! Error types for backend calls.

use thiserror::Error;

/// Errors that can occur while talking to the backend or the postal service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    ///
    /// `messages` holds the backend's validation messages when the error body
    /// was an array of strings.
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: u16,
        messages: Vec<String>,
    },

    /// The response body did not match the expected shape.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The HTTP client itself could not be built.
    #[error("http client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Shorthand for a status error without validation messages.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        ApiError::Status {
            url: url.into(),
            status,
            messages: Vec::new(),
        }
    }

    /// Status error carrying the backend's validation messages.
    pub fn rejected(url: impl Into<String>, status: u16, messages: Vec<String>) -> Self {
        ApiError::Status {
            url: url.into(),
            status,
            messages,
        }
    }

    /// First backend validation message, if the failure carried any.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { messages, .. } => messages.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Extracts the backend's validation messages from an error body.
///
/// Only a JSON array of strings counts; any other body yields nothing.
pub fn validation_messages(body: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_only_from_string_arrays() {
        assert_eq!(
            validation_messages(r#"["Valor divergente do total do pedido", "outro"]"#),
            vec!["Valor divergente do total do pedido".to_string(), "outro".to_string()]
        );
        assert!(validation_messages(r#"{"message": "boom"}"#).is_empty());
        assert!(validation_messages("Internal Server Error").is_empty());
    }

    #[test]
    fn test_first_message() {
        let err = ApiError::rejected("/pedidos/1/pagamento", 400, vec!["Cartão recusado".into()]);
        assert_eq!(err.first_message(), Some("Cartão recusado"));
        assert_eq!(ApiError::status("/x", 500).first_message(), None);
    }
}
