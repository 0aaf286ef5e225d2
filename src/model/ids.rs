//! Type-safe identifiers for backend resources.
//!
//! The backend hands out opaque string ids (UUIDs in practice). Wrapping them
//! keeps an address id from being passed where an order id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of an authenticated customer.
    UserId
);
string_id!(
    /// Identifier of a catalog product.
    ProductId
);
string_id!(
    /// Identifier of a placed order.
    OrderId
);
string_id!(
    /// Identifier of a saved delivery address.
    AddressId
);
