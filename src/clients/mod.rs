//! Type-safe wrappers around [`StateClient`](crate::framework::StateClient).

pub mod address_client;
pub mod cart_client;
pub mod favorites_client;
pub mod store_client;

pub use address_client::*;
pub use cart_client::*;
pub use favorites_client::*;
pub use store_client::*;
