//! Shopping cart state, mirrored from the backend.

pub mod error;
pub mod state;

pub use error::*;
pub use state::*;

use crate::clients::CartClient;
use crate::framework::StateActor;

/// Creates a new cart actor and its client.
pub fn new(buffer_size: usize) -> (StateActor<CartState>, CartClient) {
    let (actor, generic_client) = StateActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
