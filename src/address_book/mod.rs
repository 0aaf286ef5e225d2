//! Address book: saved delivery addresses, the selected one, and the form
//! used to create or edit them.

pub mod error;
pub mod form;
pub mod state;

pub use error::*;
pub use form::*;
pub use state::*;

use crate::clients::AddressClient;
use crate::framework::StateActor;

/// Creates a new address-book actor and its client.
pub fn new(buffer_size: usize) -> (StateActor<AddressBook>, AddressClient) {
    let (actor, generic_client) = StateActor::new(buffer_size);
    (actor, AddressClient::new(generic_client))
}
