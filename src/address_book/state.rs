//! [`StoreState`] implementation for the address book.

use crate::address_book::AddressError;
use crate::api::StoreApi;
use crate::framework::StoreState;
use crate::model::{Address, AddressId, AddressRequest, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// The customer's saved addresses and the one picked for delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressBook {
    pub addresses: Vec<Address>,
    pub selected: Option<AddressId>,
}

impl AddressBook {
    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    pub fn primary(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.primary)
    }

    pub fn selected_address(&self) -> Option<&Address> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Replaces the list and keeps the selection pointing at a listed
    /// address: the primary one if possible, else the first.
    fn replace(&mut self, addresses: Vec<Address>) {
        self.addresses = addresses;
        let still_listed = self.selected.as_ref().is_some_and(|id| self.get(id).is_some());
        if !still_listed {
            self.selected = self
                .primary()
                .or_else(|| self.addresses.first())
                .map(|a| a.id.clone());
        }
    }

    /// Re-fetches the list after a mutation. The mutation already happened,
    /// so a failed refresh is logged and the stale list kept.
    async fn refresh(&mut self, user: &UserId, api: &Arc<dyn StoreApi>) {
        match api.list_addresses(user).await {
            Ok(addresses) => self.replace(addresses),
            Err(e) => warn!(%user, error = %e, "Address reload failed"),
        }
    }
}

/// Mutations of the address book.
#[derive(Debug, Clone)]
pub enum AddressCommand {
    Load(UserId),
    Add {
        user: UserId,
        request: AddressRequest,
    },
    Update {
        id: AddressId,
        request: AddressRequest,
        user: UserId,
    },
    Remove {
        id: AddressId,
        user: UserId,
    },
    SetPrimary {
        id: AddressId,
        user: UserId,
    },
    Select(AddressId),
    /// Forgets every address and the selection without telling the backend.
    /// Used when the customer signs out or another customer signs in.
    Clear,
}

/// Results of [`AddressCommand`]s - variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressOutcome {
    Load(usize),
    Add(Address),
    Update(Address),
    Remove,
    SetPrimary,
    Select,
    Clear,
}

#[async_trait]
impl StoreState for AddressBook {
    type Command = AddressCommand;
    type Output = AddressOutcome;
    type Error = AddressError;
    type Context = Arc<dyn StoreApi>;

    async fn apply(
        &mut self,
        command: AddressCommand,
        api: &Arc<dyn StoreApi>,
    ) -> Result<AddressOutcome, AddressError> {
        match command {
            AddressCommand::Load(user) => {
                let addresses = api.list_addresses(&user).await?;
                self.replace(addresses);
                Ok(AddressOutcome::Load(self.addresses.len()))
            }
            AddressCommand::Add { user, request } => {
                let saved = api.add_address(&user, &request).await?;
                self.selected = Some(saved.id.clone());
                self.refresh(&user, api).await;
                Ok(AddressOutcome::Add(saved))
            }
            AddressCommand::Update { id, request, user } => {
                let saved = api.update_address(&id, &request).await?;
                self.refresh(&user, api).await;
                Ok(AddressOutcome::Update(saved))
            }
            AddressCommand::Remove { id, user } => {
                api.remove_address(&id).await?;
                if self.selected.as_ref() == Some(&id) {
                    self.selected = None;
                }
                self.addresses.retain(|a| a.id != id);
                self.refresh(&user, api).await;
                Ok(AddressOutcome::Remove)
            }
            AddressCommand::SetPrimary { id, user } => {
                api.set_primary_address(&id).await?;
                self.selected = Some(id);
                self.refresh(&user, api).await;
                Ok(AddressOutcome::SetPrimary)
            }
            AddressCommand::Select(id) => {
                if self.get(&id).is_none() {
                    return Err(AddressError::NotFound(id));
                }
                self.selected = Some(id);
                Ok(AddressOutcome::Select)
            }
            AddressCommand::Clear => {
                *self = AddressBook::default();
                Ok(AddressOutcome::Clear)
            }
        }
    }
}
