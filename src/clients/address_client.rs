use crate::address_book::{AddressBook, AddressCommand, AddressError, AddressForm, AddressOutcome};
use crate::clients::StoreClient;
use crate::framework::StateClient;
use crate::model::{Address, AddressId, UserId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the address-book state.
#[derive(Clone)]
pub struct AddressClient {
    inner: StateClient<AddressBook>,
}

impl AddressClient {
    pub fn new(inner: StateClient<AddressBook>) -> Self {
        Self { inner }
    }

    /// Fetches the customer's addresses and settles the selection.
    #[instrument(skip(self))]
    pub async fn load(&self, user: &UserId) -> Result<usize, AddressError> {
        match self.inner.dispatch(AddressCommand::Load(user.clone())).await? {
            AddressOutcome::Load(count) => Ok(count),
            other => unreachable!("Load answered with {other:?}"),
        }
    }

    /// Validates the form, then creates a new address (`editing == None`) or
    /// updates an existing one. New addresses are always saved as primary.
    #[instrument(skip(self, form))]
    pub async fn save(
        &self,
        user: &UserId,
        editing: Option<&AddressId>,
        form: &AddressForm,
    ) -> Result<Address, AddressError> {
        let mut request = form.validate()?;
        let command = match editing {
            Some(id) => AddressCommand::Update {
                id: id.clone(),
                request,
                user: user.clone(),
            },
            None => {
                request.primary = true;
                AddressCommand::Add {
                    user: user.clone(),
                    request,
                }
            }
        };
        debug!(?command, "Sending request");
        match self.inner.dispatch(command).await? {
            AddressOutcome::Add(saved) | AddressOutcome::Update(saved) => Ok(saved),
            other => unreachable!("Save answered with {other:?}"),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &AddressId, user: &UserId) -> Result<(), AddressError> {
        self.inner
            .dispatch(AddressCommand::Remove {
                id: id.clone(),
                user: user.clone(),
            })
            .await
            .map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn set_primary(&self, id: &AddressId, user: &UserId) -> Result<(), AddressError> {
        self.inner
            .dispatch(AddressCommand::SetPrimary {
                id: id.clone(),
                user: user.clone(),
            })
            .await
            .map(|_| ())
    }

    /// Picks the delivery address for checkout.
    pub async fn select(&self, id: &AddressId) -> Result<(), AddressError> {
        self.inner
            .dispatch(AddressCommand::Select(id.clone()))
            .await
            .map(|_| ())
    }

    /// Form pre-filled with a saved address, for editing it.
    pub fn edit_form(&self, id: &AddressId) -> Result<AddressForm, AddressError> {
        self.inner
            .current()
            .get(id)
            .map(AddressForm::from_address)
            .ok_or_else(|| AddressError::NotFound(id.clone()))
    }

    /// Drops the local copy of the book, selection included.
    pub async fn clear(&self) -> Result<(), AddressError> {
        self.inner.dispatch(AddressCommand::Clear).await.map(|_| ())
    }
}

#[async_trait]
impl StoreClient<AddressBook> for AddressClient {
    fn inner(&self) -> &StateClient<AddressBook> {
        &self.inner
    }
}
