use crate::address_book::{AddressError, AddressForm};
use crate::api::{ApiError, HttpApi, StoreApi};
use crate::checkout::{Checkout, CheckoutInput, CheckoutOutcome};
use crate::clients::{AddressClient, CartClient, FavoritesClient, StoreClient};
use crate::config::StorefrontConfig;
use crate::favorites::FavoritesError;
use crate::model::{Address, AddressId, Favorite, PaymentMethod, PostalAddress, ProductId, UserId};
use crate::notify::{Notice, Notifier};
use crate::postal::{PostalCode, PostalError, PostalLookup, ViaCep};
use crate::tracking::{OrderTracker, Tracking};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, instrument, warn};

/// One customer's storefront session.
///
/// `Session` is responsible for:
/// - **Lifecycle Management**: starting the cart, address-book and favorites
///   actors and stopping them at the end of the session
/// - **Dependency Wiring**: handing every actor the backend it talks to
/// - **Page Operations**: the actions the pages trigger, each translated into
///   a [`Notice`] published on the session's [`Notifier`]
///
/// # Example
///
/// ```ignore
/// let mut session = Session::connect(&StorefrontConfig::from_env()?)?;
/// session.sign_in(UserId::from("42")).await;
/// let outcome = session.checkout(PaymentMethod::Pix).await;
/// session.shutdown().await?;
/// ```
pub struct Session {
    pub cart: CartClient,
    pub addresses: AddressClient,
    pub favorites: FavoritesClient,
    pub checkout: Checkout,
    pub tracker: OrderTracker,
    user: Option<UserId>,
    postal: Arc<dyn PostalLookup>,
    notifier: Notifier,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Session {
    /// Starts a session against the configured HTTP backend and postal service.
    pub fn connect(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let api: Arc<dyn StoreApi> = Arc::new(HttpApi::new(config)?);
        let postal: Arc<dyn PostalLookup> = Arc::new(ViaCep::new(config)?);
        Ok(Self::start(config, api, postal, Vec::new()))
    }

    /// Starts the state actors with explicit dependencies.
    pub fn start(
        config: &StorefrontConfig,
        api: Arc<dyn StoreApi>,
        postal: Arc<dyn PostalLookup>,
        favorites: Vec<Favorite>,
    ) -> Self {
        // 1. Create actors
        let (cart_actor, cart) = crate::cart::new(config.store_buffer);
        let (address_actor, addresses) = crate::address_book::new(config.store_buffer);
        let (favorites_actor, favorites) = crate::favorites::new(config.store_buffer, favorites);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(cart_actor.run(api.clone())),
            tokio::spawn(address_actor.run(api.clone())),
            tokio::spawn(favorites_actor.run(())),
        ];

        info!(api_url = %config.api_url, "Session started");
        Self {
            checkout: Checkout::new(api.clone(), cart.clone(), config),
            tracker: OrderTracker::new(api),
            cart,
            addresses,
            favorites,
            user: None,
            postal,
            notifier: Notifier::new(config.notice_capacity),
            handles,
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Receiver for every notice the session publishes.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    /// Sets the signed-in customer and reloads the cart and address book for
    /// them. When another customer was signed in, their state is discarded
    /// first, so a failed load leaves the pages empty.
    #[instrument(skip(self))]
    pub async fn sign_in(&mut self, user: UserId) {
        if self.user.as_ref() == Some(&user) {
            return;
        }
        if self.user.is_some() {
            self.discard_user_state().await;
        }
        self.user = Some(user.clone());
        if let Err(e) = self.cart.load(&user).await {
            warn!(%user, error = %e, "Cart load failed");
        }
        if let Err(e) = self.addresses.load(&user).await {
            warn!(%user, error = %e, "Address load failed");
        }
    }

    /// Forgets the customer and everything loaded for them.
    #[instrument(skip(self))]
    pub async fn sign_out(&mut self) {
        self.user = None;
        self.discard_user_state().await;
    }

    async fn discard_user_state(&self) {
        if let Err(e) = self.cart.clear_local().await {
            warn!(error = %e, "Could not clear cart");
        }
        if let Err(e) = self.addresses.clear().await {
            warn!(error = %e, "Could not clear address book");
        }
        if let Err(e) = self.favorites.clear().await {
            warn!(error = %e, "Could not clear favorites");
        }
    }

    fn publish(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Creates (`editing == None`) or updates an address from the form.
    ///
    /// An invalid form is rejected without a request and without a notice;
    /// the form itself shows the field problems.
    #[instrument(skip(self, form))]
    pub async fn save_address(
        &self,
        editing: Option<&AddressId>,
        form: &AddressForm,
    ) -> Result<Address, AddressError> {
        let user = self.user.as_ref().ok_or(AddressError::SignedOut)?;
        let result = self.addresses.save(user, editing, form).await;
        match (&result, editing) {
            (Ok(_), None) => self.publish(Notice::success("Address added and selected!")),
            (Ok(_), Some(_)) => self.publish(Notice::success("Address updated!")),
            (Err(AddressError::Invalid(_)), _) => {}
            (Err(_), None) => self.publish(Notice::error("Could not save the address.")),
            (Err(_), Some(_)) => self.publish(Notice::error("Could not update the address.")),
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), AddressError> {
        let user = self.user.as_ref().ok_or(AddressError::SignedOut)?;
        let result = self.addresses.remove(id, user).await;
        self.publish(match &result {
            Ok(()) => Notice::info("Address removed."),
            Err(_) => Notice::error("Could not remove the address."),
        });
        result
    }

    #[instrument(skip(self))]
    pub async fn set_primary_address(&self, id: &AddressId) -> Result<(), AddressError> {
        let user = self.user.as_ref().ok_or(AddressError::SignedOut)?;
        let result = self.addresses.set_primary(id, user).await;
        self.publish(match &result {
            Ok(()) => Notice::success("Primary address updated."),
            Err(_) => Notice::error("Could not update the primary address."),
        });
        result
    }

    /// Looks up the form's postal code and fills in the street data.
    ///
    /// A code without eight digits returns [`PostalError::InvalidCode`]
    /// without a request and without a notice. An unknown code marks the
    /// form's postal code as invalid.
    #[instrument(skip(self, form), fields(cep = %form.cep))]
    pub async fn lookup_postal_code(
        &self,
        form: &mut AddressForm,
    ) -> Result<Option<PostalAddress>, PostalError> {
        let code = PostalCode::parse(&form.cep)?;
        match self.postal.lookup(&code).await {
            Ok(Some(found)) => {
                form.apply_postal(&found);
                self.publish(Notice::success("Address found!").titled("Success"));
                Ok(Some(found))
            }
            Ok(None) => {
                form.cep_unknown = true;
                self.publish(Notice::warning("Postal code not found.").titled("Attention"));
                Ok(None)
            }
            Err(e) => {
                self.publish(Notice::error("Could not look up the postal code.").titled("Error"));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub async fn remove_favorite(&self, id: &ProductId) -> Result<usize, FavoritesError> {
        let remaining = self.favorites.remove(id).await?;
        self.publish(Notice::info("Product removed from favorites."));
        Ok(remaining)
    }

    pub async fn clear_favorites(&self) -> Result<(), FavoritesError> {
        self.favorites.clear().await?;
        self.publish(Notice::info("Favorites list cleared."));
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_favorite_to_cart(&self, id: &ProductId) -> Result<Favorite, FavoritesError> {
        let result = self
            .favorites
            .add_to_cart(&self.cart, self.user.as_ref(), id)
            .await;
        self.publish(match &result {
            Ok(favorite) => Notice::success(format!("{} added to cart!", favorite.name)),
            Err(FavoritesError::SignedOut) => Notice::warning("Sign in to add products to the cart."),
            Err(_) => Notice::error("Could not add the product."),
        });
        result
    }

    // =========================================================================
    // Checkout & orders
    // =========================================================================

    async fn checkout_input(&self, method: PaymentMethod) -> CheckoutInput {
        let cart = match self.cart.snapshot().await {
            Ok(state) => state.cart,
            Err(_) => self.cart.current().cart,
        };
        let addresses = match self.addresses.snapshot().await {
            Ok(book) => book,
            Err(_) => self.addresses.current(),
        };
        CheckoutInput {
            user: self.user.clone(),
            cart,
            addresses,
            method,
        }
    }

    /// Places the order for the current cart and selected address.
    pub async fn checkout(&self, method: PaymentMethod) -> CheckoutOutcome {
        let input = self.checkout_input(method).await;
        let outcome = self.checkout.confirm(&input).await;
        self.publish(outcome.notice.clone());
        outcome
    }

    /// Like [`Session::checkout`], letting the backend build the delivery.
    pub async fn checkout_express(&self, method: PaymentMethod) -> CheckoutOutcome {
        let input = self.checkout_input(method).await;
        let outcome = self.checkout.confirm_express(&input).await;
        self.publish(outcome.notice.clone());
        outcome
    }

    /// Opens the order page for `id`.
    pub async fn open_order(&self, id: Option<&str>) -> Tracking {
        let tracking = self.tracker.open(id).await;
        if let Tracking::Redirect {
            notice: Some(notice),
            ..
        } = &tracking
        {
            self.publish(notice.clone());
        }
        tracking
    }

    /// Ends the session.
    ///
    /// Dropping the clients closes the actor channels; each actor then
    /// leaves its loop and its task completes.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down session...");

        drop(self.checkout);
        drop(self.cart);
        drop(self.addresses);
        drop(self.favorites);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("State actor failed: {:?}", e);
                return Err(format!("State actor failed: {:?}", e));
            }
        }

        info!("Session closed.");
        Ok(())
    }
}
