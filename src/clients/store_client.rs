use crate::framework::{StateClient, StoreState};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for state-specific clients to inherit the read side of a store.
///
/// Domain clients only add their typed commands; observing the state is the
/// same for every store.
#[async_trait]
pub trait StoreClient<T: StoreState>: Send + Sync {
    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<T>;

    /// Last published snapshot.
    fn current(&self) -> T {
        self.inner().current()
    }

    /// Snapshot taken after every queued command has been applied.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<T, T::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(T::Error::from)
    }

    /// Receiver notified after every successful command.
    fn subscribe(&self) -> watch::Receiver<T> {
        self.inner().subscribe()
    }
}
