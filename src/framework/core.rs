//! # State Container Engine
//!
//! This module defines the generic building blocks for session state.
//!
//! ## Key Types
//!
//! - [`StoreState`]: The trait that every session state (cart, address book, favorites) implements.
//! - [`StateActor`]: The task that owns a state value and applies commands to it one at a time.
//! - [`StateClient`]: The cloneable handle used to dispatch commands and observe snapshots.
//! - [`FrameworkError`]: Channel-level failures (actor gone, response dropped).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any session state must implement to be driven by a [`StateActor`].
///
/// # Architecture Note
/// The state value is owned by exactly one task. Every mutation arrives as a
/// `Command` and is applied sequentially, so the state itself needs no locks.
/// After a successful command the actor publishes a fresh snapshot to every
/// subscriber, which is how views learn about changes.
///
/// # Async & Context
/// `apply` is async because most commands round-trip to the backend before the
/// state changes. The `Context` carries those dependencies and is injected when
/// the actor starts (`run(context)`), not at construction time.
///
/// Implementations must leave the state untouched when they return `Err`.
#[async_trait]
pub trait StoreState: Clone + Default + Send + Sync + 'static {
    /// Mutation requests understood by this state.
    type Command: Send + Sync + Debug;

    /// Value handed back to the caller of a command.
    type Output: Send + Sync + Debug;

    /// Error returned by `apply`. Must absorb channel failures.
    type Error: From<FrameworkError> + Display + Send + Sync + 'static;

    /// The runtime dependencies injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Apply one command to the state.
    async fn apply(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Output, Self::Error>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors raised by the channel plumbing between client and actor.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("State actor closed")]
    ActorClosed,
    #[error("State actor dropped response channel")]
    ActorDropped,
}

/// Internal message type sent to the actor.
#[derive(Debug)]
pub enum StateRequest<T: StoreState> {
    Dispatch {
        command: T::Command,
        respond_to: oneshot::Sender<Result<T::Output, T::Error>>,
    },
    Snapshot {
        respond_to: oneshot::Sender<T>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

/// The task half of a state container.
///
/// **Concurrency Model**:
/// Commands are processed in arrival order. While one command awaits the
/// backend, later commands wait in the channel, so mutations never interleave.
pub struct StateActor<T: StoreState> {
    receiver: mpsc::Receiver<StateRequest<T>>,
    state: T,
    publisher: watch::Sender<T>,
}

impl<T: StoreState> StateActor<T> {
    pub fn new(buffer_size: usize) -> (Self, StateClient<T>) {
        Self::with_state(buffer_size, T::default())
    }

    /// Like [`StateActor::new`], but seeded with an initial state.
    pub fn with_state(buffer_size: usize, state: T) -> (Self, StateClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, snapshots) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            state,
            publisher,
        };
        (actor, StateClient::new(sender, snapshots))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let state_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "State actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Dispatch { command, respond_to } => {
                    debug!(state_type, ?command, "Dispatch");
                    let result = self.state.apply(command, &context).await;
                    match &result {
                        Ok(_) => {
                            self.publisher.send_replace(self.state.clone());
                            info!(state_type, "Applied");
                        }
                        Err(e) => warn!(state_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StateRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }

        info!(state_type, "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A type-safe handle for interacting with a [`StateActor`].
#[derive(Clone)]
pub struct StateClient<T: StoreState> {
    sender: mpsc::Sender<StateRequest<T>>,
    snapshots: watch::Receiver<T>,
}

impl<T: StoreState> StateClient<T> {
    pub fn new(sender: mpsc::Sender<StateRequest<T>>, snapshots: watch::Receiver<T>) -> Self {
        Self { sender, snapshots }
    }

    /// Send a command and wait for the actor to apply it.
    pub async fn dispatch(&self, command: T::Command) -> Result<T::Output, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Dispatch { command, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Fetch the state after every previously queued command has run.
    pub async fn snapshot(&self) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Last published snapshot, without a round-trip to the actor.
    pub fn current(&self) -> T {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified every time a command succeeds.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.snapshots.clone()
    }
}
