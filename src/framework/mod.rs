//! Generic state-container engine for session state.
//!
//! # Main Components
//!
//! - [`StoreState`] - Trait that session states implement to be driven by an actor
//! - [`StateActor`] - Task that owns a state and applies commands sequentially
//! - [`StateClient`] - Cloneable handle for dispatching commands and subscribing to snapshots
//! - [`FrameworkError`] - Channel-level errors

pub mod core;

pub use core::*;
