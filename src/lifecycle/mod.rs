//! Session lifecycle and observability.
//!
//! - [`Session`] - Starts the state actors for one customer session, wires
//!   them to the backend and exposes the page-level operations
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod session;
pub mod tracing;

pub use self::tracing::*;
pub use session::*;
