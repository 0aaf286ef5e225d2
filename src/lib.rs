//! # Obra Storefront
//!
//! > **The client-side core of a construction-materials storefront.**
//!
//! This crate holds everything a storefront UI needs below the rendering layer:
//! the customer's cart, address book and favorites, the checkout sequence, and
//! the order-status timeline. It talks to a remote REST backend and to a
//! postal-code lookup service; it never renders anything. User-facing results
//! come out as plain [`Notice`](notify::Notice) and [`Route`](notify::Route)
//! values.
//!
//! ## Core Concepts
//!
//! ### State Containers
//! Session state lives in [`StateActor<T: StoreState>`](framework::StateActor)
//! tasks. Each one owns its value, applies commands one at a time and publishes
//! a snapshot through a `watch` channel after every successful command.
//! The same loop drives the cart, the address book and the favorites list.
//!
//! ### The Backend Seam
//! All network access goes through the [`StoreApi`](api::StoreApi) trait.
//! [`HttpApi`](api::HttpApi) is the `reqwest` implementation; tests use
//! [`MockApi`](api::mock::MockApi), a fluent expectation mock.
//!
//! ## Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each module defines its own error type (`CartError`, `AddressError`,
//! `CheckoutError`, ...). Channel failures convert into each of them through
//! `#[from]`, so `?` works across layers.
//!
//! ### 2. Context Injection
//! The backend is handed to each actor when it starts (`run(api)`), not when it
//! is built. Favorites run with `()`: they are local only.
//!
//! ### 3. Nothing Is Fatal
//! Failures become notices. A failed checkout step stops the sequence and says
//! what happened; nothing is retried.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic state-container engine.
//! - [`model`]: wire types for orders, carts, addresses and favorites.
//! - [`api`]: the backend trait, its HTTP client and the mock.
//! - [`cart`], [`address_book`], [`favorites`]: the state containers.
//! - [`clients`]: typed handles over the containers.
//! - [`timeline`]: order status to progress steps.
//! - [`checkout`]: create order, attach delivery, register payment.
//! - [`tracking`]: the order detail page.
//! - [`postal`]: postal-code lookup.
//! - [`lifecycle`]: [`Session`](lifecycle::Session) wiring and tracing setup.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info STOREFRONT_API_URL=http://localhost:8080/api cargo run -- <order-id>
//! ```

pub mod address_book;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod favorites;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod postal;
pub mod timeline;
pub mod tracking;
