//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! verbosity comes from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **State actors**: startup, every applied or failed command, shutdown
//! - **Backend calls**: one span per request with the response status
//! - **Checkout**: order creation, delivery attachment, payment outcome
//! - **Notices**: every message shown to the user (debug level)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run -- <order-id>
//!
//! # Full command payloads and request spans
//! RUST_LOG=debug cargo run -- <order-id>
//!
//! # Only the checkout flow
//! RUST_LOG=obra_storefront::checkout=debug cargo run -- <order-id>
//! ```
//!
//! With `RUST_LOG=info` a successful checkout reads:
//!
//! ```text
//! INFO confirm{method=Pix}: Order created order=9f1c
//! INFO confirm{method=Pix}: Delivery attached order=9f1c
//! INFO confirm{method=Pix}: Payment registered order=9f1c amount=215.82
//! INFO state_type="CartState" Applied
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
