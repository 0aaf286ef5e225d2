//! Pure data structures exchanged with the backend, with their wire names.

pub mod address;
pub mod cart;
pub mod favorite;
pub mod ids;
pub mod order;
pub(crate) mod serde_ext;

pub use address::*;
pub use cart::*;
pub use favorite::*;
pub use ids::*;
pub use order::*;
