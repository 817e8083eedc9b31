//! Domain layer: order entities, typed field access and document loading
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod encoding;
pub mod entities;
pub mod error;
pub mod fields;
pub mod loader;

pub use encoding::decode;
pub use entities::{Address, LineItem, PurchaseOrder};
pub use error::{DomainError, DomainResult};
pub use fields::{element_text, Fields};
pub use loader::{load, parse};
