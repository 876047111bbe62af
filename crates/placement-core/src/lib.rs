//! Placement Core - Shared types and traits
//!
//! This crate defines the data the selection engine works over:
//! - Instance and Region descriptors, categories, scopes and statuses
//! - The Catalog snapshot with its availability lookup
//! - DefaultRegionResolver (injected default-region heuristic)
//! - Error types

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::*;
pub use error::*;
pub use traits::*;
pub use types::*;
