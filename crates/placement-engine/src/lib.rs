//! # Placement Selection Engine
//!
//! Derives a valid instance + region selection from a catalog snapshot and
//! user actions.
//!
//! ## Architecture
//!
//! ```text
//! Caller (UI, CLI)              Engine (pure)
//! ├── holds SelectionState ──→  update(state, change)
//! ├── renders SelectionView ←── view(state)
//! └── stores next state    ←──  reduce / dispatch(commit)
//! ```
//!
//! The engine owns no state and performs no I/O:
//! - Filtering of instances (category, availability) and regions (scope,
//!   status, instance allow-list)
//! - Auto-selection of the first offered instance
//! - GPU category forces the continental scope
//! - Default-region fallback through an injected resolver, then the other scope
//! - Single-region mode (catalog flag, or the free-tier instance)
//!
//! See [`engine`] for the transition order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod availability;
pub mod billing;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod invariants;
pub mod state;
pub mod view;

// ============================================================================
// Public exports - Selection engine
// ============================================================================

pub use engine::SelectionEngine;
pub use state::{toggle_region, SelectionAction, SelectionChange, SelectionState};
pub use view::SelectionView;

// Filtering predicates
pub use filter::{
    filter_instances, filter_regions, is_free_tier_instance, is_hidden, is_single_region,
    FREE_TIER_INSTANCE_ID, HIDDEN_ID_PREFIX,
};

// Default-region fallback
pub use fallback::{default_region, resolve_fallback, FallbackSource, RegionFallback};

// Invariant checking
pub use error::{InvariantViolation, Result};
pub use invariants::check_invariants;

// ============================================================================
// Public exports - Business rules around the selection
// ============================================================================

pub use availability::{derive_availabilities, instance_availability, with_derived_availabilities};
pub use billing::{is_tenstorrent_gpu, should_add_credit_card};
pub use config::SelectionConfig;
