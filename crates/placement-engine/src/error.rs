//! Error types for the selection engine
//!
//! Transitions never fail. The only error the engine reports is a broken
//! invariant found by [`crate::invariants::check_invariants`], which means a
//! state was built or edited outside the engine.

use thiserror::Error;

/// Result type for invariant checks
pub type Result<T> = std::result::Result<T, InvariantViolation>;

/// A selection invariant that does not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Selected instance is not offered under the stored category
    #[error("Instance {instance} is not offered in category {category}")]
    InstanceNotOffered {
        /// Instance id
        instance: String,
        /// Category tab it was stored under
        category: String,
    },

    /// A selected region is not offered for the stored scope and instance
    #[error("Region {region} is not offered in scope {scope} for the selected instance")]
    RegionNotOffered {
        /// Region id
        region: String,
        /// Scope tab it was stored under
        scope: String,
    },

    /// Single-region mode with more than one region selected
    #[error("Single-region mode allows one region, {0} selected")]
    TooManyRegions(usize),

    /// Same region selected twice
    #[error("Region {0} selected more than once")]
    DuplicateRegion(String),
}

impl InvariantViolation {
    /// Create an instance-not-offered violation
    pub fn instance_not_offered(instance: impl Into<String>, category: impl ToString) -> Self {
        Self::InstanceNotOffered {
            instance: instance.into(),
            category: category.to_string(),
        }
    }

    /// Create a region-not-offered violation
    pub fn region_not_offered(region: impl Into<String>, scope: impl ToString) -> Self {
        Self::RegionNotOffered {
            region: region.into(),
            scope: scope.to_string(),
        }
    }
}
