//! Invariant checker for selection states
//!
//! Every state returned by the engine satisfies these; a state loaded from
//! storage may not, which is why the engine re-validates on each update.

use crate::engine::SelectionEngine;
use crate::error::{InvariantViolation, Result};
use crate::state::SelectionState;
use placement_core::DefaultRegionResolver;
use std::collections::HashSet;

/// Check all invariants. Returns the first one violated.
pub fn check_invariants<R: DefaultRegionResolver>(
    engine: &SelectionEngine<'_, R>,
    state: &SelectionState,
) -> Result<()> {
    // Instance offered under the category
    if let Some(instance) = &state.selected_instance {
        let offered = engine
            .filter_instances(state.instance_category)
            .iter()
            .any(|candidate| *candidate == instance);
        if !offered {
            return Err(InvariantViolation::instance_not_offered(
                instance.id.clone(),
                state.instance_category,
            ));
        }
    }

    // Regions offered under scope + instance, each once
    let regions = engine.filter_regions(state.region_scope, state.selected_instance.as_ref());
    let mut seen = HashSet::new();
    for region in &state.selected_regions {
        if !regions.iter().any(|candidate| *candidate == region) {
            return Err(InvariantViolation::region_not_offered(
                region.id.clone(),
                state.region_scope,
            ));
        }
        if !seen.insert(region.id.as_str()) {
            return Err(InvariantViolation::DuplicateRegion(region.id.clone()));
        }
    }

    // Single-region mode
    if engine.is_single_region(state.selected_instance.as_ref()) && state.selected_regions.len() > 1 {
        return Err(InvariantViolation::TooManyRegions(state.selected_regions.len()));
    }

    Ok(())
}
