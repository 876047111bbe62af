//! Filtering predicates shared by every transition
//!
//! The instance picker and the region picker both show a filtered view of
//! the catalog. The same filters decide what a valid selection is, so the
//! engine re-runs them on every update instead of trusting the stored state.

use placement_core::{Catalog, Instance, InstanceCategory, Region, RegionScope};

/// Prefix of legacy partner ids hidden from both pickers
pub const HIDDEN_ID_PREFIX: &str = "aws-";

/// Id of the free-tier instance, which implies single-region mode
pub const FREE_TIER_INSTANCE_ID: &str = "free";

/// Check if a catalog id is hidden from the pickers
pub fn is_hidden(id: &str) -> bool {
    id.starts_with(HIDDEN_ID_PREFIX)
}

/// Check if an instance is the free-tier instance
pub fn is_free_tier_instance(instance: &Instance) -> bool {
    instance.id == FREE_TIER_INSTANCE_ID
}

/// Check if the selection is limited to a single region
///
/// Either the catalog asks for it, or the selected instance is the free tier.
pub fn is_single_region(catalog: &Catalog, instance: Option<&Instance>) -> bool {
    catalog.single_region || instance.is_some_and(is_free_tier_instance)
}

/// Instances shown for a category: visible, matching and available
pub fn filter_instances(catalog: &Catalog, category: InstanceCategory) -> Vec<&Instance> {
    catalog
        .instances
        .iter()
        .filter(|instance| !is_hidden(&instance.id))
        .filter(|instance| instance.category == category)
        .filter(|instance| catalog.is_available(&instance.id))
        .collect()
}

/// Regions shown for a scope: visible, matching, available and compatible
/// with the instance's region allow-list
pub fn filter_regions<'a>(
    catalog: &'a Catalog,
    scope: RegionScope,
    instance: Option<&Instance>,
) -> Vec<&'a Region> {
    catalog
        .regions
        .iter()
        .filter(|region| !is_hidden(&region.id))
        .filter(|region| region.scope == scope)
        .filter(|region| region.is_available())
        .filter(|region| instance.is_none_or(|instance| instance.supports_region(&region.id)))
        .collect()
}
