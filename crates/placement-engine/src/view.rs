//! Read-only view of a selection for rendering

use crate::filter::{filter_instances, filter_regions};
use crate::state::SelectionState;
use placement_core::{Catalog, Instance, InstanceCategory, Region, RegionScope};
use serde::Serialize;

/// Everything a picker needs to render one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView<'a> {
    /// Active category tab
    pub instance_category: InstanceCategory,

    /// Active scope tab, or `None` when the other scope has nothing to offer
    /// for the current instance (the scope switch should be hidden)
    pub region_scope: Option<RegionScope>,

    /// Selected instance
    pub selected_instance: Option<Instance>,

    /// Selected regions, oldest first
    pub selected_regions: Vec<Region>,

    /// Instances offered under the active category
    pub instances: Vec<&'a Instance>,

    /// Regions offered under the stored scope for the selected instance
    pub regions: Vec<&'a Region>,
}

impl<'a> SelectionView<'a> {
    /// Build the view of `state` over `catalog`
    pub fn build(catalog: &'a Catalog, state: &SelectionState) -> Self {
        let instance = state.selected_instance.as_ref();

        // Computed once here so every read within a render agrees
        let region_scope = if filter_regions(catalog, state.region_scope.other(), instance).is_empty() {
            None
        } else {
            Some(state.region_scope)
        };

        Self {
            instance_category: state.instance_category,
            region_scope,
            selected_instance: state.selected_instance.clone(),
            selected_regions: state.selected_regions.clone(),
            instances: filter_instances(catalog, state.instance_category),
            regions: filter_regions(catalog, state.region_scope, instance),
        }
    }

    /// Check if the scope switch should be shown
    pub fn shows_scope_switch(&self) -> bool {
        self.region_scope.is_some()
    }

    /// Check if an offered region is currently selected
    pub fn is_region_selected(&self, region_id: &str) -> bool {
        self.selected_regions.iter().any(|region| region.id == region_id)
    }
}
