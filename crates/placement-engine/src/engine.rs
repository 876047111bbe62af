//! The selection engine
//!
//! Every user action funnels through [`SelectionEngine::update`], which
//! re-derives a valid selection from scratch in a fixed order:
//!
//! ```text
//! merge change
//!     │
//!     ├── 1. Drop the instance if the category no longer offers it
//!     ├── 2. Auto-select the first offered instance if none is selected
//!     ├── 3. Picking the GPU category forces the continental scope
//!     ├── 4. Drop regions not offered for scope + instance, and repeats
//!     ├── 5. Default-region fallback (instance changed, or regions lost)
//!     └── 6. Single-region mode keeps only the last picked region
//! ```
//!
//! Later steps may override earlier ones, so the order is part of the
//! contract. The engine is total: it never fails, it only corrects.

use crate::fallback::resolve_fallback;
use crate::filter::{filter_instances, filter_regions, is_single_region};
use crate::state::{SelectionAction, SelectionChange, SelectionState};
use crate::view::SelectionView;
use placement_core::{
    Catalog, DefaultRegionResolver, Instance, InstanceCategory, NoDefaultRegion, Region,
    RegionScope,
};
use tracing::debug;

/// Derives valid selections over one catalog snapshot
#[derive(Debug, Clone)]
pub struct SelectionEngine<'a, R = NoDefaultRegion> {
    catalog: &'a Catalog,
    resolver: R,
}

impl<'a> SelectionEngine<'a, NoDefaultRegion> {
    /// Create an engine whose fallback always takes the first candidate
    pub fn without_resolver(catalog: &'a Catalog) -> Self {
        Self::new(catalog, NoDefaultRegion)
    }
}

impl<'a, R: DefaultRegionResolver> SelectionEngine<'a, R> {
    /// Create an engine over a catalog with an injected default-region resolver
    pub fn new(catalog: &'a Catalog, resolver: R) -> Self {
        Self { catalog, resolver }
    }

    /// The catalog this engine selects from
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The injected resolver
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Instances offered for a category
    pub fn filter_instances(&self, category: InstanceCategory) -> Vec<&'a Instance> {
        filter_instances(self.catalog, category)
    }

    /// Regions offered for a scope and instance
    pub fn filter_regions(&self, scope: RegionScope, instance: Option<&Instance>) -> Vec<&'a Region> {
        filter_regions(self.catalog, scope, instance)
    }

    /// Check if the selection is limited to one region for this instance
    pub fn is_single_region(&self, instance: Option<&Instance>) -> bool {
        is_single_region(self.catalog, instance)
    }

    /// Render-time view of a state
    pub fn view(&self, state: &SelectionState) -> SelectionView<'a> {
        SelectionView::build(self.catalog, state)
    }

    /// Apply a partial change and return the next valid state
    pub fn update(&self, state: &SelectionState, change: SelectionChange) -> SelectionState {
        let mut next = state.clone().merge(&change);

        let instances = self.filter_instances(next.instance_category);
        if let Some(selected) = next.selected_instance.take() {
            match instances.iter().find(|instance| instance.id == selected.id) {
                // Re-bind to the catalog's copy, the stored one may be stale
                Some(offered) => next.selected_instance = Some((*offered).clone()),
                None => debug!(
                    instance = %selected.id,
                    category = %next.instance_category,
                    "Selected instance is not offered in category, clearing it"
                ),
            }
        }

        if next.selected_instance.is_none() {
            next.selected_instance = instances.first().map(|instance| (*instance).clone());
            if let Some(instance) = &next.selected_instance {
                debug!(instance = %instance.id, "Auto-selected first offered instance");
            }
        }

        if change.instance_category == Some(InstanceCategory::Gpu) {
            next.region_scope = RegionScope::Continental;
        }

        let regions = self.filter_regions(next.region_scope, next.selected_instance.as_ref());
        let requested = next.selected_regions.len();
        let mut kept: Vec<Region> = Vec::with_capacity(requested);
        for selected in &next.selected_regions {
            if let Some(offered) = regions.iter().find(|region| region.id == selected.id) {
                // A repeated id keeps its most recent position
                kept.retain(|region| region.id != offered.id);
                kept.push((*offered).clone());
            }
        }
        next.selected_regions = kept;
        if next.selected_regions.len() < requested {
            debug!(
                dropped = requested - next.selected_regions.len(),
                scope = %next.region_scope,
                "Dropped regions not offered for the selection or repeated"
            );
        }

        let instance_changed = state.instance_id() != next.instance_id();
        let regions_lost = next.selected_regions.is_empty() && !change.clears_regions();
        if instance_changed || regions_lost {
            if let Some(fallback) = resolve_fallback(
                self.catalog,
                &self.resolver,
                next.region_scope,
                next.selected_instance.as_ref(),
            ) {
                next.region_scope = fallback.scope;
                next.selected_regions = vec![fallback.region.clone()];
            }
        }

        if self.is_single_region(next.selected_instance.as_ref()) && next.selected_regions.len() >= 2 {
            // Last choice wins
            let last = next.selected_regions.pop();
            next.selected_regions = last.into_iter().collect();
            debug!("Single-region mode, kept the most recent region");
        }

        next
    }

    /// Apply a user action and return the next valid state
    pub fn reduce(&self, state: &SelectionState, action: SelectionAction) -> SelectionState {
        debug!(?action, "Reducing selection action");
        let change = action.into_change(state);
        self.update(state, change)
    }

    /// Apply a user action and hand the next state to `commit`
    pub fn dispatch<F>(&self, state: &SelectionState, action: SelectionAction, commit: F)
    where
        F: FnOnce(SelectionState),
    {
        commit(self.reduce(state, action));
    }

    /// A category tab was picked
    pub fn on_instance_category_selected(
        &self,
        state: &SelectionState,
        category: InstanceCategory,
    ) -> SelectionState {
        self.reduce(state, SelectionAction::InstanceCategorySelected(category))
    }

    /// A region scope tab was picked
    pub fn on_region_scope_selected(&self, state: &SelectionState, scope: RegionScope) -> SelectionState {
        self.reduce(state, SelectionAction::RegionScopeSelected(scope))
    }

    /// An instance was picked
    pub fn on_instance_selected(&self, state: &SelectionState, instance: Instance) -> SelectionState {
        self.reduce(state, SelectionAction::InstanceSelected(instance))
    }

    /// A region was clicked
    pub fn on_region_selected(&self, state: &SelectionState, region: Region) -> SelectionState {
        self.reduce(state, SelectionAction::RegionSelected(region))
    }
}
