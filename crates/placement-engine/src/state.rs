//! Selection state, partial changes and user actions

use placement_core::{Instance, InstanceCategory, Region, RegionScope};
use serde::{Deserialize, Serialize};

/// The persisted selection, owned by the caller
///
/// The engine never patches a state in place: every transition returns a
/// fresh value the caller stores wherever it likes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Instance category tab
    #[serde(default)]
    pub instance_category: InstanceCategory,

    /// Region scope tab
    #[serde(default)]
    pub region_scope: RegionScope,

    /// Selected instance, if any
    #[serde(default)]
    pub selected_instance: Option<Instance>,

    /// Selected regions, oldest first (the last one is the most recent pick)
    #[serde(default)]
    pub selected_regions: Vec<Region>,
}

impl SelectionState {
    /// Create an empty state for a category and scope
    pub fn new(instance_category: InstanceCategory, region_scope: RegionScope) -> Self {
        Self {
            instance_category,
            region_scope,
            selected_instance: None,
            selected_regions: Vec::new(),
        }
    }

    /// Set the selected instance
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.selected_instance = Some(instance);
        self
    }

    /// Set the selected regions
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.selected_regions = regions;
        self
    }

    /// Id of the selected instance
    pub fn instance_id(&self) -> Option<&str> {
        self.selected_instance.as_ref().map(|instance| instance.id.as_str())
    }

    /// Ids of the selected regions, in selection order
    pub fn region_ids(&self) -> Vec<&str> {
        self.selected_regions
            .iter()
            .map(|region| region.id.as_str())
            .collect()
    }

    /// Check if a region is selected
    pub fn has_region(&self, region_id: &str) -> bool {
        self.selected_regions.iter().any(|region| region.id == region_id)
    }

    /// Apply the fields a change carries, leaving the rest untouched
    pub(crate) fn merge(mut self, change: &SelectionChange) -> Self {
        if let Some(category) = change.instance_category {
            self.instance_category = category;
        }
        if let Some(scope) = change.region_scope {
            self.region_scope = scope;
        }
        if let Some(instance) = &change.selected_instance {
            self.selected_instance = instance.clone();
        }
        if let Some(regions) = &change.selected_regions {
            self.selected_regions = regions.clone();
        }
        self
    }
}

/// A partial update of [`SelectionState`]
///
/// `None` fields are left as they are. `selected_instance: Some(None)`
/// explicitly clears the instance; `selected_regions: Some(vec![])`
/// explicitly clears the regions and suppresses the default-region fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// New category tab
    pub instance_category: Option<InstanceCategory>,
    /// New scope tab
    pub region_scope: Option<RegionScope>,
    /// New instance (`Some(None)` clears it)
    pub selected_instance: Option<Option<Instance>>,
    /// New region list
    pub selected_regions: Option<Vec<Region>>,
}

impl SelectionChange {
    /// A change that changes nothing (re-validates the state)
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the instance category
    pub fn with_instance_category(mut self, category: InstanceCategory) -> Self {
        self.instance_category = Some(category);
        self
    }

    /// Set the region scope
    pub fn with_region_scope(mut self, scope: RegionScope) -> Self {
        self.region_scope = Some(scope);
        self
    }

    /// Set (or clear, with `None`) the selected instance
    pub fn with_selected_instance(mut self, instance: Option<Instance>) -> Self {
        self.selected_instance = Some(instance);
        self
    }

    /// Replace the selected regions
    pub fn with_selected_regions(mut self, regions: Vec<Region>) -> Self {
        self.selected_regions = Some(regions);
        self
    }

    /// Check if the change explicitly asks for an empty region set
    pub fn clears_regions(&self) -> bool {
        self.selected_regions
            .as_ref()
            .is_some_and(|regions| regions.is_empty())
    }
}

/// User interactions the engine reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// A category tab was picked
    InstanceCategorySelected(InstanceCategory),

    /// A region scope tab was picked
    RegionScopeSelected(RegionScope),

    /// An instance was picked (the category tab switches to its category)
    InstanceSelected(Instance),

    /// A region was clicked (toggles its membership)
    RegionSelected(Region),
}

impl SelectionAction {
    /// Translate the action into the partial change it requests from `state`
    pub fn into_change(self, state: &SelectionState) -> SelectionChange {
        match self {
            Self::InstanceCategorySelected(category) => {
                SelectionChange::none().with_instance_category(category)
            }
            Self::RegionScopeSelected(scope) => SelectionChange::none().with_region_scope(scope),
            Self::InstanceSelected(instance) => {
                // Only a real tab switch counts as a category change
                let change = if instance.category != state.instance_category {
                    SelectionChange::none().with_instance_category(instance.category)
                } else {
                    SelectionChange::none()
                };
                change.with_selected_instance(Some(instance))
            }
            Self::RegionSelected(region) => {
                SelectionChange::none().with_selected_regions(toggle_region(&state.selected_regions, region))
            }
        }
    }
}

/// Remove `region` if it is selected, append it otherwise
pub fn toggle_region(selected: &[Region], region: Region) -> Vec<Region> {
    if selected.iter().any(|r| r.id == region.id) {
        selected.iter().filter(|r| r.id != region.id).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(region);
        next
    }
}
