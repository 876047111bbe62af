//! Catalog snapshot: instances, regions and availability
//!
//! A catalog is supplied fresh per render and is never mutated by the engine.
//! Snapshots are usually produced by the API layer; [`Catalog::from_json`]
//! and [`Catalog::from_path`] load them from serialized form.

use crate::error::{PlacementError, Result};
use crate::types::{Availability, Instance, Region};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Read-only snapshot of everything the selection engine may choose from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Instances in display order (order is the auto-selection tie-break)
    #[serde(default)]
    pub instances: Vec<Instance>,

    /// Regions in display order (order is the default-region tie-break)
    #[serde(default)]
    pub regions: Vec<Region>,

    /// Availability per instance id; a missing entry means unavailable
    #[serde(default)]
    pub availabilities: HashMap<String, Availability>,

    /// Limit the selection to at most one region
    #[serde(default)]
    pub single_region: bool,
}

impl Catalog {
    /// Create a catalog with no availability entries
    pub fn new(instances: Vec<Instance>, regions: Vec<Region>) -> Self {
        Self {
            instances,
            regions,
            availabilities: HashMap::new(),
            single_region: false,
        }
    }

    /// Replace the availability map
    pub fn with_availabilities(mut self, availabilities: HashMap<String, Availability>) -> Self {
        self.availabilities = availabilities;
        self
    }

    /// Set availability for one instance
    pub fn with_availability(mut self, instance_id: impl Into<String>, availability: Availability) -> Self {
        self.availabilities.insert(instance_id.into(), availability);
        self
    }

    /// Mark every instance as available
    pub fn with_all_available(mut self) -> Self {
        for instance in &self.instances {
            self.availabilities
                .insert(instance.id.clone(), Availability::available());
        }
        self
    }

    /// Enable or disable single-region mode
    pub fn with_single_region(mut self, single_region: bool) -> Self {
        self.single_region = single_region;
        self
    }

    /// Parse and validate a JSON catalog snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        debug!(
            instances = catalog.instances.len(),
            regions = catalog.regions.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Read, parse and validate a JSON catalog snapshot from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject snapshots with duplicate instance or region ids
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for instance in &self.instances {
            if !seen.insert(instance.id.as_str()) {
                return Err(PlacementError::DuplicateInstance(instance.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            if !seen.insert(region.id.as_str()) {
                return Err(PlacementError::DuplicateRegion(region.id.clone()));
            }
        }

        Ok(())
    }

    /// Look up an instance by id
    pub fn instance(&self, id: &str) -> Option<&Instance> {
        self.instances.iter().find(|instance| instance.id == id)
    }

    /// Look up an instance by id, failing if it is absent
    pub fn require_instance(&self, id: &str) -> Result<&Instance> {
        self.instance(id)
            .ok_or_else(|| PlacementError::UnknownInstance(id.to_string()))
    }

    /// Look up a region by id
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Look up a region by id, failing if it is absent
    pub fn require_region(&self, id: &str) -> Result<&Region> {
        self.region(id)
            .ok_or_else(|| PlacementError::UnknownRegion(id.to_string()))
    }

    /// Availability entry for an instance
    pub fn availability(&self, instance_id: &str) -> Option<&Availability> {
        self.availabilities.get(instance_id)
    }

    /// Check if an instance may be selected (missing entries are unavailable)
    pub fn is_available(&self, instance_id: &str) -> bool {
        self.availability(instance_id)
            .is_some_and(|availability| availability.available)
    }
}
