//! Command implementations for the placement CLI

use anyhow::{Context, Result};
use placement_core::{
    Availability, Catalog, DefaultRegionResolver, InstanceCategory, Organization, OrganizationPlan,
    PlacementError, RegionScope,
};
use placement_engine::{
    check_invariants, instance_availability, is_tenstorrent_gpu, should_add_credit_card,
    with_derived_availabilities, SelectionAction, SelectionChange, SelectionConfig, SelectionEngine,
    SelectionState,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// One `key=value` step of `placement apply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `category=<eco|standard|gpu>`
    Category(InstanceCategory),
    /// `scope=<metropolitan|continental>`
    Scope(RegionScope),
    /// `instance=<id>`
    Instance(String),
    /// `region=<id>` (toggles)
    Region(String),
}

impl FromStr for Step {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| PlacementError::invalid("step", s))?;

        match key.trim() {
            "category" => Ok(Self::Category(value.trim().parse()?)),
            "scope" => Ok(Self::Scope(value.trim().parse()?)),
            "instance" => Ok(Self::Instance(value.trim().to_string())),
            "region" => Ok(Self::Region(value.trim().to_string())),
            _ => Err(PlacementError::invalid("step", s)),
        }
    }
}

impl Step {
    /// Resolve the step against the catalog
    pub fn to_action(&self, catalog: &Catalog) -> placement_core::Result<SelectionAction> {
        Ok(match self {
            Self::Category(category) => SelectionAction::InstanceCategorySelected(*category),
            Self::Scope(scope) => SelectionAction::RegionScopeSelected(*scope),
            Self::Instance(id) => SelectionAction::InstanceSelected(catalog.require_instance(id)?.clone()),
            Self::Region(id) => SelectionAction::RegionSelected(catalog.require_region(id)?.clone()),
        })
    }
}

/// Load a catalog, apply the configuration and derive availabilities for an
/// organization when the snapshot carries none
pub fn load_catalog(
    path: &Path,
    config: &SelectionConfig,
    organization: Option<&Organization>,
) -> Result<Catalog> {
    let catalog = Catalog::from_path(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    let catalog = config.apply(catalog);
    Ok(with_derived_availabilities(catalog, organization))
}

/// Load a selection state, or start from the default one
pub fn load_state(path: Option<&Path>) -> Result<SelectionState> {
    match path {
        Some(path) => read_json(path, "state"),
        None => Ok(SelectionState::default()),
    }
}

/// Load an organization file
pub fn load_organization(path: &Path) -> Result<Organization> {
    read_json(path, "organization")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {} {}", what, path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {} {}", what, path.display()))
}

/// Re-validate the state and render its view as JSON
pub fn view<R: DefaultRegionResolver>(engine: &SelectionEngine<'_, R>, state: &SelectionState) -> Result<String> {
    let state = engine.update(state, SelectionChange::none());
    Ok(serde_json::to_string_pretty(&engine.view(&state))?)
}

/// Replay steps in order and return the final state
pub fn apply<R: DefaultRegionResolver>(
    engine: &SelectionEngine<'_, R>,
    state: SelectionState,
    steps: &[Step],
) -> Result<SelectionState> {
    let mut state = engine.update(&state, SelectionChange::none());

    for step in steps {
        let action = step
            .to_action(engine.catalog())
            .with_context(|| format!("cannot apply {:?}", step))?;
        state = engine.reduce(&state, action);
        info!(
            instance = ?state.instance_id(),
            regions = ?state.region_ids(),
            scope = %state.region_scope,
            "Applied {:?}", step
        );
    }

    Ok(state)
}

/// Write a state file
pub fn save_state(path: &Path, state: &SelectionState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).with_context(|| format!("failed to write state {}", path.display()))?;
    info!("Saved state to {}", path.display());
    Ok(())
}

/// Check a stored state as-is, without correcting it
pub fn check<R: DefaultRegionResolver>(engine: &SelectionEngine<'_, R>, state: &SelectionState) -> Result<()> {
    check_invariants(engine, state)?;
    info!("Selection is valid");
    Ok(())
}

/// Billing decision for one organization and instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingReport {
    /// Instance id
    pub instance: String,
    /// Organization plan
    pub plan: OrganizationPlan,
    /// Organization trial flag
    pub trialing: bool,
    /// Instance is a Tenstorrent GPU
    pub tenstorrent_gpu: bool,
    /// The organization must add a credit card first
    pub should_add_credit_card: bool,
    /// Whether the organization may select the instance
    pub availability: Availability,
}

/// Evaluate the billing rules for an instance
pub fn billing(catalog: &Catalog, organization: &Organization, instance_id: &str) -> Result<BillingReport> {
    let instance = catalog.require_instance(instance_id)?;

    Ok(BillingReport {
        instance: instance.id.clone(),
        plan: organization.plan,
        trialing: organization.trialing,
        tenstorrent_gpu: is_tenstorrent_gpu(instance),
        should_add_credit_card: should_add_credit_card(organization, instance),
        availability: instance_availability(instance, Some(organization)),
    })
}
