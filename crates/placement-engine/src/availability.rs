//! Availability derivation
//!
//! The API layer normally ships an availability map with the catalog. When it
//! does not, this module derives one from instance status, plan allow-lists
//! and organization quotas.

use crate::billing::is_tenstorrent_gpu;
use placement_core::{Availability, Catalog, Instance, InstanceStatus, Organization};
use std::collections::HashMap;
use tracing::debug;

/// Availability of one instance for an (optional) organization
pub fn instance_availability(instance: &Instance, organization: Option<&Organization>) -> Availability {
    match instance.status {
        InstanceStatus::Restricted => return Availability::unavailable("instance is restricted"),
        InstanceStatus::ComingSoon => return Availability::unavailable("instance is coming soon"),
        InstanceStatus::Available => {}
    }

    let Some(organization) = organization else {
        return Availability::available();
    };

    if !instance.allows_plan(organization.plan) {
        return Availability::unavailable(format!(
            "instance is not available on the {} plan",
            organization.plan
        ));
    }

    // Trialing orgs keep Tenstorrent GPUs selectable; the credit-card prompt gates them
    let trial_exception = organization.trialing && is_tenstorrent_gpu(instance);
    if organization.instance_quota(&instance.id) == Some(0) && !trial_exception {
        return Availability::unavailable("instance quota reached");
    }

    Availability::available()
}

/// Availability map for every instance of a catalog
pub fn derive_availabilities(
    instances: &[Instance],
    organization: Option<&Organization>,
) -> HashMap<String, Availability> {
    let availabilities: HashMap<_, _> = instances
        .iter()
        .map(|instance| (instance.id.clone(), instance_availability(instance, organization)))
        .collect();

    debug!(
        instances = availabilities.len(),
        unavailable = availabilities.values().filter(|a| !a.available).count(),
        "Derived instance availabilities"
    );

    availabilities
}

/// Fill the catalog's availability map when the snapshot shipped none
pub fn with_derived_availabilities(catalog: Catalog, organization: Option<&Organization>) -> Catalog {
    if !catalog.availabilities.is_empty() {
        return catalog;
    }
    let availabilities = derive_availabilities(&catalog.instances, organization);
    catalog.with_availabilities(availabilities)
}
