//! Shared fixture for placement-engine integration tests.
//!
//! eco: free, eco-nano, eco-micro
//! standard: nano, micro (fra only), aws-nano (hidden)
//! gpu: gpu-1, gpu-2
//! regions: fra, par (metropolitan), eu, na (continental)

#![allow(dead_code)]

use placement_core::{Catalog, Instance, InstanceCategory, Region, RegionScope, RegionStatus};

pub fn instances() -> Vec<Instance> {
    vec![
        Instance::new("free", InstanceCategory::Eco),
        Instance::new("eco-nano", InstanceCategory::Eco),
        Instance::new("eco-micro", InstanceCategory::Eco),
        Instance::new("nano", InstanceCategory::Standard),
        Instance::new("micro", InstanceCategory::Standard).with_regions(["fra"]),
        Instance::new("aws-nano", InstanceCategory::Standard),
        Instance::new("gpu-1", InstanceCategory::Gpu),
        Instance::new("gpu-2", InstanceCategory::Gpu),
    ]
}

pub fn regions() -> Vec<Region> {
    vec![
        Region::new("fra", RegionScope::Metropolitan),
        Region::new("par", RegionScope::Metropolitan),
        Region::new("eu", RegionScope::Continental),
        Region::new("na", RegionScope::Continental),
    ]
}

/// Every instance available, every region open
pub fn catalog() -> Catalog {
    Catalog::new(instances(), regions()).with_all_available()
}

/// Same catalog with the continental regions not open yet
pub fn catalog_without_continental() -> Catalog {
    let mut catalog = catalog();
    for region in &mut catalog.regions {
        if region.scope == RegionScope::Continental {
            region.status = RegionStatus::ComingSoon;
        }
    }
    catalog
}

pub fn instance(catalog: &Catalog, id: &str) -> Instance {
    catalog.instance(id).cloned().expect("fixture instance")
}

pub fn region(catalog: &Catalog, id: &str) -> Region {
    catalog.region(id).cloned().expect("fixture region")
}
