//! Default-region fallback
//!
//! When the instance changes, or the region selection ends up empty, the
//! engine picks one region on the user's behalf:
//!
//! 1. Ask the injected resolver among the current scope's regions
//! 2. Otherwise take the first region of the current scope
//! 3. Otherwise repeat both steps in the other scope and switch to it
//!
//! The resolver's answer only counts if it is one of the candidates.

use crate::filter::filter_regions;
use placement_core::{Catalog, DefaultRegionResolver, Instance, Region, RegionScope};
use serde::Serialize;
use tracing::{debug, warn};

/// How the fallback region was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSource {
    /// The injected resolver's answer
    Resolver,
    /// First candidate in catalog order
    FirstAvailable,
}

/// A region picked by the fallback, and the scope it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFallback<'a> {
    /// Scope the region was found in
    pub scope: RegionScope,
    /// The picked region
    pub region: &'a Region,
    /// How it was picked
    pub source: FallbackSource,
}

/// Pick a default region among `candidates`
pub fn default_region<'a, R>(
    resolver: &R,
    candidates: &[&'a Region],
    instance: Option<&Instance>,
) -> Option<(&'a Region, FallbackSource)>
where
    R: DefaultRegionResolver + ?Sized,
{
    if let Some(resolved) = resolver.resolve(candidates, instance) {
        match candidates.iter().find(|candidate| candidate.id == resolved.id) {
            Some(region) => return Some((region, FallbackSource::Resolver)),
            None => warn!(
                region = %resolved.id,
                "Default region resolver returned a region outside the candidates, ignoring it"
            ),
        }
    }

    candidates
        .first()
        .map(|region| (*region, FallbackSource::FirstAvailable))
}

/// Run the fallback in `scope`, then in the other scope
pub fn resolve_fallback<'a, R>(
    catalog: &'a Catalog,
    resolver: &R,
    scope: RegionScope,
    instance: Option<&Instance>,
) -> Option<RegionFallback<'a>>
where
    R: DefaultRegionResolver + ?Sized,
{
    for candidate_scope in [scope, scope.other()] {
        let candidates = filter_regions(catalog, candidate_scope, instance);
        if let Some((region, source)) = default_region(resolver, &candidates, instance) {
            debug!(
                region = %region.id,
                scope = %candidate_scope,
                ?source,
                "Selected fallback region"
            );
            return Some(RegionFallback {
                scope: candidate_scope,
                region,
                source,
            });
        }
    }

    debug!(scope = %scope, "No region available in either scope");
    None
}
