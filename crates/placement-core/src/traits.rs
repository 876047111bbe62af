//! Core traits for placement
//!
//! The default-region heuristic is injected into the selection engine through
//! [`DefaultRegionResolver`]. The engine never trusts the answer blindly: a
//! region that is not one of the candidates is ignored.

use crate::types::{Instance, Region};

/// Picks a preferred region among candidates for an (optional) instance.
///
/// Implementations must be synchronous lookups over already-fetched data.
pub trait DefaultRegionResolver {
    /// Return the preferred region, or `None` to let the caller fall back
    fn resolve(&self, candidates: &[&Region], instance: Option<&Instance>) -> Option<Region>;
}

impl<F> DefaultRegionResolver for F
where
    F: Fn(&[&Region], Option<&Instance>) -> Option<Region>,
{
    fn resolve(&self, candidates: &[&Region], instance: Option<&Instance>) -> Option<Region> {
        self(candidates, instance)
    }
}

/// Wrap a closure as a resolver (pins down the closure signature for inference)
pub fn resolver_fn<F>(f: F) -> F
where
    F: Fn(&[&Region], Option<&Instance>) -> Option<Region>,
{
    f
}

/// Resolver with no preference; the engine always falls back to the first candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaultRegion;

impl DefaultRegionResolver for NoDefaultRegion {
    fn resolve(&self, _candidates: &[&Region], _instance: Option<&Instance>) -> Option<Region> {
        None
    }
}

/// Resolver that walks an ordered list of preferred region ids
#[derive(Debug, Clone, Default)]
pub struct PreferredRegions {
    preferred: Vec<String>,
}

impl PreferredRegions {
    /// Create a resolver from region ids, most preferred first
    pub fn new<I, S>(preferred: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            preferred: preferred.into_iter().map(Into::into).collect(),
        }
    }

    /// Preferred ids in order
    pub fn ids(&self) -> &[String] {
        &self.preferred
    }
}

impl DefaultRegionResolver for PreferredRegions {
    fn resolve(&self, candidates: &[&Region], _instance: Option<&Instance>) -> Option<Region> {
        self.preferred.iter().find_map(|id| {
            candidates
                .iter()
                .find(|region| &region.id == id)
                .map(|region| (*region).clone())
        })
    }
}
