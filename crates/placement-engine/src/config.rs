//! Selection configuration
//!
//! Settings that are not part of a catalog snapshot but shape the selection:
//! forcing single-region mode and the preferred default regions.

use placement_core::{Catalog, PlacementError, PreferredRegions, Result};
use std::env;

/// Environment variable forcing single-region mode
pub const SINGLE_REGION_ENV: &str = "PLACEMENT_SINGLE_REGION";

/// Environment variable with comma-separated preferred region ids
pub const PREFERRED_REGIONS_ENV: &str = "PLACEMENT_PREFERRED_REGIONS";

/// Configuration for the selection engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Force single-region mode on top of the catalog flag (default: false)
    pub single_region: bool,

    /// Region ids the default-region fallback prefers, most preferred first
    pub preferred_regions: Vec<String>,
}

impl SelectionConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// # Optional Environment Variables
    /// - `PLACEMENT_SINGLE_REGION` - `true`/`1` or `false`/`0` (default: false)
    /// - `PLACEMENT_PREFERRED_REGIONS` - e.g. `fra,par,eu` (default: none)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let single_region = match lookup(SINGLE_REGION_ENV).as_deref() {
            None | Some("") => false,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(PlacementError::config(format!(
                    "invalid {}: {}",
                    SINGLE_REGION_ENV, other
                )));
            }
        };

        let preferred_regions = lookup(PREFERRED_REGIONS_ENV)
            .map(|value| parse_region_list(&value))
            .unwrap_or_default();

        Ok(Self {
            single_region,
            preferred_regions,
        })
    }

    /// Force single-region mode
    pub fn with_single_region(mut self, single_region: bool) -> Self {
        self.single_region = single_region;
        self
    }

    /// Replace the preferred regions
    pub fn with_preferred_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Resolver walking the preferred regions
    pub fn resolver(&self) -> PreferredRegions {
        PreferredRegions::new(self.preferred_regions.iter().cloned())
    }

    /// Apply the configuration to a catalog snapshot
    pub fn apply(&self, catalog: Catalog) -> Catalog {
        let single_region = catalog.single_region || self.single_region;
        catalog.with_single_region(single_region)
    }
}

/// Split a comma-separated id list, dropping blanks
pub fn parse_region_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SelectionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SelectionConfig::new());
        assert!(!config.single_region);
        assert!(config.preferred_regions.is_empty());
    }

    #[test]
    fn test_from_lookup() {
        let config = SelectionConfig::from_lookup(lookup(&[
            (SINGLE_REGION_ENV, "1"),
            (PREFERRED_REGIONS_ENV, "fra, par,,eu "),
        ]))
        .unwrap();

        assert!(config.single_region);
        assert_eq!(config.preferred_regions, vec!["fra", "par", "eu"]);
    }

    #[test]
    fn test_invalid_single_region() {
        let err = SelectionConfig::from_lookup(lookup(&[(SINGLE_REGION_ENV, "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid PLACEMENT_SINGLE_REGION: maybe"
        );
    }

    #[test]
    fn test_builder_and_resolver() {
        let config = SelectionConfig::new()
            .with_single_region(true)
            .with_preferred_regions(["par"]);

        assert_eq!(config.resolver().ids(), ["par".to_string()]);
        assert!(config.apply(Catalog::default()).single_region);
    }

    #[test]
    fn test_apply_keeps_catalog_flag() {
        let catalog = Catalog::default().with_single_region(true);
        assert!(SelectionConfig::new().apply(catalog).single_region);
    }
}
