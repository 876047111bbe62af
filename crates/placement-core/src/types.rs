//! Core types shared across placement components

use crate::error::PlacementError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Coarse compute tier, the primary filter axis of the instance picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceCategory {
    Eco,
    #[default]
    Standard,
    Gpu,
}

impl InstanceCategory {
    /// All categories in tab order
    pub const ALL: [InstanceCategory; 3] = [Self::Eco, Self::Standard, Self::Gpu];
}

impl fmt::Display for InstanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceCategory::Eco => write!(f, "eco"),
            InstanceCategory::Standard => write!(f, "standard"),
            InstanceCategory::Gpu => write!(f, "gpu"),
        }
    }
}

impl FromStr for InstanceCategory {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eco" => Ok(Self::Eco),
            "standard" => Ok(Self::Standard),
            "gpu" => Ok(Self::Gpu),
            other => Err(PlacementError::invalid("instance category", other)),
        }
    }
}

/// Partition of regions into city-level and broad groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionScope {
    #[default]
    Metropolitan,
    Continental,
}

impl RegionScope {
    /// The opposite scope (metropolitan <-> continental)
    pub fn other(self) -> Self {
        match self {
            Self::Metropolitan => Self::Continental,
            Self::Continental => Self::Metropolitan,
        }
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionScope::Metropolitan => write!(f, "metropolitan"),
            RegionScope::Continental => write!(f, "continental"),
        }
    }
}

impl FromStr for RegionScope {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metropolitan" => Ok(Self::Metropolitan),
            "continental" => Ok(Self::Continental),
            other => Err(PlacementError::invalid("region scope", other)),
        }
    }
}

/// Region status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionStatus {
    #[default]
    Available,
    ComingSoon,
    Restricted,
}

/// Instance status, read by the availability derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    #[default]
    Available,
    Restricted,
    ComingSoon,
}

/// Subscription plan of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationPlan {
    Hobby,
    Starter,
    Pro,
    Scale,
    Business,
    Enterprise,
}

impl fmt::Display for OrganizationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrganizationPlan::Hobby => "hobby",
            OrganizationPlan::Starter => "starter",
            OrganizationPlan::Pro => "pro",
            OrganizationPlan::Scale => "scale",
            OrganizationPlan::Business => "business",
            OrganizationPlan::Enterprise => "enterprise",
        };
        f.write_str(name)
    }
}

/// A compute instance type offered by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Unique identifier (e.g., "nano", "gpu-1")
    pub id: String,

    /// Compute tier
    pub category: InstanceCategory,

    /// Region allow-list; `None` means every region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,

    /// Restriction flag
    #[serde(default)]
    pub status: InstanceStatus,

    /// Plans allowed to use this instance; `None` means every plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<OrganizationPlan>>,
}

impl Instance {
    /// Create an instance available everywhere, on every plan
    pub fn new(id: impl Into<String>, category: InstanceCategory) -> Self {
        Self {
            id: id.into(),
            category,
            regions: None,
            status: InstanceStatus::Available,
            plans: None,
        }
    }

    /// Restrict the instance to the given region ids
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Set status
    pub fn with_status(mut self, status: InstanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Restrict the instance to the given plans
    pub fn with_plans(mut self, plans: impl IntoIterator<Item = OrganizationPlan>) -> Self {
        self.plans = Some(plans.into_iter().collect());
        self
    }

    /// Check if the instance can be deployed in a region
    pub fn supports_region(&self, region_id: &str) -> bool {
        match &self.regions {
            Some(allowed) => allowed.iter().any(|id| id == region_id),
            None => true,
        }
    }

    /// Check if an organization plan may use this instance
    pub fn allows_plan(&self, plan: OrganizationPlan) -> bool {
        match &self.plans {
            Some(plans) => plans.contains(&plan),
            None => true,
        }
    }
}

/// A deployment region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier (e.g., "fra")
    pub id: String,

    /// Scope partition
    pub scope: RegionScope,

    /// Current status
    #[serde(default)]
    pub status: RegionStatus,
}

impl Region {
    /// Create an available region
    pub fn new(id: impl Into<String>, scope: RegionScope) -> Self {
        Self {
            id: id.into(),
            scope,
            status: RegionStatus::Available,
        }
    }

    /// Set status
    pub fn with_status(mut self, status: RegionStatus) -> Self {
        self.status = status;
        self
    }

    /// Check if the region accepts deployments
    pub fn is_available(&self) -> bool {
        self.status == RegionStatus::Available
    }
}

/// Whether an instance may currently be selected, with a reason for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// The instance may be selected
    pub available: bool,

    /// Why it may not, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Availability {
    /// Selectable, no reason attached
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    /// Not selectable, with the reason shown to the user
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }
}

/// Organization entitlements relevant to instance selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Subscription plan
    pub plan: OrganizationPlan,

    /// Whether the organization is in its trial period
    #[serde(default)]
    pub trialing: bool,

    /// Maximum instance count per instance id
    #[serde(default)]
    pub instance_quotas: HashMap<String, u32>,
}

impl Organization {
    /// Create an organization outside of trial with no quota entries
    pub fn new(plan: OrganizationPlan) -> Self {
        Self {
            plan,
            trialing: false,
            instance_quotas: HashMap::new(),
        }
    }

    /// Mark the organization as trialing
    pub fn with_trial(mut self, trialing: bool) -> Self {
        self.trialing = trialing;
        self
    }

    /// Set the quota for one instance id
    pub fn with_instance_quota(mut self, instance_id: impl Into<String>, max: u32) -> Self {
        self.instance_quotas.insert(instance_id.into(), max);
        self
    }

    /// Quota maximum for an instance, if the organization has one
    pub fn instance_quota(&self, instance_id: &str) -> Option<u32> {
        self.instance_quotas.get(instance_id).copied()
    }
}
