//! Credit-card requirement for a chosen instance

use placement_core::{Instance, InstanceCategory, Organization, OrganizationPlan};

/// Marker in the id of Tenstorrent accelerator instances
const TENSTORRENT_MARKER: &str = "tenstorrent";

/// Check if an instance is a Tenstorrent GPU
pub fn is_tenstorrent_gpu(instance: &Instance) -> bool {
    instance.category == InstanceCategory::Gpu && instance.id.contains(TENSTORRENT_MARKER)
}

/// Check if the organization must add a credit card before deploying `instance`
///
/// Hobby organizations always must. Trialing organizations must for a
/// Tenstorrent GPU their quota does not cover (quota maximum of zero).
pub fn should_add_credit_card(organization: &Organization, instance: &Instance) -> bool {
    if organization.plan == OrganizationPlan::Hobby {
        return true;
    }

    organization.trialing
        && is_tenstorrent_gpu(instance)
        && organization.instance_quota(&instance.id) == Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenstorrent() -> Instance {
        Instance::new("gpu-tenstorrent-n300s", InstanceCategory::Gpu)
    }

    #[test]
    fn test_hobby_always_needs_card() {
        let org = Organization::new(OrganizationPlan::Hobby);
        assert!(should_add_credit_card(&org, &Instance::new("nano", InstanceCategory::Standard)));
        assert!(should_add_credit_card(&org, &tenstorrent()));
    }

    #[test]
    fn test_trial_tenstorrent_without_quota() {
        let org = Organization::new(OrganizationPlan::Starter)
            .with_trial(true)
            .with_instance_quota("gpu-tenstorrent-n300s", 0);
        assert!(should_add_credit_card(&org, &tenstorrent()));
    }

    #[test]
    fn test_trial_tenstorrent_with_quota() {
        let org = Organization::new(OrganizationPlan::Starter)
            .with_trial(true)
            .with_instance_quota("gpu-tenstorrent-n300s", 1);
        assert!(!should_add_credit_card(&org, &tenstorrent()));
    }

    #[test]
    fn test_trial_tenstorrent_without_quota_entry() {
        let org = Organization::new(OrganizationPlan::Starter).with_trial(true);
        assert!(!should_add_credit_card(&org, &tenstorrent()));
    }

    #[test]
    fn test_not_trialing() {
        let org = Organization::new(OrganizationPlan::Pro).with_instance_quota("gpu-tenstorrent-n300s", 0);
        assert!(!should_add_credit_card(&org, &tenstorrent()));
    }

    #[test]
    fn test_trial_other_gpu() {
        let org = Organization::new(OrganizationPlan::Starter)
            .with_trial(true)
            .with_instance_quota("gpu-nvidia-l4", 0);
        assert!(!should_add_credit_card(&org, &Instance::new("gpu-nvidia-l4", InstanceCategory::Gpu)));
    }

    #[test]
    fn test_tenstorrent_requires_gpu_category() {
        assert!(is_tenstorrent_gpu(&tenstorrent()));
        assert!(!is_tenstorrent_gpu(&Instance::new("tenstorrent-proxy", InstanceCategory::Standard)));
    }
}
