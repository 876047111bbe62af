//! Property-based invariant tests for the selection engine.
//!
//! Random catalogs (availability, region status, single-region flag) are
//! driven through random action sequences, starting from stored states that
//! may be stale or hold the same region more than once. After every transition:
//!
//! 1. The selected instance is offered under the current category
//! 2. Every selected region is offered for the scope and instance
//! 3. Single-region mode never holds more than one region
//! 4. The region selection is only empty when nothing is offered anywhere,
//!    or when the user just deselected the last region
//! 5. A no-op update of a non-empty selection changes nothing

mod common;

use placement_core::{
    resolver_fn, Availability, Catalog, InstanceCategory, PreferredRegions, Region, RegionScope,
    RegionStatus,
};
use placement_engine::{
    check_invariants, filter_regions, is_single_region, SelectionAction, SelectionChange,
    SelectionEngine, SelectionState,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Step {
    Category(usize),
    Scope(usize),
    Instance(usize),
    Region(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..3).prop_map(Step::Category),
        (0usize..2).prop_map(Step::Scope),
        (0usize..8).prop_map(Step::Instance),
        (0usize..4).prop_map(Step::Region),
    ]
}

fn region_status_strategy() -> impl Strategy<Value = RegionStatus> {
    prop_oneof![
        3 => Just(RegionStatus::Available),
        1 => Just(RegionStatus::ComingSoon),
        1 => Just(RegionStatus::Restricted),
    ]
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    (
        proptest::collection::vec(proptest::bool::weighted(0.8), 8),
        proptest::collection::vec(region_status_strategy(), 4),
        any::<bool>(),
    )
        .prop_map(|(available, statuses, single_region)| {
            let mut regions = common::regions();
            for (region, status) in regions.iter_mut().zip(statuses) {
                region.status = status;
            }

            let instances = common::instances();
            let mut catalog = Catalog::new(instances.clone(), regions).with_single_region(single_region);
            for (instance, available) in instances.iter().zip(available) {
                let availability = if available {
                    Availability::available()
                } else {
                    Availability::unavailable("quota reached")
                };
                catalog = catalog.with_availability(instance.id.clone(), availability);
            }
            catalog
        })
}

/// A persisted state as loaded from storage: any instance, any regions,
/// repeats included
fn stored_state_strategy() -> impl Strategy<Value = SelectionState> {
    (
        0usize..3,
        0usize..2,
        proptest::option::of(0usize..8),
        proptest::collection::vec(0usize..4, 0..6),
    )
        .prop_map(|(category, scope, instance, regions)| {
            let all_regions = common::regions();
            let state = SelectionState::new(
                InstanceCategory::ALL[category],
                [RegionScope::Metropolitan, RegionScope::Continental][scope],
            )
            .with_regions(regions.into_iter().map(|i| all_regions[i].clone()).collect());
            match instance {
                Some(i) => state.with_instance(common::instances()[i].clone()),
                None => state,
            }
        })
}

fn preferred_strategy() -> impl Strategy<Value = PreferredRegions> {
    proptest::option::of(0usize..4).prop_map(|index| {
        let ids: Vec<String> = index
            .map(|i| common::regions()[i].id.clone())
            .into_iter()
            .collect();
        PreferredRegions::new(ids)
    })
}

fn to_action(catalog: &Catalog, step: &Step) -> SelectionAction {
    match *step {
        Step::Category(i) => SelectionAction::InstanceCategorySelected(InstanceCategory::ALL[i]),
        Step::Scope(i) => SelectionAction::RegionScopeSelected(
            [RegionScope::Metropolitan, RegionScope::Continental][i],
        ),
        Step::Instance(i) => SelectionAction::InstanceSelected(catalog.instances[i].clone()),
        Step::Region(i) => SelectionAction::RegionSelected(catalog.regions[i].clone()),
    }
}

fn any_region_offered(catalog: &Catalog, state: &SelectionState) -> bool {
    let instance = state.selected_instance.as_ref();
    [RegionScope::Metropolitan, RegionScope::Continental]
        .into_iter()
        .any(|scope| !filter_regions(catalog, scope, instance).is_empty())
}

// ═════════════════════════════════════════════════════════════════════════════
// 1-4. Every transition yields a valid selection
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn test_every_transition_keeps_selection_valid(
        catalog in catalog_strategy(),
        resolver in preferred_strategy(),
        stored in stored_state_strategy(),
        steps in proptest::collection::vec(step_strategy(), 1..40),
    ) {
        let engine = SelectionEngine::new(&catalog, resolver);

        // Loading a stored state re-validates it first
        let mut state = engine.update(&stored, SelectionChange::none());
        prop_assert_eq!(check_invariants(&engine, &state), Ok(()), "loaded {:?}", stored);
        if any_region_offered(&catalog, &state) {
            prop_assert!(!state.selected_regions.is_empty());
        }

        for step in &steps {
            let action = to_action(&catalog, step);
            let explicit_clear = action.clone().into_change(&state).clears_regions();
            state = engine.reduce(&state, action);

            prop_assert_eq!(check_invariants(&engine, &state), Ok(()), "after {:?}", step);

            if is_single_region(&catalog, state.selected_instance.as_ref()) {
                prop_assert!(state.selected_regions.len() <= 1);
            }

            if !explicit_clear && any_region_offered(&catalog, &state) {
                prop_assert!(
                    !state.selected_regions.is_empty(),
                    "regions left empty after {:?} with {:?}", step, state
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// 5. No-op updates are idempotent
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn test_noop_update_is_idempotent(
        catalog in catalog_strategy(),
        stored in stored_state_strategy(),
        steps in proptest::collection::vec(step_strategy(), 0..20),
    ) {
        let engine = SelectionEngine::without_resolver(&catalog);
        let mut state = engine.update(&stored, SelectionChange::none());

        for step in &steps {
            state = engine.reduce(&state, to_action(&catalog, step));
        }

        // An explicitly emptied selection is re-filled by the next update
        if !state.selected_regions.is_empty() {
            let again = engine.update(&state, SelectionChange::none());
            prop_assert_eq!(again, state);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// 6. The resolver can never smuggle in a region outside the candidates
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn test_foreign_resolver_answers_are_ignored(
        catalog in catalog_strategy(),
        steps in proptest::collection::vec(step_strategy(), 1..20),
    ) {
        let engine = SelectionEngine::new(
            &catalog,
            resolver_fn(|_, _| Some(Region::new("aws-eu", RegionScope::Continental))),
        );
        let mut state = SelectionState::default();

        for step in &steps {
            state = engine.reduce(&state, to_action(&catalog, step));
            prop_assert!(!state.has_region("aws-eu"));
            prop_assert_eq!(check_invariants(&engine, &state), Ok(()));
        }
    }
}
