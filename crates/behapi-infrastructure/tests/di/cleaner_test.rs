//! Composition pass tests: bag selection and cleaner wiring

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use behapi_domain::constants::{BAG_RESET_ATTRIBUTE, BAG_TAG, CLEANER_SERVICE};
use behapi_domain::error::{Error, Result};
use behapi_domain::ports::ResettableBag;
use behapi_infrastructure::di::{
    Instance, ResetCoordinator, ServiceDescriptor, ServiceRegistry, Tag, WiringPlan, process,
    register_cleaner,
};

struct CountingBag {
    resets: Arc<AtomicUsize>,
    fail: bool,
}

impl ResettableBag for CountingBag {
    fn reset(&self) -> Result<()> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::infrastructure("cannot reset"));
        }
        Ok(())
    }
}

fn bag(resets: &Arc<AtomicUsize>, fail: bool, reset: bool) -> ServiceDescriptor {
    let resets = resets.clone();
    ServiceDescriptor::construct(move |_| {
        let bag = Arc::new(CountingBag {
            resets: resets.clone(),
            fail,
        });
        Ok(Instance::from_arc(bag.clone()).provide::<dyn ResettableBag>(bag))
    })
    .with_tag(Tag::new(BAG_TAG).with_attribute(BAG_RESET_ATTRIBUTE, reset))
}

#[test]
fn test_only_reset_bags_reach_the_cleaner() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();
    registry.register("bag.a", bag(&resets, false, true)).unwrap();
    registry.register("bag.kept", bag(&resets, false, false)).unwrap();
    registry.register("bag.b", bag(&resets, false, true)).unwrap();
    registry.register("bag.c", bag(&resets, false, true)).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();

    assert_eq!(services.registry().instantiated_count(), 0);
    let cleaner = services.reset_coordinator().unwrap();
    assert_eq!(cleaner.held_ids(), vec!["bag.a", "bag.b", "bag.c"]);
    assert!(!services.registry().is_instantiated("bag.kept"));

    let report = services.finish_scenario().unwrap();
    assert_eq!(report.attempted(), 3);
    assert_eq!(resets.load(Ordering::SeqCst), 3);
}

#[test]
fn test_failing_bag_still_lets_the_others_reset() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();
    registry.register("bag.first", bag(&resets, true, true)).unwrap();
    registry.register("bag.second", bag(&resets, false, true)).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();
    let report = services.finish_scenario().unwrap();

    assert_eq!(resets.load(Ordering::SeqCst), 2);
    assert_eq!(report.reset, vec!["bag.second"]);
    assert_eq!(report.failures.len(), 1);
}

#[test]
fn test_resets_happen_after_every_scenario() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();
    registry.register("bag", bag(&resets, false, true)).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();
    services.finish_scenario().unwrap();
    services.finish_scenario().unwrap();

    assert_eq!(resets.load(Ordering::SeqCst), 2);
}

#[test]
fn test_missing_cleaner_is_fatal() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    registry.register("bag", bag(&resets, false, true)).unwrap();

    let err = process(registry, WiringPlan::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownService { id } if id == CLEANER_SERVICE));
}

#[test]
fn test_no_bags_leaves_an_empty_cleaner() {
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();
    let cleaner = services
        .get_as::<ResetCoordinator>(CLEANER_SERVICE)
        .unwrap();

    assert!(cleaner.is_empty());
    assert!(services.finish_scenario().unwrap().is_clean());
}

#[test]
fn test_non_bag_with_reset_tag_fails_only_its_own_reset() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();
    registry
        .register(
            "pretender",
            ServiceDescriptor::construct(|_| Ok(Instance::new(())))
                .with_tag(Tag::new(BAG_TAG).with_attribute(BAG_RESET_ATTRIBUTE, true)),
        )
        .unwrap();
    registry.register("bag", bag(&resets, false, true)).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();
    let report = services.finish_scenario().unwrap();

    assert_eq!(report.reset, vec!["bag"]);
    assert!(matches!(
        &report.failures[..],
        [Error::ResetFailure { bag, .. }] if bag == "pretender"
    ));
    assert_eq!(resets.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unbuildable_bag_does_not_block_later_scenarios() {
    let resets = Arc::new(AtomicUsize::new(0));
    let mut registry = ServiceRegistry::new();
    register_cleaner(&mut registry).unwrap();
    registry.register("good.a", bag(&resets, false, true)).unwrap();
    registry
        .register(
            "broken",
            ServiceDescriptor::construct(|_| Err(Error::construction("broken", "boom")))
                .with_tag(Tag::new(BAG_TAG).with_attribute(BAG_RESET_ATTRIBUTE, true)),
        )
        .unwrap();
    registry.register("good.b", bag(&resets, false, true)).unwrap();

    let services = process(registry, WiringPlan::default()).unwrap();

    for _ in 0..2 {
        let report = services.finish_scenario().unwrap();
        assert_eq!(report.reset, vec!["good.a", "good.b"]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].to_string().contains("boom"));
    }
    assert_eq!(resets.load(Ordering::SeqCst), 4);
    assert!(!services.registry().is_instantiated("broken"));
}
