//! Cleaner and initializer chain tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use behapi_domain::error::{Error, Result};
use behapi_domain::ports::{ContextInitializer, ResettableBag};
use behapi_domain::value_objects::ScenarioContext;
use behapi_infrastructure::di::{
    InitializerChain, Instance, ResetCoordinator, ServiceDescriptor, ServiceRegistry, Tag,
};

#[derive(Default)]
struct CountingBag {
    resets: AtomicUsize,
}

impl ResettableBag for CountingBag {
    fn reset(&self) -> Result<()> {
        self.resets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct BrokenBag;

impl ResettableBag for BrokenBag {
    fn reset(&self) -> Result<()> {
        Err(Error::infrastructure("disk on fire"))
    }
}

fn shared<T: ResettableBag + 'static>(bag: Arc<T>) -> ServiceDescriptor {
    ServiceDescriptor::construct(move |_| {
        Ok(Instance::from_arc(bag.clone()).provide::<dyn ResettableBag>(bag.clone()))
    })
}

#[test]
fn test_failing_bag_does_not_stop_the_others() {
    let before = Arc::new(CountingBag::default());
    let after = Arc::new(CountingBag::default());
    let mut registry = ServiceRegistry::new();
    registry.register("before", shared(before.clone())).unwrap();
    registry.register("broken", shared(Arc::new(BrokenBag))).unwrap();
    registry.register("after", shared(after.clone())).unwrap();

    let cleaner = ResetCoordinator::new();
    cleaner.add_bag("before").unwrap();
    cleaner.add_bag("broken").unwrap();
    cleaner.add_bag("after").unwrap();

    let report = cleaner.reset_all(&registry);

    assert_eq!(before.resets.load(Ordering::SeqCst), 1);
    assert_eq!(after.resets.load(Ordering::SeqCst), 1);
    assert_eq!(report.reset, vec!["before", "after"]);
    assert_eq!(report.attempted(), 3);
    assert!(!report.is_clean());
    assert!(matches!(
        &report.failures[0],
        Error::ResetFailure { bag, message } if bag == "broken" && message == "Infrastructure error: disk on fire"
    ));
}

#[test]
fn test_unresolvable_bags_fail_alone() {
    let healthy = Arc::new(CountingBag::default());
    let mut registry = ServiceRegistry::new();
    registry.register("healthy", shared(healthy.clone())).unwrap();
    registry
        .register(
            "unbuildable",
            ServiceDescriptor::construct(|_| Err(Error::construction("unbuildable", "boom"))),
        )
        .unwrap();
    registry
        .register("plain", ServiceDescriptor::construct(|_| Ok(Instance::new(()))))
        .unwrap();

    let cleaner = ResetCoordinator::new();
    for id in ["unbuildable", "plain", "missing", "healthy"] {
        cleaner.add_bag(id).unwrap();
    }

    let report = cleaner.reset_all(&registry);

    assert_eq!(report.reset, vec!["healthy"]);
    assert_eq!(healthy.resets.load(Ordering::SeqCst), 1);
    let failed: Vec<&str> = report
        .failures
        .iter()
        .filter_map(|e| match e {
            Error::ResetFailure { bag, .. } => Some(bag.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(failed, vec!["unbuildable", "plain", "missing"]);
}

#[test]
fn test_bags_are_held_in_order() {
    let mut registry = ServiceRegistry::new();
    registry.register("a", shared(Arc::new(CountingBag::default()))).unwrap();
    registry.register("b", shared(Arc::new(CountingBag::default()))).unwrap();

    let cleaner = ResetCoordinator::new();
    assert!(cleaner.is_empty());
    cleaner.add_bag("a").unwrap();
    cleaner.add_bag("b").unwrap();

    assert_eq!(cleaner.held_ids(), vec!["a", "b"]);
    assert_eq!(cleaner.len(), 2);
    assert!(cleaner.reset_all(&registry).is_clean());
}

struct Marker(&'static str);

struct MarkingInitializer(&'static str);

impl ContextInitializer for MarkingInitializer {
    fn initialize_context(&self, context: &mut ScenarioContext) -> Result<()> {
        context.attach(Arc::new(Marker(self.0)));
        Ok(())
    }
}

fn marking(name: &'static str) -> ServiceDescriptor {
    ServiceDescriptor::construct(move |_| {
        let initializer = Arc::new(MarkingInitializer(name));
        Ok(Instance::from_arc(initializer.clone()).provide::<dyn ContextInitializer>(initializer))
    })
    .with_tag(Tag::new("context.initializer"))
}

#[test]
fn test_chain_runs_in_registration_order() {
    let mut registry = ServiceRegistry::new();
    registry.register("init.first", marking("first")).unwrap();
    registry.register("init.second", marking("second")).unwrap();

    let chain = InitializerChain::collect(&registry);
    assert_eq!(chain.ids(), ["init.first", "init.second"]);
    assert_eq!(registry.instantiated_count(), 0);

    let mut context = ScenarioContext::new("ordering");
    chain.apply(&registry, &mut context).unwrap();

    // The last initializer wins for a given collaborator type
    assert_eq!(context.get::<Marker>().unwrap().0, "second");
}

#[test]
fn test_tag_on_non_initializer_fails_when_applied() {
    let mut registry = ServiceRegistry::new();
    registry
        .register(
            "not.an.initializer",
            ServiceDescriptor::construct(|_| Ok(Instance::new(())))
                .with_tag(Tag::new("context.initializer")),
        )
        .unwrap();

    let chain = InitializerChain::collect(&registry);
    let mut context = ScenarioContext::new("broken");

    assert!(matches!(
        chain.apply(&registry, &mut context),
        Err(Error::ServiceType { id, .. }) if id == "not.an.initializer"
    ));
}
