//! Tagged collector tests

use behapi_infrastructure::di::tags::{always, attribute_is_true};
use behapi_infrastructure::di::{Instance, ServiceDescriptor, ServiceRegistry, Tag, TaggedCollector};
use serde_json::json;

fn unit() -> ServiceDescriptor {
    ServiceDescriptor::construct(|_| Ok(Instance::new(())))
}

fn bag(reset: serde_json::Value) -> ServiceDescriptor {
    unit().with_tag(Tag::new("bag").with_attribute("reset", reset))
}

#[test]
fn test_collects_in_registration_order() {
    let mut registry = ServiceRegistry::new();
    registry.register("third.alphabetically", unit().with_tag(Tag::new("init"))).unwrap();
    registry.register("other", unit()).unwrap();
    registry.register("first.alphabetically", unit().with_tag(Tag::new("init"))).unwrap();

    let ids = TaggedCollector::new("init").collect_ids(&registry);
    assert_eq!(ids, vec!["third.alphabetically", "first.alphabetically"]);
}

#[test]
fn test_only_boolean_true_is_accepted() {
    let mut registry = ServiceRegistry::new();
    registry.register("one", bag(json!(true))).unwrap();
    registry.register("two", bag(json!(false))).unwrap();
    registry.register("three", bag(json!("true"))).unwrap();
    registry.register("four", unit().with_tag(Tag::new("bag"))).unwrap();
    registry.register("five", bag(json!(true))).unwrap();

    let collector = TaggedCollector::new("bag").with_predicate(attribute_is_true("reset"));
    assert_eq!(collector.collect_ids(&registry), vec!["one", "five"]);
    assert_eq!(collector.tag(), "bag");
}

#[test]
fn test_collected_occurrences_expose_attributes() {
    let mut registry = ServiceRegistry::new();
    registry.register("bag", bag(json!(true))).unwrap();

    let found = TaggedCollector::new("bag").collect(&registry);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "bag");
    assert_eq!(found[0].attributes.get("reset"), Some(&json!(true)));
    assert!(found[0].descriptor.has_tag("bag"));
}

#[test]
fn test_unknown_tag_collects_nothing() {
    let mut registry = ServiceRegistry::new();
    registry.register("svc", unit().with_tag(Tag::new("init"))).unwrap();

    assert!(TaggedCollector::new("missing").collect_ids(&registry).is_empty());
    assert!(always(&Default::default()));
    assert_eq!(registry.instantiated_count(), 0);
}
