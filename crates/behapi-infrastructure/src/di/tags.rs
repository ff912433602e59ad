//! Tag collection
//!
//! A [`TaggedCollector`] answers "which services carry this tag?" during
//! composition, without building any of them.

use super::descriptor::TagAttributes;
use super::registry::{ServiceRegistry, TaggedService};

type Predicate = Box<dyn Fn(&TagAttributes) -> bool + Send + Sync>;

/// Collects the services tagged with one name
pub struct TaggedCollector {
    tag: String,
    predicate: Predicate,
}

impl TaggedCollector {
    /// Collector accepting every occurrence of `tag`
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            predicate: Box::new(always),
        }
    }

    /// Only accept occurrences whose attributes satisfy `predicate`
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&TagAttributes) -> bool + Send + Sync + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    /// Tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Matching occurrences, in registration order
    pub fn collect<'r>(&self, registry: &'r ServiceRegistry) -> Vec<TaggedService<'r>> {
        registry.find_tagged(&self.tag, |attributes| (self.predicate)(attributes))
    }

    /// Identifiers of the matching occurrences, in registration order
    pub fn collect_ids(&self, registry: &ServiceRegistry) -> Vec<String> {
        self.collect(registry)
            .into_iter()
            .map(|found| found.id.to_string())
            .collect()
    }
}

impl std::fmt::Debug for TaggedCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggedCollector")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Accepts every occurrence
pub fn always(_: &TagAttributes) -> bool {
    true
}

/// Accepts occurrences whose attribute `name` is the boolean `true`
///
/// Absent attributes and any other value, including the string `"true"`,
/// are rejected.
pub fn attribute_is_true(name: &'static str) -> impl Fn(&TagAttributes) -> bool + Send + Sync {
    move |attributes| matches!(attributes.get(name), Some(serde_json::Value::Bool(true)))
}
