//! Service registry
//!
//! Maps identifiers to descriptors and lazily built, shared instances.
//!
//! - Every identifier is built at most once; concurrent first requests
//!   wait for the single construction (`OnceCell::get_or_try_init`).
//! - Before anything is built, the reference graph reachable from the
//!   requested service is walked and any cycle is reported with its path.
//!   Resolution therefore never recurses forever and never waits on a cell
//!   its own thread is initializing.
//! - A failed construction leaves the cell empty: the next request retries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use behapi_domain::error::{Error, Result};
use once_cell::sync::OnceCell;
use tracing::debug;

use super::descriptor::{Argument, Recipe, ServiceDescriptor, TagAttributes};
use super::instance::{Arguments, Instance, ResolvedArgument};

struct Entry {
    id: String,
    descriptor: ServiceDescriptor,
    instance: OnceCell<Instance>,
}

/// One tag occurrence found by [`ServiceRegistry::find_tagged`]
#[derive(Debug, Clone, Copy)]
pub struct TaggedService<'r> {
    /// Identifier of the tagged service
    pub id: &'r str,
    /// Its descriptor
    pub descriptor: &'r ServiceDescriptor,
    /// Attributes of this occurrence
    pub attributes: &'r TagAttributes,
}

/// Registry of service descriptors and their instances
#[derive(Default)]
pub struct ServiceRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `descriptor` under `id`
    ///
    /// Identifiers are unique; registering one twice is an error.
    pub fn register(&mut self, id: impl Into<String>, descriptor: ServiceDescriptor) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::duplicate_service(id));
        }
        debug!(service = %id, "Registering service");
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(Entry {
            id,
            descriptor,
            instance: OnceCell::new(),
        });
        Ok(())
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers, in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Descriptor of `id`
    pub fn descriptor(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.index.get(id).map(|&i| &self.entries[i].descriptor)
    }

    /// Editable descriptor of `id`
    ///
    /// An instance built from the previous descriptor is discarded.
    pub fn descriptor_mut(&mut self, id: &str) -> Result<&mut ServiceDescriptor> {
        let index = *self
            .index
            .get(id)
            .ok_or_else(|| Error::unknown_service(id))?;
        let entry = &mut self.entries[index];
        entry.instance.take();
        Ok(&mut entry.descriptor)
    }

    /// Shared instance of `id`, built on first request
    pub fn get(&self, id: &str) -> Result<Instance> {
        let entry = self.entry(id)?;
        if let Some(instance) = entry.instance.get() {
            return Ok(instance.clone());
        }
        self.ensure_acyclic(id)?;
        self.resolve(entry)
    }

    /// View `T` of the instance of `id`
    pub fn get_as<T>(&self, id: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get(id)?
            .get::<T>()
            .ok_or_else(|| Error::service_type(id, std::any::type_name::<T>()))
    }

    /// Whether `id` has been built
    pub fn is_instantiated(&self, id: &str) -> bool {
        self.entry(id)
            .map(|entry| entry.instance.get().is_some())
            .unwrap_or(false)
    }

    /// Number of built services
    pub fn instantiated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.instance.get().is_some())
            .count()
    }

    /// Every occurrence of `tag` whose attributes satisfy `predicate`
    ///
    /// Results follow registration order, then declaration order of the
    /// occurrences within one service. Nothing is instantiated.
    pub fn find_tagged<P>(&self, tag: &str, predicate: P) -> Vec<TaggedService<'_>>
    where
        P: Fn(&TagAttributes) -> bool,
    {
        let mut found = Vec::new();
        for entry in &self.entries {
            for occurrence in entry.descriptor.tags() {
                if occurrence.name == tag && predicate(&occurrence.attributes) {
                    found.push(TaggedService {
                        id: &entry.id,
                        descriptor: &entry.descriptor,
                        attributes: &occurrence.attributes,
                    });
                }
            }
        }
        found
    }

    fn entry(&self, id: &str) -> Result<&Entry> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::unknown_service(id))
    }

    fn ensure_acyclic(&self, root: &str) -> Result<()> {
        let mut path = Vec::new();
        let mut finished = HashSet::new();
        self.visit(root, &mut path, &mut finished)
    }

    /// Depth-first walk; `path` holds the services currently being visited
    fn visit<'a>(
        &'a self,
        id: &'a str,
        path: &mut Vec<&'a str>,
        finished: &mut HashSet<&'a str>,
    ) -> Result<()> {
        if finished.contains(id) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|&visiting| visiting == id) {
            let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            cycle.push(id.to_string());
            return Err(Error::cyclic_dependency(cycle));
        }

        let entry = self.entry(id)?;
        // A built service had all of its dependencies built before it
        if entry.instance.get().is_none() {
            path.push(&entry.id);
            for reference in entry.descriptor.references() {
                self.visit(reference, path, finished)?;
            }
            path.pop();
        }
        finished.insert(&entry.id);
        Ok(())
    }

    fn resolve(&self, entry: &Entry) -> Result<Instance> {
        entry
            .instance
            .get_or_try_init(|| self.instantiate(entry))
            .cloned()
    }

    fn instantiate(&self, entry: &Entry) -> Result<Instance> {
        debug!(service = %entry.id, "Instantiating service");
        let descriptor = &entry.descriptor;
        let arguments = self.resolve_arguments(&entry.id, descriptor.arguments())?;

        let instance = match descriptor.recipe() {
            Recipe::Construct(constructor) => constructor(&arguments)?,
            Recipe::Factory {
                service,
                method,
                build,
            } => {
                let factory = self.resolve(self.entry(service)?)?;
                debug!(service = %entry.id, factory = %service, %method, "Building through factory");
                build(&factory, &arguments)?
            }
        };

        for call in descriptor.method_calls() {
            debug!(service = %entry.id, method = call.name(), "Applying method call");
            let arguments = self.resolve_arguments(&entry.id, call.arguments())?;
            call.invoke(&instance, &arguments)?;
        }

        Ok(instance)
    }

    fn resolve_arguments(&self, owner: &str, arguments: &[Argument]) -> Result<Arguments> {
        let items = arguments
            .iter()
            .map(|argument| match argument {
                Argument::Value(value) => Ok(ResolvedArgument::Value(value.clone())),
                Argument::Reference(id) => Ok(ResolvedArgument::Service {
                    id: id.clone(),
                    instance: self.resolve(self.entry(id)?)?,
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Arguments::new(owner, items))
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.ids().collect::<Vec<_>>())
            .field("instantiated", &self.instantiated_count())
            .finish()
    }
}
