//! Service instances and resolved arguments
//!
//! An [`Instance`] is the shared value built from a descriptor. Besides its
//! concrete type it exposes the capability views its constructor declared
//! (`Arc<dyn ResettableBag>`, `Arc<dyn ContextInitializer>`...), so that
//! consumers such as the cleaner can use a service without knowing what it
//! is.

use std::any::type_name;
use std::sync::Arc;

use behapi_domain::error::{Error, Result};
use behapi_domain::value_objects::TypeMap;
use serde::de::DeserializeOwned;

/// A constructed, shareable service
#[derive(Clone)]
pub struct Instance {
    type_name: &'static str,
    views: Arc<TypeMap>,
}

impl Instance {
    /// Wrap `value`; it is retrievable as `T`
    pub fn new<T>(value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value; it is retrievable as `T`
    pub fn from_arc<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut views = TypeMap::new();
        views.insert(value);
        Self {
            type_name: type_name::<T>(),
            views: Arc::new(views),
        }
    }

    /// Declare an additional view of the same value (usually a trait object)
    pub fn provide<T>(mut self, view: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.views).insert(view);
        self
    }

    /// Fetch the view of type `T`
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.views.get::<T>()
    }

    /// Whether a view of type `T` was declared
    pub fn provides<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.views.contains::<T>()
    }

    /// Name of the type the instance was created from
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles point to the same instance
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.views, &other.views)
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_name)
            .field("views", &self.views)
            .finish()
    }
}

/// An argument after resolution
#[derive(Debug, Clone)]
pub enum ResolvedArgument {
    /// Literal value, unchanged
    Value(serde_json::Value),
    /// Referenced service, instantiated
    Service {
        /// Referenced identifier
        id: String,
        /// Its instance
        instance: Instance,
    },
}

/// Positional arguments handed to a constructor, factory method or method call
#[derive(Debug, Clone)]
pub struct Arguments {
    owner: String,
    items: Vec<ResolvedArgument>,
}

impl Arguments {
    /// Arguments of the service `owner`
    pub fn new(owner: impl Into<String>, items: Vec<ResolvedArgument>) -> Self {
        Self {
            owner: owner.into(),
            items,
        }
    }

    /// Identifier of the service being built
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item(&self, index: usize) -> Result<&ResolvedArgument> {
        self.items.get(index).ok_or_else(|| {
            Error::construction(&self.owner, format!("missing argument #{index}"))
        })
    }

    /// Deserialize the literal argument at `index`
    pub fn value<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        match self.item(index)? {
            ResolvedArgument::Value(value) => serde_json::from_value(value.clone()).map_err(|e| {
                Error::construction(&self.owner, format!("invalid argument #{index}: {e}"))
            }),
            ResolvedArgument::Service { .. } => Err(Error::service_type(
                format!("{}#{index}", self.owner),
                type_name::<T>(),
            )),
        }
    }

    /// Instance referenced by the argument at `index`
    pub fn instance(&self, index: usize) -> Result<&Instance> {
        match self.item(index)? {
            ResolvedArgument::Service { instance, .. } => Ok(instance),
            ResolvedArgument::Value(_) => Err(Error::construction(
                &self.owner,
                format!("argument #{index} is a value, not a service reference"),
            )),
        }
    }

    /// View `T` of the service referenced at `index`
    pub fn service<T>(&self, index: usize) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.item(index)? {
            ResolvedArgument::Service { id, instance } => instance
                .get::<T>()
                .ok_or_else(|| Error::service_type(id, type_name::<T>())),
            ResolvedArgument::Value(_) => Err(Error::construction(
                &self.owner,
                format!("argument #{index} is a value, not a service reference"),
            )),
        }
    }
}
