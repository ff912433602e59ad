//! Type-keyed map of shared values
//!
//! Values are stored as `Arc<T>` keyed by `TypeId::of::<T>()`, which lets
//! callers store and fetch trait objects (`Arc<dyn HttpClient>`) as well as
//! concrete types without any runtime type inspection beyond the key.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Map from a type to one shared value of that type
#[derive(Default, Clone)]
pub struct TypeMap {
    entries: HashMap<TypeId, Entry>,
}

#[derive(Clone)]
struct Entry {
    name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl TypeMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `T`, returning the previous value if any
    pub fn insert<T>(&mut self, value: Arc<T>) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let entry = Entry {
            name: type_name::<T>(),
            value: Arc::new(value),
        };
        self.entries
            .insert(TypeId::of::<T>(), entry)
            .and_then(|previous| previous.value.downcast_ref::<Arc<T>>().cloned())
    }

    /// Fetch the value stored under `T`
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Whether a value is stored under `T`
    pub fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}
