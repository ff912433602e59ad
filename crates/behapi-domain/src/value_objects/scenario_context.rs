//! Per-scenario context
//!
//! The runner creates one context per scenario and hands it to every
//! initializer before the scenario's steps execute. Initializers attach the
//! collaborators they own; steps then fetch them by type.

use std::sync::Arc;

use super::type_map::TypeMap;

/// State object handed to the steps of one scenario
#[derive(Debug, Default)]
pub struct ScenarioContext {
    title: String,
    collaborators: TypeMap,
}

impl ScenarioContext {
    /// Create an empty context for the scenario called `title`
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collaborators: TypeMap::new(),
        }
    }

    /// Scenario title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Attach a collaborator, replacing any previous one of the same type
    pub fn attach<T>(&mut self, collaborator: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.collaborators.insert(collaborator);
    }

    /// Fetch an attached collaborator
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.collaborators.get::<T>()
    }

    /// Whether a collaborator of type `T` was attached
    pub fn has<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.collaborators.contains::<T>()
    }
}
