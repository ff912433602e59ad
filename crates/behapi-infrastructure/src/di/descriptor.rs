//! Service descriptors
//!
//! A descriptor is the recipe for one service: how to obtain it (direct
//! constructor or a method of another service), its positional arguments,
//! the method calls applied once it exists and the tags it carries.
//! Descriptors stay editable until the service is first requested, which is
//! how the composition pass appends `add_bag` calls to the cleaner.

use std::collections::BTreeMap;
use std::sync::Arc;

use behapi_domain::error::Result;
use serde::Serialize;

use super::instance::{Arguments, Instance};
use crate::error_ext::ErrorContext;

/// Builds an instance from its resolved arguments
pub type Constructor = Arc<dyn Fn(&Arguments) -> Result<Instance> + Send + Sync>;

/// Builds an instance by calling a method of an already built factory
pub type FactoryMethod = Arc<dyn Fn(&Instance, &Arguments) -> Result<Instance> + Send + Sync>;

/// Applies a method call to a freshly built instance
pub type MethodInvoker = Arc<dyn Fn(&Instance, &Arguments) -> Result<()> + Send + Sync>;

/// Attributes of a tag occurrence
pub type TagAttributes = BTreeMap<String, serde_json::Value>;

/// A positional argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Literal value, deserialized by the receiver
    Value(serde_json::Value),
    /// Identifier of another service
    Reference(String),
}

impl Argument {
    /// Literal argument
    pub fn value(value: impl Into<serde_json::Value>) -> Self {
        Self::Value(value.into())
    }

    /// Literal argument serialized from any serde type
    pub fn serialized<T: Serialize>(value: &T) -> Result<Self> {
        let value =
            serde_json::to_value(value).context("Failed to serialize service argument")?;
        Ok(Self::Value(value))
    }

    /// Reference to another service
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }

    /// Referenced identifier, if any
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(id) => Some(id),
            Self::Value(_) => None,
        }
    }
}

/// How a service is obtained
#[derive(Clone)]
pub enum Recipe {
    /// Direct construction
    Construct(Constructor),
    /// `service.method(arguments...)`
    Factory {
        /// Identifier of the factory service
        service: String,
        /// Name of the factory method, for diagnostics
        method: String,
        /// The call itself
        build: FactoryMethod,
    },
}

impl std::fmt::Debug for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Construct(_) => f.write_str("Construct"),
            Self::Factory {
                service, method, ..
            } => write!(f, "Factory({service}::{method})"),
        }
    }
}

/// A method invoked on the instance right after it is built
#[derive(Clone)]
pub struct MethodCall {
    name: String,
    arguments: Vec<Argument>,
    invoke: MethodInvoker,
}

impl MethodCall {
    /// Call `name` with `arguments`
    pub fn new<F>(name: impl Into<String>, arguments: Vec<Argument>, invoke: F) -> Self
    where
        F: Fn(&Instance, &Arguments) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arguments,
            invoke: Arc::new(invoke),
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments of the call
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Apply the call to `target`
    pub fn invoke(&self, target: &Instance, arguments: &Arguments) -> Result<()> {
        (self.invoke)(target, arguments)
    }
}

impl std::fmt::Debug for MethodCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodCall")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// A tag occurrence; a service may carry the same tag several times
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Free-form attributes
    pub attributes: TagAttributes,
}

impl Tag {
    /// Tag without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: TagAttributes::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Recipe, arguments, method calls and tags of one service
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    recipe: Recipe,
    arguments: Vec<Argument>,
    calls: Vec<MethodCall>,
    tags: Vec<Tag>,
}

impl ServiceDescriptor {
    /// Service built by `constructor`
    pub fn construct<F>(constructor: F) -> Self
    where
        F: Fn(&Arguments) -> Result<Instance> + Send + Sync + 'static,
    {
        Self::with_recipe(Recipe::Construct(Arc::new(constructor)))
    }

    /// Service obtained by calling `method` on the service `factory`
    pub fn from_factory<F>(factory: impl Into<String>, method: impl Into<String>, build: F) -> Self
    where
        F: Fn(&Instance, &Arguments) -> Result<Instance> + Send + Sync + 'static,
    {
        Self::with_recipe(Recipe::Factory {
            service: factory.into(),
            method: method.into(),
            build: Arc::new(build),
        })
    }

    fn with_recipe(recipe: Recipe) -> Self {
        Self {
            recipe,
            arguments: Vec::new(),
            calls: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a positional argument
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Append a literal argument
    pub fn with_value(self, value: impl Into<serde_json::Value>) -> Self {
        self.with_argument(Argument::value(value))
    }

    /// Append a reference argument
    pub fn with_reference(self, id: impl Into<String>) -> Self {
        self.with_argument(Argument::reference(id))
    }

    /// Append a method call
    pub fn with_method_call<F>(self, name: impl Into<String>, arguments: Vec<Argument>, invoke: F) -> Self
    where
        F: Fn(&Instance, &Arguments) -> Result<()> + Send + Sync + 'static,
    {
        let mut this = self;
        this.add_method_call(MethodCall::new(name, arguments, invoke));
        this
    }

    /// Append a method call to an existing descriptor
    pub fn add_method_call(&mut self, call: MethodCall) {
        self.calls.push(call);
    }

    /// Add a tag occurrence
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// How the service is obtained
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Positional arguments
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Method calls, in application order
    pub fn method_calls(&self) -> &[MethodCall] {
        &self.calls
    }

    /// Tag occurrences, in declaration order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether the service carries `tag` at least once
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.name == tag)
    }

    /// Every service this one needs before it can exist
    ///
    /// Factory first, then arguments, then method call arguments.
    pub fn references(&self) -> Vec<&str> {
        let factory = match &self.recipe {
            Recipe::Factory { service, .. } => Some(service.as_str()),
            Recipe::Construct(_) => None,
        };
        factory
            .into_iter()
            .chain(self.arguments.iter().filter_map(Argument::as_reference))
            .chain(
                self.calls
                    .iter()
                    .flat_map(|call| call.arguments.iter().filter_map(Argument::as_reference)),
            )
            .collect()
    }
}
