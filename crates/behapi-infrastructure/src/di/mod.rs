//! Dependency injection
//!
//! A small registry of named service descriptors, built lazily and shared.
//! Composition happens once per run in [`bootstrap`]; scenarios then only
//! read from the resulting [`ComposedServices`].

pub mod bootstrap;
pub mod conditional;
pub mod descriptor;
pub mod instance;
pub mod lifecycle;
pub mod registry;
pub mod tags;

pub use bootstrap::{compose, compose_raw, process, register_cleaner};
pub use conditional::{CapabilityFacts, ConditionalWiringPolicy, WiringPlan};
pub use descriptor::{Argument, MethodCall, Recipe, ServiceDescriptor, Tag, TagAttributes};
pub use instance::{Arguments, Instance, ResolvedArgument};
pub use lifecycle::{ComposedServices, InitializerChain, ResetCoordinator, ResetReport};
pub use registry::{ServiceRegistry, TaggedService};
pub use tags::TaggedCollector;
