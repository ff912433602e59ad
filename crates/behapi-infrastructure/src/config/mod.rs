//! Configuration
//!
//! [`ConfigLoader`] merges the TOML file and `BEHAPI_*` environment
//! variables into a [`RawBehapiConfig`]; [`ConfigurationSchema`] turns that
//! into a [`CompositionConfig`] or rejects it with every violated field.

pub mod loader;
pub mod schema;
pub mod types;

pub use loader::ConfigLoader;
pub use schema::ConfigurationSchema;
pub use types::*;
