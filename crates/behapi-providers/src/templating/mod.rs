//! Templating engine
//!
//! The loader chain is always available; the Tera engine is only compiled
//! with the `templating` feature.

pub mod loader;
#[cfg(feature = "templating")]
pub mod tera;

pub use loader::{TemplateLoaderChain, TemplateSource};
#[cfg(feature = "templating")]
pub use self::tera::{TemplateOptions, TeraTemplateEngine};

