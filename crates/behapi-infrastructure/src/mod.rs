//! # Infrastructure Layer
//!
//! Composition root of behapi: configuration, logging and the service
//! registry that turns a validated configuration into the graph of
//! collaborators handed to every scenario.
//!
//! ## Module Categories
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/env configuration loading and validation |
//! | [`di`] | service registry, tag collection, conditional wiring, lifecycle |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use error_ext::ErrorContext;
