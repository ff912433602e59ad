//! # Domain Layer
//!
//! Types and port traits shared by every behapi layer.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Well-known service identifiers and tag names |
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`ports`] | Capabilities the composition root wires together |
//! | [`value_objects`] | Scenario context, HTTP exchanges, environment |
//!
//! Nothing in this crate performs I/O. Adapters live in `behapi-providers`
//! and the wiring lives in `behapi-infrastructure`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
