//! # Provider Implementations
//!
//! Concrete adapters behind the domain ports. None of them knows about the
//! service registry: the composition root in `behapi-infrastructure` builds
//! them and decides which ones are wired.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`http`] | reqwest client, client factory, request history |
//! | [`kv`] | Redis key-value client |
//! | [`templating`] | loader chain and Tera engine (`templating` feature) |
//! | [`debug`] | debug reporter |
//! | [`initializers`] | scenario context initializers |

pub mod debug;
pub mod http;
pub mod initializers;
pub mod kv;
pub mod templating;

pub use debug::{DebugFormat, DebugReporter};
