//! Domain Port Interfaces
//!
//! Capabilities the composition root wires together. Concrete adapters live
//! in `behapi-providers`; consumers only ever see these traits.
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`ContextInitializer`] | every service tagged `context.initializer` |
//! | [`ResettableBag`] | every service tagged `behapi.bag` |
//! | [`HttpClient`] / [`RequestSubscriber`] | HTTP client and its history |
//! | [`KeyValueClient`] | key-value store client |
//! | [`TemplateEngine`] | optional templating engine |

pub mod bag;
pub mod context;
pub mod http;
pub mod kv;
pub mod templating;

pub use bag::ResettableBag;
pub use context::ContextInitializer;
pub use http::{HttpClient, RequestSubscriber};
pub use kv::KeyValueClient;
pub use templating::TemplateEngine;
