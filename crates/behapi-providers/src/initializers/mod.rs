//! Context initializers
//!
//! Each initializer attaches the collaborators it was built with onto a
//! fresh [`ScenarioContext`](behapi_domain::value_objects::ScenarioContext).

pub mod authentication;
pub mod http;
pub mod kv;
pub mod templating;

pub use authentication::AuthenticationInitializer;
pub use http::HttpInitializer;
pub use kv::KeyValueInitializer;
pub use templating::TemplatingInitializer;
