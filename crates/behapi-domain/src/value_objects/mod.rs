//! Value objects

pub mod credentials;
pub mod environment;
pub mod http;
pub mod scenario_context;
pub mod type_map;

pub use credentials::AppCredentials;
pub use environment::Environment;
pub use http::{HttpExchange, HttpRequest, HttpResponse};
pub use scenario_context::ScenarioContext;
pub use type_map::TypeMap;
