//! Configuration types module

pub mod behapi;
pub mod logging;
pub mod services;

// Re-export main types
pub use behapi::*;
pub use logging::*;
pub use services::*;
