//! HTTP client, its factory and the request history

pub mod client;
pub mod factory;
pub mod history;

pub use client::{HttpClientOptions, ReqwestHttpClient, resolve_url};
pub use factory::HttpClientFactory;
pub use history::HistoryRecorder;
