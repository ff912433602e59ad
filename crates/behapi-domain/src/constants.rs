//! Well-known identifiers
//!
//! Service ids and tag names are the contract with the runner and with
//! extensions that tag their own services into the collected sets.

// ============================================================================
// TAGS
// ============================================================================

/// Tag collected into the initializer chain
pub const CONTEXT_INITIALIZER_TAG: &str = "context.initializer";

/// Tag marking stateful services that may be reset between scenarios
pub const BAG_TAG: &str = "behapi.bag";

/// Attribute of [`BAG_TAG`] that opts a bag into the reset pass
pub const BAG_RESET_ATTRIBUTE: &str = "reset";

// ============================================================================
// SERVICE IDENTIFIERS
// ============================================================================

/// Debug reporter
pub const DEBUG_SERVICE: &str = "behapi.debug";

/// HTTP client built through the client factory
pub const HTTP_CLIENT_SERVICE: &str = "behapi.http.client";

/// Factory used to build [`HTTP_CLIENT_SERVICE`]
pub const HTTP_FACTORY_SERVICE: &str = "behapi.http.factory";

/// Request history recorder
pub const HTTP_HISTORY_SERVICE: &str = "behapi.http.history";

/// Key-value client
pub const KV_CLIENT_SERVICE: &str = "behapi.kv.client";

/// Template loader chain
pub const TEMPLATE_LOADER_SERVICE: &str = "behapi.templating.loader";

/// Template engine
pub const TEMPLATE_ENGINE_SERVICE: &str = "behapi.templating";

/// Subscriber resetting every collected bag once a scenario finished
pub const CLEANER_SERVICE: &str = "behapi.subscriber.cleaner";

/// Initializer attaching the HTTP client and its history
pub const HTTP_INITIALIZER_SERVICE: &str = "behapi.initializer.http";

/// Initializer attaching the key-value client
pub const KV_INITIALIZER_SERVICE: &str = "behapi.initializer.kv";

/// Initializer attaching the application credentials
pub const AUTHENTICATION_INITIALIZER_SERVICE: &str = "behapi.initializer.authentication";

/// Initializer attaching the template engine
pub const TEMPLATE_INITIALIZER_SERVICE: &str = "behapi.initializer.templating";

// ============================================================================
// FEATURES
// ============================================================================

/// Capability name of the optional templating engine
pub const TEMPLATING_FEATURE: &str = "templating";
