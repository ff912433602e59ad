//! Templating engine port

use crate::error::Result;

/// Renders templates used to build request payloads
pub trait TemplateEngine: Send + Sync {
    /// Render an inline template with `variables` (a JSON object)
    fn render_str(&self, template: &str, variables: &serde_json::Value) -> Result<String>;

    /// Render a template known to the engine's loaders
    fn render(&self, name: &str, variables: &serde_json::Value) -> Result<String>;

    /// Whether the engine runs in debug mode
    fn is_debug(&self) -> bool;
}
