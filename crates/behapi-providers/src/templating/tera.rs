//! Tera template engine
//!
//! Autoescaping is always off: templates produce request payloads, not HTML.

use behapi_domain::error::{Error, Result};
use behapi_domain::ports::TemplateEngine;
use tera::{Context, Tera};
use tracing::debug;

use super::loader::{TemplateLoaderChain, TemplateSource};

/// Engine options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplateOptions {
    /// Debug mode, on in the `dev` environment
    pub debug: bool,
}

/// [`TemplateEngine`] backed by Tera
#[derive(Debug)]
pub struct TeraTemplateEngine {
    tera: Tera,
    options: TemplateOptions,
}

impl TeraTemplateEngine {
    /// Build an engine loading every template of `loader`
    pub fn new(loader: &TemplateLoaderChain, options: TemplateOptions) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());

        for source in loader.sources() {
            debug!(template = source.name(), "Loading template");
            let loaded = match &source {
                TemplateSource::Inline { name, content } => tera.add_raw_template(name, content),
                TemplateSource::File { name, path } => {
                    tera.add_template_file(path, Some(name.as_str()))
                }
            };
            loaded.map_err(|e| {
                Error::template(format!("Failed to load template '{}': {e}", source.name()))
            })?;
        }

        Ok(Self { tera, options })
    }

    /// Names of the loaded templates
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }
}

fn context(variables: &serde_json::Value) -> Result<Context> {
    if variables.is_null() {
        return Ok(Context::new());
    }
    Context::from_value(variables.clone())
        .map_err(|e| Error::template(format!("Template variables must be an object: {e}")))
}

impl TemplateEngine for TeraTemplateEngine {
    fn render_str(&self, template: &str, variables: &serde_json::Value) -> Result<String> {
        Tera::one_off(template, &context(variables)?, false)
            .map_err(|e| Error::template(format!("Failed to render inline template: {e}")))
    }

    fn render(&self, name: &str, variables: &serde_json::Value) -> Result<String> {
        self.tera
            .render(name, &context(variables)?)
            .map_err(|e| Error::template(format!("Failed to render '{name}': {e}")))
    }

    fn is_debug(&self) -> bool {
        self.options.debug
    }
}
