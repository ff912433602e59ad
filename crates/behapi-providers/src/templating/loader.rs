//! Template loader chain
//!
//! Ordered list of template sources handed to the engine when it is built.
//! Later sources override earlier ones registered under the same name.

use std::path::PathBuf;
use std::sync::RwLock;

/// Where a named template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template body given inline
    Inline {
        /// Template name
        name: String,
        /// Template body
        content: String,
    },
    /// Template read from a file
    File {
        /// Template name
        name: String,
        /// Path of the file
        path: PathBuf,
    },
}

impl TemplateSource {
    /// Name the template is registered under
    pub fn name(&self) -> &str {
        match self {
            Self::Inline { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Chain of template sources
#[derive(Debug, Default)]
pub struct TemplateLoaderChain {
    sources: RwLock<Vec<TemplateSource>>,
}

impl TemplateLoaderChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source
    pub fn add(&self, source: TemplateSource) {
        if let Ok(mut sources) = self.sources.write() {
            sources.push(source);
        }
    }

    /// Append an inline template
    pub fn add_inline(&self, name: impl Into<String>, content: impl Into<String>) {
        self.add(TemplateSource::Inline {
            name: name.into(),
            content: content.into(),
        });
    }

    /// Append a template file
    pub fn add_file(&self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.add(TemplateSource::File {
            name: name.into(),
            path: path.into(),
        });
    }

    /// Snapshot of the sources, in chain order
    pub fn sources(&self) -> Vec<TemplateSource> {
        self.sources.read().map(|s| s.clone()).unwrap_or_default()
    }
}
