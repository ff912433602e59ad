//! Debug reporter
//!
//! Renders the last HTTP exchange when debugging is switched on for the
//! running scenario. Switching debugging on only lasts for one scenario:
//! the reporter is a bag and its reset switches it back off.

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use behapi_domain::error::Result;
use behapi_domain::ports::ResettableBag;
use behapi_domain::value_objects::HttpExchange;
use tracing::warn;

use crate::http::HistoryRecorder;

/// Output format of the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugFormat {
    /// Human readable, HTTP-like dump
    #[default]
    Pretty,
    /// Pretty-printed JSON document
    Json,
}

impl FromStr for DebugFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown debug formatter '{other}'")),
        }
    }
}

/// Reporter of the last exchanges
#[derive(Debug)]
pub struct DebugReporter {
    format: DebugFormat,
    enabled: AtomicBool,
}

impl DebugReporter {
    /// Create a disabled reporter using the formatter called `formatter`
    ///
    /// Unknown formatter names fall back to `pretty`.
    pub fn new(formatter: &str) -> Self {
        let format = formatter.parse().unwrap_or_else(|e: String| {
            warn!(formatter, "{e}, falling back to pretty");
            DebugFormat::Pretty
        });
        Self::with_format(format)
    }

    /// Create a disabled reporter with an explicit format
    pub fn with_format(format: DebugFormat) -> Self {
        Self {
            format,
            enabled: AtomicBool::new(false),
        }
    }

    /// Selected format
    pub fn format(&self) -> DebugFormat {
        self.format
    }

    /// Switch reporting on until the end of the scenario
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Switch reporting off
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Whether reporting is on
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Report of the last recorded exchange, if reporting is on
    pub fn report(&self, history: &HistoryRecorder) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        history.last().map(|exchange| self.render(&exchange))
    }

    /// Render one exchange in the selected format
    pub fn render(&self, exchange: &HttpExchange) -> String {
        match self.format {
            DebugFormat::Pretty => render_pretty(exchange),
            DebugFormat::Json => serde_json::to_string_pretty(exchange)
                .unwrap_or_else(|e| format!("<unserializable exchange: {e}>")),
        }
    }
}

fn render_pretty(exchange: &HttpExchange) -> String {
    let mut out = String::new();
    let request = &exchange.request;
    let response = &exchange.response;

    let _ = writeln!(out, "{} {}", request.method, request.url);
    for (name, value) in &request.headers {
        let _ = writeln!(out, "{name}: {value}");
    }
    if let Some(body) = &request.body {
        let _ = writeln!(out, "\n{body}");
    }

    let _ = writeln!(out, "\nHTTP {}", response.status);
    for (name, value) in &response.headers {
        let _ = writeln!(out, "{name}: {value}");
    }
    if !response.body.is_empty() {
        let _ = writeln!(out, "\n{}", response.body);
    }
    out
}

impl ResettableBag for DebugReporter {
    fn reset(&self) -> Result<()> {
        self.disable();
        Ok(())
    }
}
