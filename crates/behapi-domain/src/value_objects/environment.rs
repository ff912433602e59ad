//! Target environment of a test run

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment the tested application runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment; enables debug helpers
    #[default]
    Dev,
    /// Test environment
    Test,
}

impl Environment {
    /// Every accepted value, in declaration order
    pub const ALL: [Environment; 2] = [Environment::Dev, Environment::Test];

    /// Lowercase name as used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }

    /// Whether debug helpers (template debug mode...) are on
    pub fn is_debug(self) -> bool {
        self == Self::Dev
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "must be one of {}, got '{s}'",
                    Self::ALL.map(Environment::as_str).join(", ")
                )
            })
    }
}
