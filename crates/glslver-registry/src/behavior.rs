//! Extension behavior states
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("behavior not supported: {0}")]
    UnknownBehavior(String),
}

/// The declared policy for an extension in the current compilation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionBehavior {
    /// Never declared by this shader
    #[default]
    Missing,
    Require,
    Enable,
    /// Usable, but every use is reported
    Warn,
    /// Explicitly turned off
    Disable,
}

impl ExtensionBehavior {
    /// `Enable` or `Require`. `Warn` does not count as on.
    pub fn is_turned_on(self) -> bool {
        matches!(self, ExtensionBehavior::Enable | ExtensionBehavior::Require)
    }

    /// Any state other than `Missing`
    pub fn is_declared(self) -> bool {
        self != ExtensionBehavior::Missing
    }

    /// The `#extension` keyword for this behavior
    pub fn keyword(self) -> &'static str {
        match self {
            ExtensionBehavior::Missing => "missing",
            ExtensionBehavior::Require => "require",
            ExtensionBehavior::Enable => "enable",
            ExtensionBehavior::Warn => "warn",
            ExtensionBehavior::Disable => "disable",
        }
    }
}

impl fmt::Display for ExtensionBehavior {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parses the behavior keyword of an `#extension` directive. `missing` is not
/// a keyword a shader can write.
impl FromStr for ExtensionBehavior {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require" => Ok(ExtensionBehavior::Require),
            "enable" => Ok(ExtensionBehavior::Enable),
            "disable" => Ok(ExtensionBehavior::Disable),
            "warn" => Ok(ExtensionBehavior::Warn),
            other => Err(RegistryError::UnknownBehavior(other.to_string())),
        }
    }
}
