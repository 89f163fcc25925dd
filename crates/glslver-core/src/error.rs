//! Unified Error Model
//!
//! These are contract violations and configuration failures. Rule violations
//! found in shader source are diagnostics, not errors of this type.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatError {
    #[error("SCANNER/no active input scanner")]
    NoActiveScanner,

    #[error("CONFIG/unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("CONFIG/unknown stage '{0}'")]
    UnknownStage(String),

    #[error("CONFIG/invalid target environment: {0}")]
    InvalidTarget(String),

    #[error("PARSE/{0}")]
    ConfigParse(String),
}
