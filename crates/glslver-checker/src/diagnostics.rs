//! Diagnostic sink contract
//!
//! The checker decides *whether* something is wrong; formatting and output
//! belong to whoever implements [`DiagnosticSink`].

use glslver_core::SourceLoc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four reporting primitives the checker needs from its host.
///
/// Implementations only format and deliver. Counting errors is the checker's
/// job, so an implementation must not assume it is the source of truth for
/// compile success.
pub trait DiagnosticSink {
    fn error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>);

    fn warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>);

    /// Error raised while preprocessing
    fn pp_error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>);

    /// Warning raised while preprocessing
    fn pp_warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which front-end phase reported the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Parse,
    Preprocessor,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channel::Parse => write!(f, "parse"),
            Channel::Preprocessor => write!(f, "preprocessor"),
        }
    }
}

/// One reported diagnostic, fully rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub channel: Channel,
    pub loc: SourceLoc,
    /// Short reason, e.g. "not supported with this profile:"
    pub reason: String,
    /// The offending token or feature description
    pub token: String,
    /// Extra information, may be empty
    pub extra: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        channel: Channel,
        loc: &SourceLoc,
        reason: &str,
        token: &str,
        extra: fmt::Arguments<'_>,
    ) -> Self {
        Self {
            severity,
            channel,
            loc: loc.clone(),
            reason: reason.to_string(),
            token: token.to_string(),
            extra: extra.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        write!(f, "{}: {}: '{}' : {}", prefix, self.loc, self.token, self.reason)?;
        if !self.extra.is_empty() {
            write!(f, " {}", self.extra)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_info_log_format() {
        let diag = Diagnostic::new(
            Severity::Error,
            Channel::Parse,
            &SourceLoc::new(0, 7, 2),
            "not supported with this profile:",
            "gl_FragColor",
            format_args!("{}", "core"),
        );
        assert_eq!(
            diag.to_string(),
            "ERROR: 0:7: 'gl_FragColor' : not supported with this profile: core"
        );
    }

    #[test]
    fn test_display_without_extra() {
        let diag = Diagnostic::new(
            Severity::Warning,
            Channel::Preprocessor,
            &SourceLoc::at_line(3),
            "extension warning",
            "#extension",
            format_args!(""),
        );
        assert_eq!(diag.to_string(), "WARNING: 0:3: '#extension' : extension warning");
        assert!(!diag.is_error());
    }

    #[test]
    fn test_serialization() {
        let diag = Diagnostic::new(
            Severity::Error,
            Channel::Parse,
            &SourceLoc::at_line(1),
            "feature not yet implemented",
            "subroutine",
            format_args!(""),
        );
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        let parsed: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, diag);
    }
}
