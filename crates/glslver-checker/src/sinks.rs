//! Concrete diagnostic sinks
//!
//! [`TracingSink`] forwards to `tracing` for hosts that route compiler output
//! through their subscriber. [`RecordingSink`] keeps every diagnostic for
//! inspection.

use glslver_core::SourceLoc;
use std::fmt;

use crate::diagnostics::{Channel, Diagnostic, DiagnosticSink, Severity};

/// Emits each diagnostic as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    fn emit(diag: Diagnostic) {
        match diag.severity {
            Severity::Error => tracing::error!(
                channel = %diag.channel,
                file = diag.loc.name.as_deref().unwrap_or(""),
                string = diag.loc.string,
                line = diag.loc.line,
                column = diag.loc.column,
                reason = %diag.reason,
                token = %diag.token,
                "{}",
                diag
            ),
            Severity::Warning => tracing::warn!(
                channel = %diag.channel,
                file = diag.loc.name.as_deref().unwrap_or(""),
                string = diag.loc.string,
                line = diag.loc.line,
                column = diag.loc.column,
                reason = %diag.reason,
                token = %diag.token,
                "{}",
                diag
            ),
        }
    }
}

impl DiagnosticSink for TracingSink {
    fn error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        Self::emit(Diagnostic::new(Severity::Error, Channel::Parse, loc, reason, token, extra));
    }

    fn warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        Self::emit(Diagnostic::new(Severity::Warning, Channel::Parse, loc, reason, token, extra));
    }

    fn pp_error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        Self::emit(Diagnostic::new(
            Severity::Error,
            Channel::Preprocessor,
            loc,
            reason,
            token,
            extra,
        ));
    }

    fn pp_warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        Self::emit(Diagnostic::new(
            Severity::Warning,
            Channel::Preprocessor,
            loc,
            reason,
            token,
            extra,
        ));
    }
}

/// Records every call for later assertions
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    diagnostics: Vec<Diagnostic>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.diagnostics.last()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    fn record(&mut self, severity: Severity, channel: Channel, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.diagnostics
            .push(Diagnostic::new(severity, channel, loc, reason, token, extra));
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.record(Severity::Error, Channel::Parse, loc, reason, token, extra);
    }

    fn warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.record(Severity::Warning, Channel::Parse, loc, reason, token, extra);
    }

    fn pp_error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.record(Severity::Error, Channel::Preprocessor, loc, reason, token, extra);
    }

    fn pp_warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.record(Severity::Warning, Channel::Preprocessor, loc, reason, token, extra);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_separates_channels() {
        let mut sink = RecordingSink::new();
        let loc = SourceLoc::at_line(2);
        sink.error(&loc, "bad", "tok", format_args!("{}", 1));
        sink.pp_warn(&loc, "meh", "#extension", format_args!(""));

        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.diagnostics()[0].extra, "1");
        assert_eq!(sink.last().unwrap().channel, Channel::Preprocessor);

        sink.clear();
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_tracing_sink_accepts_every_primitive() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut sink = TracingSink;
        let loc = SourceLoc::at_line(1).with_name("main.frag");
        sink.error(&loc, "r", "t", format_args!(""));
        sink.warn(&loc, "r", "t", format_args!(""));
        sink.pp_error(&loc, "r", "t", format_args!(""));
        sink.pp_warn(&loc, "r", "t", format_args!(""));
    }
}
