//! Compilation Context: per-compilation-unit state read by every check
use std::fmt;
use std::rc::Rc;

use crate::data_model::{MessageFlags, Profile, SourceLoc, SpvVersion, Stage};
use crate::error::CompatError;
use crate::scanner::ScannerHandle;

/// Configuration and bookkeeping for one compilation unit.
///
/// Built once by the parser before any check runs. The configuration fields
/// are not changed while a check executes; only the error counter and the
/// scanner association move.
#[derive(Clone)]
pub struct CompilationContext {
    /// Declared version, updated by `#version`
    pub version: i32,
    /// Declared profile
    pub profile: Profile,
    pub stage: Stage,
    pub spv_version: SpvVersion,
    /// Treat use of deprecated features as errors
    pub forward_compatible: bool,
    messages: MessageFlags,
    num_errors: usize,
    current_scanner: Option<ScannerHandle>,
}

impl CompilationContext {
    pub fn new(version: i32, profile: Profile, stage: Stage) -> Self {
        Self {
            version,
            profile,
            stage,
            spv_version: SpvVersion::default(),
            forward_compatible: false,
            messages: MessageFlags::empty(),
            num_errors: 0,
            current_scanner: None,
        }
    }

    pub fn with_spv_version(mut self, spv_version: SpvVersion) -> Self {
        self.spv_version = spv_version;
        self
    }

    pub fn with_messages(mut self, messages: MessageFlags) -> Self {
        self.messages = messages;
        self
    }

    pub fn forward_compatible(mut self) -> Self {
        self.forward_compatible = true;
        self
    }

    pub fn messages(&self) -> MessageFlags {
        self.messages
    }

    pub fn relaxed_errors(&self) -> bool {
        self.messages.contains(MessageFlags::RELAXED_ERRORS)
    }

    pub fn suppress_warnings(&self) -> bool {
        self.messages.contains(MessageFlags::SUPPRESS_WARNINGS)
    }

    pub fn is_reading_hlsl(&self) -> bool {
        self.messages.contains(MessageFlags::READ_HLSL)
    }

    /// Record one error. The counter never goes down.
    pub fn add_error(&mut self) {
        self.num_errors += 1;
    }

    pub fn num_errors(&self) -> usize {
        self.num_errors
    }

    /// Swap the active scanner, returning the previous one so an include
    /// handler can restore it when the included text ends.
    pub fn set_scanner(&mut self, scanner: Option<ScannerHandle>) -> Option<ScannerHandle> {
        std::mem::replace(&mut self.current_scanner, scanner)
    }

    pub fn scanner(&self) -> Option<&ScannerHandle> {
        self.current_scanner.as_ref()
    }

    fn active_scanner(&self) -> Result<&ScannerHandle, CompatError> {
        self.current_scanner.as_ref().ok_or(CompatError::NoActiveScanner)
    }

    pub fn current_loc(&self) -> Result<SourceLoc, CompatError> {
        Ok(self.active_scanner()?.borrow().source_loc())
    }

    pub fn set_current_line(&self, line: i32) -> Result<(), CompatError> {
        self.active_scanner()?.borrow_mut().set_line(line);
        Ok(())
    }

    pub fn set_current_column(&self, column: i32) -> Result<(), CompatError> {
        self.active_scanner()?.borrow_mut().set_column(column);
        Ok(())
    }

    pub fn set_current_source_name(&self, name: &str) -> Result<(), CompatError> {
        self.active_scanner()?.borrow_mut().set_file(name);
        Ok(())
    }

    pub fn set_current_string(&self, string: i32) -> Result<(), CompatError> {
        self.active_scanner()?.borrow_mut().set_string(string);
        Ok(())
    }
}

impl fmt::Debug for CompilationContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompilationContext")
            .field("version", &self.version)
            .field("profile", &self.profile)
            .field("stage", &self.stage)
            .field("spv_version", &self.spv_version)
            .field("forward_compatible", &self.forward_compatible)
            .field("messages", &self.messages)
            .field("num_errors", &self.num_errors)
            .field(
                "scanner",
                &self.current_scanner.as_ref().map(|s| Rc::as_ptr(s) as *const ()),
            )
            .finish()
    }
}
