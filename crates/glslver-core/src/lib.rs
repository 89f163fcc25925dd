//! glslver Core: Compilation Context, profiles, stages and target environments
//!
//! Shared state read by every version/profile/extension check while a single
//! shader compilation unit is parsed.

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod scanner;

pub use config::{CompileOptions, MessageOptions};
pub use context::CompilationContext;
pub use data_model::{
    MessageFlags, Profile, ProfileMask, SourceLoc, SpvVersion, Stage, StageMask,
};
pub use error::CompatError;
pub use scanner::{InputScanner, ScannerHandle, SourceCursor};

/// Version of the checking engine
pub const GLSLVER_VERSION: &str = "1.0.0";
