//! glslver Checker: version, profile, stage and extension compatibility
//!
//! The parser calls these gates inline while it parses. Each gate reads the
//! compilation context and the extension behavior map, reports through a
//! [`DiagnosticSink`] and counts errors. Nothing here aborts a compilation;
//! the error count decides success at the end.
//!
//! # Architecture
//!
//! ```text
//! CompileOptions → CompilationContext ─┐
//!                                      ├→ VersionChecker ──→ DiagnosticSink
//! #extension ─→ ExtensionBehaviorMap ──┘        │             (tracing / recording)
//!                                               ↓
//!                                         error counter
//! ```
//!
//! # Example
//!
//! ```
//! use glslver_checker::{RecordingSink, VersionChecker};
//! use glslver_core::{CompilationContext, Profile, ProfileMask, SourceLoc, Stage};
//! use glslver_registry::ext;
//!
//! let ctx = CompilationContext::new(330, Profile::Core, Stage::Fragment);
//! let mut checker = VersionChecker::new(ctx, RecordingSink::new());
//! let loc = SourceLoc::at_line(3);
//!
//! // `#extension GL_ARB_gpu_shader_fp64 : enable`
//! checker.update_extension_behavior_raw(2, "GL_ARB_gpu_shader_fp64", "enable");
//! checker.profile_requires(&loc, ProfileMask::CORE, 400, &[ext::ARB_GPU_SHADER_FP64], "double");
//! assert_eq!(checker.num_errors(), 0);
//!
//! checker.require_profile(&loc, ProfileMask::COMPATIBILITY, "gl_FragColor");
//! assert_eq!(checker.num_errors(), 1);
//! ```

pub mod checker;
pub mod diagnostics;
pub mod extensions;
pub mod preamble;
pub mod scalar_types;
pub mod sinks;

pub use checker::VersionChecker;
pub use diagnostics::{Channel, Diagnostic, DiagnosticSink, Severity};
pub use extensions::ALL_EXTENSIONS;
pub use preamble::build_preamble;
pub use sinks::{RecordingSink, TracingSink};
