//! Availability gates for scalar types beyond 32-bit float and int

use glslver_core::{ProfileMask, SourceLoc};
use glslver_registry::ext;

use crate::checker::VersionChecker;
use crate::diagnostics::DiagnosticSink;

const DESKTOP_PROFILES: ProfileMask = ProfileMask::CORE.union(ProfileMask::COMPATIBILITY);

impl<S: DiagnosticSink> VersionChecker<S> {
    /// Bitwise and shift operators, unsigned ints, `%`
    pub fn full_integer_check(&mut self, loc: &SourceLoc, op: &str) {
        self.profile_requires(loc, ProfileMask::NO_PROFILE, 130, &[], op);
        self.profile_requires(loc, ProfileMask::ES, 300, &[], op);
    }

    pub fn double_check(&mut self, loc: &SourceLoc, op: &str) {
        self.require_profile(loc, DESKTOP_PROFILES, op);
        self.profile_requires(loc, ProfileMask::CORE, 400, &[], op);
        self.profile_requires(loc, ProfileMask::COMPATIBILITY, 400, &[ext::ARB_GPU_SHADER_FP64], op);
    }

    /// Built-in declarations are exempt
    pub fn int64_check(&mut self, loc: &SourceLoc, op: &str, built_in: bool) {
        if built_in {
            return;
        }
        self.require_extensions(loc, &[ext::ARB_GPU_SHADER_INT64], "shader int64");
        self.require_profile(loc, DESKTOP_PROFILES, op);
        self.profile_requires(loc, ProfileMask::CORE, 450, &[], op);
        self.profile_requires(loc, ProfileMask::COMPATIBILITY, 450, &[], op);
    }

    pub fn int16_check(&mut self, loc: &SourceLoc, op: &str, built_in: bool) {
        if built_in {
            return;
        }
        self.require_extensions(loc, &[ext::AMD_GPU_SHADER_INT16], "shader int16");
        self.require_profile(loc, DESKTOP_PROFILES, op);
        self.profile_requires(loc, ProfileMask::CORE, 450, &[], op);
        self.profile_requires(loc, ProfileMask::COMPATIBILITY, 450, &[], op);
    }

    pub fn float16_check(&mut self, loc: &SourceLoc, op: &str, built_in: bool) {
        if built_in {
            return;
        }
        self.require_profile(loc, DESKTOP_PROFILES, op);
        self.profile_requires(loc, DESKTOP_PROFILES, 450, &[ext::AMD_GPU_SHADER_HALF_FLOAT], op);
    }
}
