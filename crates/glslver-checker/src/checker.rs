//! Profile, version, stage and target-environment gates
//!
//! Every gate reads the [`CompilationContext`] and the extension behavior
//! map, reports through the [`DiagnosticSink`], and bumps the error counter
//! for real errors. Gates return nothing; the parser decides how to carry on.

use glslver_core::{
    CompatError, CompilationContext, CompileOptions, ProfileMask, SourceLoc, Stage, StageMask,
};
use glslver_registry::{ExtensionBehavior, ExtensionBehaviorMap, ExtensionId};
use std::fmt;

use crate::diagnostics::{Channel, DiagnosticSink};
use crate::sinks::TracingSink;

/// The compatibility engine for one compilation unit
pub struct VersionChecker<S: DiagnosticSink = TracingSink> {
    pub(crate) ctx: CompilationContext,
    pub(crate) extensions: ExtensionBehaviorMap,
    pub(crate) sink: S,
}

impl<S: DiagnosticSink> VersionChecker<S> {
    pub fn new(ctx: CompilationContext, sink: S) -> Self {
        Self {
            ctx,
            extensions: ExtensionBehaviorMap::new(),
            sink,
        }
    }

    /// Build from a configuration document
    pub fn from_options(options: CompileOptions, sink: S) -> Result<Self, CompatError> {
        Ok(Self::new(options.into_context()?, sink))
    }

    pub fn context(&self) -> &CompilationContext {
        &self.ctx
    }

    /// Mutable access for `#version` handling and scanner swaps
    pub fn context_mut(&mut self) -> &mut CompilationContext {
        &mut self.ctx
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn num_errors(&self) -> usize {
        self.ctx.num_errors()
    }

    pub fn add_error(&mut self) {
        self.ctx.add_error();
    }

    // === Reporting ===

    /// Report an error and count it
    pub fn error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.sink.error(loc, reason, token, extra);
        self.ctx.add_error();
    }

    /// Report a warning unless warnings are suppressed. Never counted.
    pub fn warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        if !self.ctx.suppress_warnings() {
            self.sink.warn(loc, reason, token, extra);
        }
    }

    pub fn pp_error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        self.sink.pp_error(loc, reason, token, extra);
        self.ctx.add_error();
    }

    pub fn pp_warn(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        if !self.ctx.suppress_warnings() {
            self.sink.pp_warn(loc, reason, token, extra);
        }
    }

    pub(crate) fn error_on(
        &mut self,
        channel: Channel,
        loc: &SourceLoc,
        reason: &str,
        token: &str,
        extra: fmt::Arguments<'_>,
    ) {
        match channel {
            Channel::Parse => self.error(loc, reason, token, extra),
            Channel::Preprocessor => self.pp_error(loc, reason, token, extra),
        }
    }

    pub(crate) fn warn_on(
        &mut self,
        channel: Channel,
        loc: &SourceLoc,
        reason: &str,
        token: &str,
        extra: fmt::Arguments<'_>,
    ) {
        match channel {
            Channel::Parse => self.warn(loc, reason, token, extra),
            Channel::Preprocessor => self.pp_warn(loc, reason, token, extra),
        }
    }

    /// Profile and version mismatches become warnings under relaxed errors
    fn relaxable_error(&mut self, loc: &SourceLoc, reason: &str, token: &str, extra: fmt::Arguments<'_>) {
        if self.ctx.relaxed_errors() {
            self.warn(loc, reason, token, extra);
        } else {
            self.error(loc, reason, token, extra);
        }
    }

    pub(crate) fn behavior_of(&self, extension: ExtensionId) -> ExtensionBehavior {
        self.extensions.get(extension)
    }

    pub(crate) fn name_of(&self, extension: ExtensionId) -> String {
        self.extensions.name(extension).to_string()
    }

    // === Profile and version gates ===

    /// The current profile must be one of `profiles`
    pub fn require_profile(&mut self, loc: &SourceLoc, profiles: ProfileMask, feature: &str) {
        let profile = self.ctx.profile;
        if profile.is_in(profiles) {
            return;
        }
        tracing::trace!(feature, %profile, "profile gate failed");
        self.relaxable_error(loc, "not supported with this profile:", feature, format_args!("{}", profile));
    }

    /// For a profile in `profiles`, the feature needs `min_version` or one of
    /// `extensions` turned on.
    ///
    /// A `min_version` of 0 means the feature is never core in those profiles.
    /// When the current profile is not in `profiles` the feature is not gated
    /// here and the call passes.
    pub fn profile_requires(
        &mut self,
        loc: &SourceLoc,
        profiles: ProfileMask,
        min_version: i32,
        extensions: &[ExtensionId],
        feature: &str,
    ) {
        if !self.ctx.profile.is_in(profiles) {
            return;
        }

        let mut okay = min_version > 0 && self.ctx.version >= min_version;
        for &extension in extensions {
            match self.behavior_of(extension) {
                ExtensionBehavior::Warn => {
                    let name = self.name_of(extension);
                    self.warn(
                        loc,
                        "extension warning",
                        feature,
                        format_args!("extension {} is being used for {}", name, feature),
                    );
                    okay = true;
                }
                ExtensionBehavior::Require | ExtensionBehavior::Enable => okay = true,
                ExtensionBehavior::Disable | ExtensionBehavior::Missing => {}
            }
        }
        if okay {
            return;
        }

        tracing::trace!(feature, version = self.ctx.version, min_version, "version gate failed");
        let names: Vec<String> = extensions.iter().map(|&e| self.name_of(e)).collect();
        let requirement = match (min_version > 0, names.is_empty()) {
            (true, true) => format!("requires version {}", min_version),
            (true, false) => format!("requires version {} or one of: {}", min_version, names.join(", ")),
            (false, _) => format!("requires one of: {}", names.join(", ")),
        };
        self.relaxable_error(
            loc,
            "not supported for this version or the enabled extensions",
            feature,
            format_args!("{}", requirement),
        );
    }

    /// Single-extension form of [`profile_requires`](Self::profile_requires)
    pub fn profile_requires_extension(
        &mut self,
        loc: &SourceLoc,
        profiles: ProfileMask,
        min_version: i32,
        extension: ExtensionId,
        feature: &str,
    ) {
        self.profile_requires(loc, profiles, min_version, std::slice::from_ref(&extension), feature);
    }

    /// Accepts a single [`Stage`] or a [`StageMask`]
    pub fn require_stage(&mut self, loc: &SourceLoc, stages: impl Into<StageMask>, feature: &str) {
        let stages = stages.into();
        let stage = self.ctx.stage;
        if stage.is_in(stages) {
            return;
        }
        tracing::trace!(feature, %stage, "stage gate failed");
        let allowed: Vec<&str> = Stage::ALL
            .iter()
            .filter(|s| s.is_in(stages))
            .map(|s| s.name())
            .collect();
        self.error(
            loc,
            "not supported in this stage:",
            feature,
            format_args!("{} (allowed: {})", stage, allowed.join(", ")),
        );
    }

    /// Warn on use of a feature deprecated at `dep_version`; error instead in
    /// forward-compatible mode.
    pub fn check_deprecated(&mut self, loc: &SourceLoc, profiles: ProfileMask, dep_version: i32, feature: &str) {
        if !self.ctx.profile.is_in(profiles) || self.ctx.version < dep_version {
            return;
        }
        if self.ctx.forward_compatible {
            self.error(loc, "deprecated, may be removed in future release", feature, format_args!(""));
        } else {
            self.warn(
                loc,
                "deprecated",
                feature,
                format_args!("deprecated in version {}; may be removed in future release", dep_version),
            );
        }
    }

    pub fn require_not_removed(&mut self, loc: &SourceLoc, profiles: ProfileMask, removed_version: i32, feature: &str) {
        if !self.ctx.profile.is_in(profiles) || self.ctx.version < removed_version {
            return;
        }
        let profile = self.ctx.profile;
        self.error(
            loc,
            "no longer supported in",
            feature,
            format_args!("{} profile; removed in version {}", profile, removed_version),
        );
    }

    /// Recognized by the grammar, not implemented by this compiler
    pub fn unimplemented(&mut self, loc: &SourceLoc, feature: &str) {
        self.error(loc, "feature not yet implemented", feature, format_args!(""));
    }

    // === Target environment gates ===

    pub fn spv_removed(&mut self, loc: &SourceLoc, op: &str) {
        if self.ctx.spv_version.generates_spirv() {
            self.error(loc, "not allowed when generating SPIR-V", op, format_args!(""));
        }
    }

    pub fn vulkan_removed(&mut self, loc: &SourceLoc, op: &str) {
        if self.ctx.spv_version.targets_vulkan() {
            self.error(loc, "not allowed when using GLSL for Vulkan", op, format_args!(""));
        }
    }

    pub fn require_vulkan(&mut self, loc: &SourceLoc, op: &str) {
        if !self.ctx.spv_version.targets_vulkan() {
            self.error(loc, "only allowed when using GLSL for Vulkan", op, format_args!(""));
        }
    }

    pub fn require_spv(&mut self, loc: &SourceLoc, op: &str) {
        if !self.ctx.spv_version.generates_spirv() {
            self.error(loc, "only allowed when generating SPIR-V", op, format_args!(""));
        }
    }
}

impl<S: DiagnosticSink> fmt::Debug for VersionChecker<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VersionChecker")
            .field("ctx", &self.ctx)
            .field("tracked_extensions", &self.extensions.tracked().count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::RecordingSink;
    use glslver_core::{MessageFlags, Profile, SpvVersion};
    use glslver_registry::ext;

    fn checker(version: i32, profile: Profile, stage: Stage) -> VersionChecker<RecordingSink> {
        VersionChecker::new(CompilationContext::new(version, profile, stage), RecordingSink::new())
    }

    fn loc() -> SourceLoc {
        SourceLoc::at_line(1)
    }

    #[test]
    fn test_require_profile_pass() {
        let mut c = checker(450, Profile::Core, Stage::Vertex);
        c.require_profile(&loc(), ProfileMask::CORE | ProfileMask::COMPATIBILITY, "feature");
        assert_eq!(c.num_errors(), 0);
        assert!(c.sink().diagnostics().is_empty());
    }

    #[test]
    fn test_require_profile_fail() {
        let mut c = checker(330, Profile::Core, Stage::Fragment);
        c.require_profile(&loc(), ProfileMask::COMPATIBILITY, "feature A");
        assert_eq!(c.num_errors(), 1);
        assert_eq!(c.sink().error_count(), 1);
        assert_eq!(c.sink().last().unwrap().extra, "core");
    }

    #[test]
    fn test_require_profile_relaxed_is_warning() {
        let ctx = CompilationContext::new(330, Profile::Core, Stage::Fragment)
            .with_messages(MessageFlags::RELAXED_ERRORS);
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.require_profile(&loc(), ProfileMask::ES, "feature");
        assert_eq!(c.num_errors(), 0);
        assert_eq!(c.sink().warning_count(), 1);
    }

    #[test]
    fn test_profile_requires_version_reached() {
        let mut c = checker(450, Profile::Core, Stage::Vertex);
        c.profile_requires(&loc(), ProfileMask::CORE, 450, &[ext::ARB_GPU_SHADER_FP64], "f");
        assert_eq!(c.num_errors(), 0);
    }

    #[test]
    fn test_profile_requires_missing_extension() {
        let mut c = checker(400, Profile::Core, Stage::Vertex);
        c.profile_requires(&loc(), ProfileMask::CORE, 450, &[ext::ARB_GPU_SHADER_FP64], "f");
        assert_eq!(c.num_errors(), 1);
        let extra = &c.sink().last().unwrap().extra;
        assert!(extra.contains("450"));
        assert!(extra.contains("GL_ARB_gpu_shader_fp64"));
    }

    #[test]
    fn test_profile_requires_enabled_extension() {
        let mut c = checker(400, Profile::Core, Stage::Vertex);
        c.extensions.set(ext::ARB_GPU_SHADER_FP64, ExtensionBehavior::Enable);
        c.profile_requires(&loc(), ProfileMask::CORE, 450, &[ext::ARB_GPU_SHADER_FP64], "f");
        assert_eq!(c.num_errors(), 0);
        assert!(c.sink().diagnostics().is_empty());
    }

    #[test]
    fn test_profile_requires_warned_extension_passes_with_warning() {
        let mut c = checker(400, Profile::Core, Stage::Vertex);
        c.extensions.set(ext::ARB_GPU_SHADER_FP64, ExtensionBehavior::Warn);
        c.profile_requires_extension(&loc(), ProfileMask::CORE, 450, ext::ARB_GPU_SHADER_FP64, "f");
        assert_eq!(c.num_errors(), 0);
        assert_eq!(c.sink().warning_count(), 1);
    }

    #[test]
    fn test_profile_requires_disabled_extension_fails() {
        let mut c = checker(400, Profile::Core, Stage::Vertex);
        c.extensions.set(ext::ARB_GPU_SHADER_FP64, ExtensionBehavior::Disable);
        c.profile_requires_extension(&loc(), ProfileMask::CORE, 450, ext::ARB_GPU_SHADER_FP64, "f");
        assert_eq!(c.num_errors(), 1);
    }

    #[test]
    fn test_profile_requires_no_overlap_passes() {
        let mut c = checker(100, Profile::Es, Stage::Vertex);
        c.profile_requires(&loc(), ProfileMask::CORE | ProfileMask::COMPATIBILITY, 450, &[], "f");
        assert_eq!(c.num_errors(), 0);
        assert!(c.sink().diagnostics().is_empty());
    }

    #[test]
    fn test_profile_requires_zero_version_needs_extension() {
        let mut c = checker(460, Profile::Es, Stage::Vertex);
        c.profile_requires(&loc(), ProfileMask::ES, 0, &[ext::OES_TEXTURE_3D], "sampler3D");
        assert_eq!(c.num_errors(), 1);
        assert!(c.sink().last().unwrap().extra.starts_with("requires one of"));
    }

    #[test]
    fn test_profile_requires_relaxed_is_warning() {
        let ctx = CompilationContext::new(400, Profile::Core, Stage::Vertex)
            .with_messages(MessageFlags::RELAXED_ERRORS);
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.profile_requires(&loc(), ProfileMask::CORE, 450, &[], "f");
        assert_eq!(c.num_errors(), 0);
        assert_eq!(c.sink().warning_count(), 1);
        assert_eq!(c.sink().last().unwrap().extra, "requires version 450");
    }

    #[test]
    fn test_require_stage_single_and_mask() {
        let mut c = checker(450, Profile::Core, Stage::Fragment);
        c.require_stage(&loc(), Stage::Fragment, "discard");
        c.require_stage(&loc(), StageMask::VERTEX | StageMask::FRAGMENT, "f");
        assert_eq!(c.num_errors(), 0);

        c.require_stage(&loc(), StageMask::VERTEX | StageMask::GEOMETRY, "EmitVertex");
        assert_eq!(c.num_errors(), 1);
        assert_eq!(c.sink().last().unwrap().extra, "fragment (allowed: vertex, geometry)");
    }

    #[test]
    fn test_check_deprecated_warns() {
        let mut c = checker(330, Profile::Compatibility, Stage::Vertex);
        c.check_deprecated(&loc(), ProfileMask::COMPATIBILITY, 130, "gl_FragColor");
        assert_eq!(c.num_errors(), 0);
        assert_eq!(c.sink().warning_count(), 1);
    }

    #[test]
    fn test_check_deprecated_forward_compatible_errors() {
        let ctx = CompilationContext::new(330, Profile::Compatibility, Stage::Vertex).forward_compatible();
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.check_deprecated(&loc(), ProfileMask::COMPATIBILITY, 130, "gl_FragColor");
        assert_eq!(c.num_errors(), 1);
    }

    #[test]
    fn test_check_deprecated_before_version_is_silent() {
        let mut c = checker(120, Profile::None, Stage::Vertex);
        c.check_deprecated(&loc(), ProfileMask::NO_PROFILE, 130, "attribute");
        assert!(c.sink().diagnostics().is_empty());
    }

    #[test]
    fn test_deprecation_and_removal_ignore_other_profiles() {
        let ctx = CompilationContext::new(460, Profile::Core, Stage::Vertex).forward_compatible();
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.check_deprecated(&loc(), ProfileMask::COMPATIBILITY | ProfileMask::ES, 130, "gl_FragColor");
        c.require_not_removed(&loc(), ProfileMask::COMPATIBILITY, 420, "gl_ClipVertex");
        assert_eq!(c.num_errors(), 0);
        assert!(c.sink().diagnostics().is_empty());
    }

    #[test]
    fn test_suppressed_warnings_cover_preprocessor_channel() {
        let ctx = CompilationContext::new(450, Profile::Core, Stage::Vertex)
            .with_messages(MessageFlags::SUPPRESS_WARNINGS);
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.pp_warn(&loc(), "unexpected tokens", "#version", format_args!(""));
        c.extensions.set(ext::GOOGLE_INCLUDE_DIRECTIVE, ExtensionBehavior::Warn);
        c.pp_require_extensions(&loc(), &[ext::GOOGLE_INCLUDE_DIRECTIVE], "#include");
        assert_eq!(c.num_errors(), 0);
        assert!(c.sink().diagnostics().is_empty());

        c.pp_error(&loc(), "bad directive", "#pragma", format_args!(""));
        assert_eq!(c.num_errors(), 1);
        assert_eq!(c.sink().error_count(), 1);
    }

    #[test]
    fn test_suppressed_warnings_keep_errors() {
        let ctx = CompilationContext::new(330, Profile::Compatibility, Stage::Vertex)
            .with_messages(MessageFlags::SUPPRESS_WARNINGS);
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.check_deprecated(&loc(), ProfileMask::COMPATIBILITY, 130, "gl_FragColor");
        c.unimplemented(&loc(), "subroutine");
        assert_eq!(c.sink().warning_count(), 0);
        assert_eq!(c.sink().error_count(), 1);
        assert_eq!(c.num_errors(), 1);
    }

    #[test]
    fn test_require_not_removed() {
        let mut c = checker(420, Profile::Core, Stage::Vertex);
        c.require_not_removed(&loc(), ProfileMask::CORE, 420, "gl_ClipVertex");
        assert_eq!(c.num_errors(), 1);
        assert_eq!(c.sink().last().unwrap().extra, "core profile; removed in version 420");

        c.require_not_removed(&loc(), ProfileMask::ES, 300, "gl_ClipVertex");
        assert_eq!(c.num_errors(), 1);
    }

    #[test]
    fn test_unimplemented_always_errors() {
        let mut c = checker(450, Profile::Core, Stage::Vertex);
        c.unimplemented(&loc(), "subroutine");
        c.unimplemented(&loc(), "subroutine");
        assert_eq!(c.num_errors(), 2);
    }

    #[test]
    fn test_target_environment_gates() {
        let mut plain = checker(450, Profile::Core, Stage::Vertex);
        plain.spv_removed(&loc(), "op");
        plain.vulkan_removed(&loc(), "op");
        assert_eq!(plain.num_errors(), 0);
        plain.require_vulkan(&loc(), "push_constant");
        plain.require_spv(&loc(), "constant_id");
        assert_eq!(plain.num_errors(), 2);

        let ctx = CompilationContext::new(450, Profile::Core, Stage::Vertex)
            .with_spv_version(SpvVersion::vulkan(0x10000, 100));
        let mut vk = VersionChecker::new(ctx, RecordingSink::new());
        vk.require_vulkan(&loc(), "push_constant");
        vk.require_spv(&loc(), "constant_id");
        assert_eq!(vk.num_errors(), 0);
        vk.vulkan_removed(&loc(), "gl_VertexID");
        vk.spv_removed(&loc(), "shared");
        assert_eq!(vk.num_errors(), 2);
    }

    #[test]
    fn test_opengl_spirv_is_not_vulkan() {
        let ctx = CompilationContext::new(450, Profile::Core, Stage::Vertex)
            .with_spv_version(SpvVersion::open_gl(0x10000, 100));
        let mut c = VersionChecker::new(ctx, RecordingSink::new());
        c.vulkan_removed(&loc(), "gl_VertexID");
        c.require_spv(&loc(), "op");
        assert_eq!(c.num_errors(), 0);
        c.require_vulkan(&loc(), "push_constant");
        assert_eq!(c.num_errors(), 1);
    }
}
