//! Compiler-injected `#define` preamble for the current configuration

use glslver_core::{CompilationContext, Profile};
use glslver_registry::{PreambleScope, CATALOG};

use crate::checker::VersionChecker;
use crate::diagnostics::DiagnosticSink;

fn define(out: &mut String, name: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("#define {} {}\n", name, value));
}

fn scope_applies(scope: PreambleScope, ctx: &CompilationContext) -> bool {
    let es = ctx.profile.is_es();
    match scope {
        PreambleScope::Never => false,
        PreambleScope::Es => es,
        PreambleScope::Desktop => !es,
        PreambleScope::Always => true,
        PreambleScope::DeviceGroup => (!es && ctx.version >= 140) || (es && ctx.version >= 310),
        PreambleScope::Multiview => ctx.version >= 300,
    }
}

/// Feature macros the preprocessor sees before the shader's first line
pub fn build_preamble(ctx: &CompilationContext) -> String {
    let mut out = String::new();

    if ctx.profile.is_es() {
        define(&mut out, "GL_ES", 1);
    }
    define(&mut out, "GL_FRAGMENT_PRECISION_HIGH", 1);

    for info in CATALOG.iter().filter(|info| scope_applies(info.preamble, ctx)) {
        define(&mut out, info.name, 1);
    }

    if !ctx.profile.is_es() && ctx.version >= 150 {
        define(&mut out, "GL_core_profile", 1);
        if ctx.profile == Profile::Compatibility {
            define(&mut out, "GL_compatibility_profile", 1);
        }
    }

    if ctx.spv_version.vulkan_glsl > 0 {
        define(&mut out, "VULKAN", ctx.spv_version.vulkan_glsl);
    }
    if ctx.spv_version.open_gl > 0 {
        define(&mut out, "GL_SPIRV", ctx.spv_version.open_gl);
    }

    out
}

impl<S: DiagnosticSink> VersionChecker<S> {
    pub fn preamble(&self) -> String {
        build_preamble(&self.ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glslver_core::{SpvVersion, Stage};

    fn lines(preamble: &str) -> Vec<&str> {
        preamble.lines().collect()
    }

    #[test]
    fn test_es_preamble() {
        let ctx = CompilationContext::new(310, Profile::Es, Stage::Fragment);
        let preamble = build_preamble(&ctx);
        let lines = lines(&preamble);
        assert_eq!(lines[0], "#define GL_ES 1");
        assert!(lines.contains(&"#define GL_OES_texture_3D 1"));
        assert!(lines.contains(&"#define GL_EXT_device_group 1"));
        assert!(lines.contains(&"#define GL_OVR_multiview 1"));
        assert!(!lines.contains(&"#define GL_ARB_gpu_shader_fp64 1"));
        assert!(!lines.contains(&"#define GL_core_profile 1"));
    }

    #[test]
    fn test_desktop_preamble() {
        let ctx = CompilationContext::new(450, Profile::Compatibility, Stage::Vertex);
        let preamble = build_preamble(&ctx);
        let lines = lines(&preamble);
        assert!(!lines.contains(&"#define GL_ES 1"));
        assert!(lines.contains(&"#define GL_ARB_gpu_shader_fp64 1"));
        assert!(lines.contains(&"#define GL_core_profile 1"));
        assert!(lines.contains(&"#define GL_compatibility_profile 1"));
        assert!(lines.contains(&"#define GL_GOOGLE_include_directive 1"));
        assert!(!lines.contains(&"#define GL_KHR_vulkan_glsl 1"));
    }

    #[test]
    fn test_old_desktop_has_no_profile_macros() {
        let ctx = CompilationContext::new(130, Profile::None, Stage::Vertex);
        let preamble = build_preamble(&ctx);
        assert!(!preamble.contains("GL_core_profile"));
        assert!(!preamble.contains("GL_EXT_device_group"));
        assert!(!preamble.contains("GL_OVR_multiview"));
    }

    #[test]
    fn test_target_macros() {
        let vk = CompilationContext::new(450, Profile::Core, Stage::Vertex)
            .with_spv_version(SpvVersion::vulkan(0x10000, 100));
        assert!(build_preamble(&vk).ends_with("#define VULKAN 100\n"));

        let gl = CompilationContext::new(450, Profile::Core, Stage::Vertex)
            .with_spv_version(SpvVersion::open_gl(0x10000, 100));
        let preamble = build_preamble(&gl);
        assert!(preamble.contains("#define GL_SPIRV 100\n"));
        assert!(!preamble.contains("VULKAN"));
    }
}
