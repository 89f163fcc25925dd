//! The compiler-owned table of canonical extension names
//!
//! Every entry gets a stable [`ExtensionId`] constant in [`ext`]; parser code
//! passes those ids directly and never touches the name strings.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle of an interned extension name.
///
/// Catalog ids are valid in every [`ExtensionBehaviorMap`]. Ids for names
/// first seen in shader text carry the tag of the map that interned them and
/// are only valid there.
///
/// [`ExtensionBehaviorMap`]: crate::ExtensionBehaviorMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExtensionId {
    index: u32,
    owner: u32,
}

/// Owner tag of catalog ids
pub(crate) const CATALOG_OWNER: u32 = 0;

impl ExtensionId {
    pub(crate) const fn canonical(index: u32) -> Self {
        ExtensionId {
            index,
            owner: CATALOG_OWNER,
        }
    }

    pub(crate) fn owned(index: usize, owner: u32) -> Self {
        ExtensionId {
            index: index as u32,
            owner,
        }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) fn owner(self) -> u32 {
        self.owner
    }

    /// True for ids from the fixed catalog
    pub fn is_canonical(self) -> bool {
        self.owner == CATALOG_OWNER
    }

    /// Catalog metadata, `None` for names the compiler does not know
    pub fn info(self) -> Option<&'static ExtensionInfo> {
        if self.is_canonical() {
            CATALOG.get(self.index())
        } else {
            None
        }
    }
}

/// How completely the compiler implements an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Full,
    /// Enabling it draws a warning
    Partial,
}

/// Which preambles define the extension's feature macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreambleScope {
    Never,
    Es,
    Desktop,
    /// Every profile and version
    Always,
    /// Desktop 140+ or ES 310+
    DeviceGroup,
    /// Version 300+ in any profile
    Multiview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtensionInfo {
    pub name: &'static str,
    pub support: Support,
    pub preamble: PreambleScope,
}

macro_rules! extension_catalog {
    ($( $id:ident = $name:literal, $support:ident, $preamble:ident; )*) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[repr(u32)]
        enum Slot { $( $id, )* }

        /// Canonical extension ids
        pub mod ext {
            use super::{ExtensionId, Slot};
            $( pub const $id: ExtensionId = ExtensionId::canonical(Slot::$id as u32); )*
        }

        /// All extensions the compiler knows, indexed by [`ExtensionId`]
        pub static CATALOG: &[ExtensionInfo] = &[
            $( ExtensionInfo {
                name: $name,
                support: Support::$support,
                preamble: PreambleScope::$preamble,
            }, )*
        ];
    };
}

extension_catalog! {
    OES_TEXTURE_3D = "GL_OES_texture_3D", Full, Es;
    OES_STANDARD_DERIVATIVES = "GL_OES_standard_derivatives", Full, Es;
    EXT_FRAG_DEPTH = "GL_EXT_frag_depth", Full, Es;
    OES_EGL_IMAGE_EXTERNAL = "GL_OES_EGL_image_external", Full, Es;
    OES_EGL_IMAGE_EXTERNAL_ESSL3 = "GL_OES_EGL_image_external_essl3", Full, Es;
    EXT_SHADER_TEXTURE_LOD = "GL_EXT_shader_texture_lod", Full, Es;
    EXT_SHADOW_SAMPLERS = "GL_EXT_shadow_samplers", Full, Es;

    ARB_TEXTURE_RECTANGLE = "GL_ARB_texture_rectangle", Full, Desktop;
    ARB_SHADING_LANGUAGE_420PACK = "GL_ARB_shading_language_420pack", Full, Desktop;
    ARB_TEXTURE_GATHER = "GL_ARB_texture_gather", Full, Desktop;
    ARB_GPU_SHADER5 = "GL_ARB_gpu_shader5", Partial, Desktop;
    ARB_SEPARATE_SHADER_OBJECTS = "GL_ARB_separate_shader_objects", Full, Desktop;
    ARB_COMPUTE_SHADER = "GL_ARB_compute_shader", Partial, Desktop;
    ARB_TESSELLATION_SHADER = "GL_ARB_tessellation_shader", Full, Desktop;
    ARB_ENHANCED_LAYOUTS = "GL_ARB_enhanced_layouts", Full, Desktop;
    ARB_TEXTURE_CUBE_MAP_ARRAY = "GL_ARB_texture_cube_map_array", Full, Desktop;
    ARB_SHADER_TEXTURE_LOD = "GL_ARB_shader_texture_lod", Full, Desktop;
    ARB_EXPLICIT_ATTRIB_LOCATION = "GL_ARB_explicit_attrib_location", Full, Desktop;
    ARB_SHADER_IMAGE_LOAD_STORE = "GL_ARB_shader_image_load_store", Full, Desktop;
    ARB_SHADER_ATOMIC_COUNTERS = "GL_ARB_shader_atomic_counters", Full, Desktop;
    ARB_SHADER_DRAW_PARAMETERS = "GL_ARB_shader_draw_parameters", Full, Desktop;
    ARB_SHADER_GROUP_VOTE = "GL_ARB_shader_group_vote", Full, Desktop;
    ARB_DERIVATIVE_CONTROL = "GL_ARB_derivative_control", Full, Desktop;
    ARB_SHADER_TEXTURE_IMAGE_SAMPLES = "GL_ARB_shader_texture_image_samples", Partial, Desktop;
    ARB_VIEWPORT_ARRAY = "GL_ARB_viewport_array", Full, Desktop;
    ARB_GPU_SHADER_INT64 = "GL_ARB_gpu_shader_int64", Full, Desktop;
    ARB_GPU_SHADER_FP64 = "GL_ARB_gpu_shader_fp64", Full, Desktop;
    ARB_SHADER_BALLOT = "GL_ARB_shader_ballot", Full, Desktop;
    ARB_SPARSE_TEXTURE2 = "GL_ARB_sparse_texture2", Full, Desktop;
    ARB_SPARSE_TEXTURE_CLAMP = "GL_ARB_sparse_texture_clamp", Full, Desktop;
    ARB_SHADER_STENCIL_EXPORT = "GL_ARB_shader_stencil_export", Full, Desktop;
    ARB_POST_DEPTH_COVERAGE = "GL_ARB_post_depth_coverage", Full, Desktop;
    ARB_SHADER_VIEWPORT_LAYER_ARRAY = "GL_ARB_shader_viewport_layer_array", Full, Desktop;

    KHR_VULKAN_GLSL = "GL_KHR_vulkan_glsl", Full, Never;
    EXT_SHADER_NON_CONSTANT_GLOBAL_INITIALIZERS = "GL_EXT_shader_non_constant_global_initializers", Full, Always;
    EXT_SHADER_IMAGE_LOAD_FORMATTED = "GL_EXT_shader_image_load_formatted", Full, Desktop;
    EXT_DEVICE_GROUP = "GL_EXT_device_group", Full, DeviceGroup;
    EXT_MULTIVIEW = "GL_EXT_multiview", Full, DeviceGroup;

    GOOGLE_CPP_STYLE_LINE_DIRECTIVE = "GL_GOOGLE_cpp_style_line_directive", Full, Always;
    GOOGLE_INCLUDE_DIRECTIVE = "GL_GOOGLE_include_directive", Full, Always;

    AMD_SHADER_BALLOT = "GL_AMD_shader_ballot", Full, Desktop;
    AMD_SHADER_TRINARY_MINMAX = "GL_AMD_shader_trinary_minmax", Full, Desktop;
    AMD_SHADER_EXPLICIT_VERTEX_PARAMETER = "GL_AMD_shader_explicit_vertex_parameter", Full, Desktop;
    AMD_GCN_SHADER = "GL_AMD_gcn_shader", Full, Desktop;
    AMD_GPU_SHADER_HALF_FLOAT = "GL_AMD_gpu_shader_half_float", Full, Desktop;
    AMD_TEXTURE_GATHER_BIAS_LOD = "GL_AMD_texture_gather_bias_lod", Full, Desktop;
    AMD_GPU_SHADER_INT16 = "GL_AMD_gpu_shader_int16", Full, Desktop;
    AMD_SHADER_IMAGE_LOAD_STORE_LOD = "GL_AMD_shader_image_load_store_lod", Full, Desktop;

    NV_SAMPLE_MASK_OVERRIDE_COVERAGE = "GL_NV_sample_mask_override_coverage", Full, Desktop;
    NV_GEOMETRY_SHADER_PASSTHROUGH = "GL_NV_geometry_shader_passthrough", Full, Desktop;
    NV_VIEWPORT_ARRAY2 = "GL_NV_viewport_array2", Full, Desktop;
    NV_STEREO_VIEW_RENDERING = "GL_NV_stereo_view_rendering", Full, Desktop;
    NVX_MULTIVIEW_PER_VIEW_ATTRIBUTES = "GL_NVX_multiview_per_view_attributes", Full, Desktop;

    OVR_MULTIVIEW = "GL_OVR_multiview", Full, Multiview;
    OVR_MULTIVIEW2 = "GL_OVR_multiview2", Full, Multiview;

    // Android extension pack and its members
    ANDROID_EXTENSION_PACK_ES31A = "GL_ANDROID_extension_pack_es31a", Full, Es;
    KHR_BLEND_EQUATION_ADVANCED = "GL_KHR_blend_equation_advanced", Full, Es;
    OES_SAMPLE_VARIABLES = "GL_OES_sample_variables", Full, Es;
    OES_SHADER_IMAGE_ATOMIC = "GL_OES_shader_image_atomic", Full, Es;
    OES_SHADER_MULTISAMPLE_INTERPOLATION = "GL_OES_shader_multisample_interpolation", Full, Es;
    OES_TEXTURE_STORAGE_MULTISAMPLE_2D_ARRAY = "GL_OES_texture_storage_multisample_2d_array", Full, Es;
    EXT_GEOMETRY_SHADER = "GL_EXT_geometry_shader", Full, Es;
    EXT_GEOMETRY_POINT_SIZE = "GL_EXT_geometry_point_size", Full, Es;
    EXT_GPU_SHADER5 = "GL_EXT_gpu_shader5", Full, Es;
    EXT_PRIMITIVE_BOUNDING_BOX = "GL_EXT_primitive_bounding_box", Full, Es;
    EXT_SHADER_IO_BLOCKS = "GL_EXT_shader_io_blocks", Full, Es;
    EXT_TESSELLATION_SHADER = "GL_EXT_tessellation_shader", Full, Es;
    EXT_TESSELLATION_POINT_SIZE = "GL_EXT_tessellation_point_size", Full, Es;
    EXT_TEXTURE_BUFFER = "GL_EXT_texture_buffer", Full, Es;
    EXT_TEXTURE_CUBE_MAP_ARRAY = "GL_EXT_texture_cube_map_array", Full, Es;

    OES_GEOMETRY_SHADER = "GL_OES_geometry_shader", Full, Es;
    OES_GEOMETRY_POINT_SIZE = "GL_OES_geometry_point_size", Full, Es;
    OES_GPU_SHADER5 = "GL_OES_gpu_shader5", Full, Es;
    OES_PRIMITIVE_BOUNDING_BOX = "GL_OES_primitive_bounding_box", Full, Es;
    OES_SHADER_IO_BLOCKS = "GL_OES_shader_io_blocks", Full, Es;
    OES_TESSELLATION_SHADER = "GL_OES_tessellation_shader", Full, Es;
    OES_TESSELLATION_POINT_SIZE = "GL_OES_tessellation_point_size", Full, Es;
    OES_TEXTURE_BUFFER = "GL_OES_texture_buffer", Full, Es;
    OES_TEXTURE_CUBE_MAP_ARRAY = "GL_OES_texture_cube_map_array", Full, Es;
}

static BY_NAME: Lazy<HashMap<&'static str, ExtensionId>> = Lazy::new(|| {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, info)| (info.name, ExtensionId::canonical(index as u32)))
        .collect()
});

/// Content lookup of a catalog entry
pub fn lookup(name: &str) -> Option<ExtensionId> {
    BY_NAME.get(name).copied()
}

/// Whether the compiler supports an extension of this name at all
pub fn is_known(name: &str) -> bool {
    BY_NAME.contains_key(name)
}

/// Extensions whose behavior follows an umbrella extension's `#extension`
/// directive
pub fn implied_extensions(id: ExtensionId) -> &'static [ExtensionId] {
    use ext::*;

    const AEP_MEMBERS: &[ExtensionId] = &[
        KHR_BLEND_EQUATION_ADVANCED,
        OES_SAMPLE_VARIABLES,
        OES_SHADER_IMAGE_ATOMIC,
        OES_SHADER_MULTISAMPLE_INTERPOLATION,
        OES_TEXTURE_STORAGE_MULTISAMPLE_2D_ARRAY,
        EXT_GEOMETRY_SHADER,
        EXT_GPU_SHADER5,
        EXT_PRIMITIVE_BOUNDING_BOX,
        EXT_SHADER_IO_BLOCKS,
        EXT_TESSELLATION_SHADER,
        EXT_TEXTURE_BUFFER,
        EXT_TEXTURE_CUBE_MAP_ARRAY,
    ];

    match id {
        ANDROID_EXTENSION_PACK_ES31A => AEP_MEMBERS,
        EXT_GEOMETRY_SHADER | EXT_TESSELLATION_SHADER => &[EXT_SHADER_IO_BLOCKS],
        OES_GEOMETRY_SHADER | OES_TESSELLATION_SHADER => &[OES_SHADER_IO_BLOCKS],
        GOOGLE_INCLUDE_DIRECTIVE => &[GOOGLE_CPP_STYLE_LINE_DIRECTIVE],
        _ => &[],
    }
}
