//! Data Model: Profile, Stage, SpvVersion, MessageFlags, SourceLoc
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompatError;

bitflags! {
    /// A set of language profiles, one bit per profile.
    ///
    /// Checks take a mask so a single call can target several profiles and
    /// each bit is matched independently against the current profile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProfileMask: u32 {
        /// Desktop GLSL before profiles existed (`#version 110`..`140`)
        const NO_PROFILE = 1 << 0;
        const CORE = 1 << 1;
        const COMPATIBILITY = 1 << 2;
        const ES = 1 << 3;

        const DESKTOP = Self::NO_PROFILE.bits() | Self::CORE.bits() | Self::COMPATIBILITY.bits();
    }
}

/// The declared profile of the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    None,
    Core,
    Compatibility,
    Es,
}

impl Profile {
    /// The single bit this profile occupies in a [`ProfileMask`]
    pub fn mask(self) -> ProfileMask {
        match self {
            Profile::None => ProfileMask::NO_PROFILE,
            Profile::Core => ProfileMask::CORE,
            Profile::Compatibility => ProfileMask::COMPATIBILITY,
            Profile::Es => ProfileMask::ES,
        }
    }

    /// True when `mask` has this profile's bit set
    pub fn is_in(self, mask: ProfileMask) -> bool {
        mask.intersects(self.mask())
    }

    pub fn is_es(self) -> bool {
        self == Profile::Es
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::None => "none",
            Profile::Core => "core",
            Profile::Compatibility => "compatibility",
            Profile::Es => "es",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Profile> for ProfileMask {
    fn from(profile: Profile) -> Self {
        profile.mask()
    }
}

/// Parses the profile keyword of a `#version` line.
impl FromStr for Profile {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Profile::None),
            "core" => Ok(Profile::Core),
            "compatibility" => Ok(Profile::Compatibility),
            "es" => Ok(Profile::Es),
            other => Err(CompatError::UnknownProfile(other.to_string())),
        }
    }
}

bitflags! {
    /// A set of pipeline stages, one bit per [`Stage`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageMask: u32 {
        const VERTEX = 1 << 0;
        const TESS_CONTROL = 1 << 1;
        const TESS_EVALUATION = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
        const COMPUTE = 1 << 5;
    }
}

/// The pipeline stage being compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Vertex,
        Stage::TessControl,
        Stage::TessEvaluation,
        Stage::Geometry,
        Stage::Fragment,
        Stage::Compute,
    ];

    pub fn mask(self) -> StageMask {
        match self {
            Stage::Vertex => StageMask::VERTEX,
            Stage::TessControl => StageMask::TESS_CONTROL,
            Stage::TessEvaluation => StageMask::TESS_EVALUATION,
            Stage::Geometry => StageMask::GEOMETRY,
            Stage::Fragment => StageMask::FRAGMENT,
            Stage::Compute => StageMask::COMPUTE,
        }
    }

    pub fn is_in(self, mask: StageMask) -> bool {
        mask.intersects(self.mask())
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::TessControl => "tessellation control",
            Stage::TessEvaluation => "tessellation evaluation",
            Stage::Geometry => "geometry",
            Stage::Fragment => "fragment",
            Stage::Compute => "compute",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Stage> for StageMask {
    fn from(stage: Stage) -> Self {
        stage.mask()
    }
}

/// Accepts the configuration names as well as the conventional file suffixes.
impl FromStr for Stage {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertex" | "vert" => Ok(Stage::Vertex),
            "tess-control" | "tesc" => Ok(Stage::TessControl),
            "tess-evaluation" | "tese" => Ok(Stage::TessEvaluation),
            "geometry" | "geom" => Ok(Stage::Geometry),
            "fragment" | "frag" => Ok(Stage::Fragment),
            "compute" | "comp" => Ok(Stage::Compute),
            other => Err(CompatError::UnknownStage(other.to_string())),
        }
    }
}

/// Target environment: which SPIR-V and which client API the compilation
/// produces code for. A zero field means "not targeting this".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpvVersion {
    /// SPIR-V version word, 0 when not generating SPIR-V
    #[serde(default)]
    pub spv: u32,
    /// Version of the Vulkan GLSL dialect (`#define VULKAN <n>`)
    #[serde(default)]
    pub vulkan_glsl: i32,
    /// Vulkan API version targeted
    #[serde(default)]
    pub vulkan: i32,
    /// OpenGL SPIR-V semantics version (`#define GL_SPIRV <n>`)
    #[serde(default)]
    pub open_gl: i32,
}

impl SpvVersion {
    /// Target Vulkan through SPIR-V
    pub fn vulkan(spv: u32, vulkan: i32) -> Self {
        Self {
            spv,
            vulkan_glsl: 100,
            vulkan,
            open_gl: 0,
        }
    }

    /// Target OpenGL through SPIR-V
    pub fn open_gl(spv: u32, open_gl: i32) -> Self {
        Self {
            spv,
            vulkan_glsl: 0,
            vulkan: 0,
            open_gl,
        }
    }

    pub fn generates_spirv(&self) -> bool {
        self.spv != 0
    }

    pub fn targets_vulkan(&self) -> bool {
        self.vulkan > 0
    }
}

bitflags! {
    /// Message and rule-set flags for a compilation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageFlags: u32 {
        /// Downgrade profile/version mismatches to warnings
        const RELAXED_ERRORS = 1 << 0;
        /// Drop warning text; errors are unaffected
        const SUPPRESS_WARNINGS = 1 << 1;
        /// Print the syntax tree after parsing
        const AST = 1 << 2;
        const SPV_RULES = 1 << 3;
        const VULKAN_RULES = 1 << 4;
        const ONLY_PREPROCESSOR = 1 << 5;
        /// The source is HLSL rather than GLSL
        const READ_HLSL = 1 << 6;
        const CASCADING_ERRORS = 1 << 7;
    }
}

/// Where a diagnostic points in the source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLoc {
    /// File name, when known (set by `#line` or includes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Index of the source string in a multi-string compile
    pub string: i32,
    pub line: i32,
    pub column: i32,
}

impl SourceLoc {
    pub fn new(string: i32, line: i32, column: i32) -> Self {
        Self {
            name: None,
            string,
            line,
            column,
        }
    }

    pub fn at_line(line: i32) -> Self {
        Self::new(0, line, 0)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", name, self.line),
            None => write!(f, "{}:{}", self.string, self.line),
        }
    }
}
