//! Compile options loaded from YAML or JSON
//!
//! A host driver describes a compilation unit in a small document and turns
//! it into a [`CompilationContext`].

use serde::{Deserialize, Serialize};

use crate::context::CompilationContext;
use crate::data_model::{MessageFlags, Profile, SpvVersion, Stage};
use crate::error::CompatError;

/// Configuration of one compilation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Declared version (`#version` number)
    #[serde(default = "default_version")]
    pub version: i32,

    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub stage: Stage,

    /// SPIR-V / client API target
    #[serde(default)]
    pub target: SpvVersion,

    #[serde(default)]
    pub forward_compatible: bool,

    #[serde(default)]
    pub messages: MessageOptions,
}

fn default_version() -> i32 {
    100
}

/// Message flags in document form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOptions {
    pub relaxed_errors: bool,
    pub suppress_warnings: bool,
    /// Host wants the syntax tree printed
    pub ast: bool,
    pub read_hlsl: bool,
    pub spv_rules: bool,
    pub vulkan_rules: bool,
    pub only_preprocessor: bool,
    pub cascading_errors: bool,
}

impl MessageOptions {
    pub fn flags(&self) -> MessageFlags {
        let mut flags = MessageFlags::empty();
        flags.set(MessageFlags::RELAXED_ERRORS, self.relaxed_errors);
        flags.set(MessageFlags::SUPPRESS_WARNINGS, self.suppress_warnings);
        flags.set(MessageFlags::AST, self.ast);
        flags.set(MessageFlags::READ_HLSL, self.read_hlsl);
        flags.set(MessageFlags::SPV_RULES, self.spv_rules);
        flags.set(MessageFlags::VULKAN_RULES, self.vulkan_rules);
        flags.set(MessageFlags::ONLY_PREPROCESSOR, self.only_preprocessor);
        flags.set(MessageFlags::CASCADING_ERRORS, self.cascading_errors);
        flags
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            version: default_version(),
            profile: Profile::default(),
            stage: Stage::default(),
            target: SpvVersion::default(),
            forward_compatible: false,
            messages: MessageOptions::default(),
        }
    }
}

impl CompileOptions {
    /// Load options from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, CompatError> {
        serde_yaml::from_str(yaml).map_err(|e| CompatError::ConfigParse(e.to_string()))
    }

    /// Load options from JSON
    pub fn from_json(json: &str) -> Result<Self, CompatError> {
        serde_json::from_str(json).map_err(|e| CompatError::ConfigParse(e.to_string()))
    }

    fn validate(&self) -> Result<(), CompatError> {
        if self.target.vulkan > 0 && self.target.spv == 0 {
            return Err(CompatError::InvalidTarget(
                "a Vulkan target requires a SPIR-V version".to_string(),
            ));
        }
        if self.target.vulkan > 0 && self.target.open_gl > 0 {
            return Err(CompatError::InvalidTarget(
                "cannot target Vulkan and OpenGL SPIR-V at once".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the context a parser hands to the checker
    pub fn into_context(self) -> Result<CompilationContext, CompatError> {
        self.validate()?;
        let mut ctx = CompilationContext::new(self.version, self.profile, self.stage)
            .with_spv_version(self.target)
            .with_messages(self.messages.flags());
        if self.forward_compatible {
            ctx = ctx.forward_compatible();
        }
        Ok(ctx)
    }
}
