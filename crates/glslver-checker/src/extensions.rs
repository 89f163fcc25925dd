//! Extension gates and `#extension` directive handling

use glslver_core::SourceLoc;
use glslver_registry::catalog::{self, ExtensionId, Support};
use glslver_registry::ExtensionBehavior;

use crate::checker::VersionChecker;
use crate::diagnostics::{Channel, DiagnosticSink};

/// The pseudo-extension name that targets every tracked extension
pub const ALL_EXTENSIONS: &str = "all";

impl<S: DiagnosticSink> VersionChecker<S> {
    /// Forget all extension state. Called at the start of a compilation unit.
    pub fn initialize_extension_behavior(&mut self) {
        self.extensions.reset();
    }

    pub fn extension_behavior(&self, extension: ExtensionId) -> ExtensionBehavior {
        self.behavior_of(extension)
    }

    /// Behavior by name without interning; `Missing` for names never seen
    pub fn extension_behavior_by_name(&self, name: &str) -> ExtensionBehavior {
        self.extensions
            .find(name)
            .map(|id| self.behavior_of(id))
            .unwrap_or(ExtensionBehavior::Missing)
    }

    /// Map a name read from source onto its identity
    pub fn canonicalize(&mut self, raw: &str) -> ExtensionId {
        self.extensions.canonicalize(raw)
    }

    pub fn extension_name(&self, extension: ExtensionId) -> &str {
        self.extensions.name(extension)
    }

    /// `Enable` or `Require`
    pub fn extension_turned_on(&self, extension: ExtensionId) -> bool {
        self.behavior_of(extension).is_turned_on()
    }

    /// True if any of `extensions` is turned on
    pub fn extensions_turned_on(&self, extensions: &[ExtensionId]) -> bool {
        extensions.iter().any(|&e| self.extension_turned_on(e))
    }

    /// True if any of `extensions` was declared in any state. Reports nothing.
    pub fn check_extensions_requested(&self, extensions: &[ExtensionId]) -> bool {
        extensions.iter().any(|&e| self.behavior_of(e).is_declared())
    }

    /// The feature needs one of `extensions` enabled, required, or warned on.
    /// An empty list never passes.
    pub fn require_extensions(&mut self, loc: &SourceLoc, extensions: &[ExtensionId], feature: &str) {
        self.gate_extensions(Channel::Parse, loc, extensions, feature);
    }

    /// Preprocessor form of [`require_extensions`](Self::require_extensions)
    pub fn pp_require_extensions(&mut self, loc: &SourceLoc, extensions: &[ExtensionId], feature: &str) {
        self.gate_extensions(Channel::Preprocessor, loc, extensions, feature);
    }

    fn gate_extensions(&mut self, channel: Channel, loc: &SourceLoc, extensions: &[ExtensionId], feature: &str) {
        if self.extensions_turned_on(extensions) {
            return;
        }

        let mut warned = false;
        for &extension in extensions {
            let mut behavior = self.behavior_of(extension);
            let name = self.name_of(extension);
            if behavior == ExtensionBehavior::Disable && self.ctx.relaxed_errors() {
                self.warn_on(
                    channel,
                    loc,
                    "extension must be enabled to use this feature:",
                    feature,
                    format_args!("{}", name),
                );
                behavior = ExtensionBehavior::Warn;
            }
            if behavior == ExtensionBehavior::Warn {
                self.warn_on(
                    channel,
                    loc,
                    "extension warning",
                    feature,
                    format_args!("extension {} is being used for {}", name, feature),
                );
                warned = true;
            }
        }
        if warned {
            return;
        }

        tracing::trace!(feature, %channel, "extension gate failed");
        match extensions {
            [single] => {
                let name = self.name_of(*single);
                self.error_on(channel, loc, "required extension not requested:", feature, format_args!("{}", name));
            }
            _ => {
                let names: Vec<String> = extensions.iter().map(|&e| self.name_of(e)).collect();
                self.error_on(
                    channel,
                    loc,
                    "required extension not requested:",
                    feature,
                    format_args!("Possible extensions include: {}", names.join(", ")),
                );
            }
        }
    }

    /// Handle `#extension <name> : <behavior>` exactly as written in source.
    ///
    /// `all` may only be disabled or warned on. Unknown names are tracked
    /// anyway so later queries see what the shader asked for.
    pub fn update_extension_behavior_raw(&mut self, line: i32, extension: &str, behavior: &str) {
        let loc = self.directive_loc(line);
        let behavior = match behavior.parse::<ExtensionBehavior>() {
            Ok(behavior) => behavior,
            Err(_) => {
                self.error(&loc, "behavior not supported:", "#extension", format_args!("{}", behavior));
                return;
            }
        };

        if extension == ALL_EXTENSIONS {
            if behavior.is_turned_on() {
                self.error(
                    &loc,
                    "extension 'all' cannot have 'require' or 'enable' behavior",
                    "#extension",
                    format_args!(""),
                );
            } else {
                self.extensions.set_all(behavior);
            }
            return;
        }

        let id = self.extensions.canonicalize(extension);
        self.update_extension_behavior(&loc, id, behavior);
    }

    /// Set the behavior of a canonical extension and of the extensions it
    /// implies
    pub fn update_extension_behavior(&mut self, loc: &SourceLoc, extension: ExtensionId, behavior: ExtensionBehavior) {
        self.set_extension_behavior(loc, extension, behavior);
        for &implied in catalog::implied_extensions(extension) {
            self.update_extension_behavior(loc, implied, behavior);
        }
    }

    /// Partially supported extensions warn once, on the first directive that
    /// names them in this compilation unit.
    fn set_extension_behavior(&mut self, loc: &SourceLoc, extension: ExtensionId, behavior: ExtensionBehavior) {
        let name = self.name_of(extension);
        match extension.info() {
            None if behavior == ExtensionBehavior::Require => {
                self.error(loc, "extension not supported:", "#extension", format_args!("{}", name));
            }
            None => {
                self.warn(loc, "extension not supported:", "#extension", format_args!("{}", name));
            }
            Some(info) if info.support == Support::Partial && !self.behavior_of(extension).is_declared() => {
                self.warn(loc, "extension is only partially supported:", "#extension", format_args!("{}", name));
            }
            Some(_) => {}
        }
        self.extensions.set(extension, behavior);
    }

    fn directive_loc(&self, line: i32) -> SourceLoc {
        match self.ctx.current_loc() {
            Ok(mut loc) => {
                loc.line = line;
                loc
            }
            Err(_) => SourceLoc::at_line(line),
        }
    }
}
