//! glslver Registry: extension catalog and behavior tracking
//!
//! Extension names are interned to [`ExtensionId`] handles so the checks
//! that run for every scanned token compare integers, not strings. Names the
//! compiler knows come from the fixed [`catalog`]; names first seen in shader
//! text are matched against it once by [`ExtensionBehaviorMap::canonicalize`].

pub mod behavior;
pub mod behavior_map;
pub mod catalog;

pub use behavior::{ExtensionBehavior, RegistryError};
pub use behavior_map::ExtensionBehaviorMap;
pub use catalog::{ext, ExtensionId, ExtensionInfo, PreambleScope, Support, CATALOG};
