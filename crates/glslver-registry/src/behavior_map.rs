//! Per-compilation extension behavior tracking
//!
//! Names live in an append-only arena: the catalog first, then any name read
//! from shader source. Behaviors are a dense table indexed by the same id, so
//! a lookup on the scanning path is a bounds check and a load.
//!
//! Each map has its own tag. Ids for source names carry it, so an id handed
//! to the wrong map fails loudly instead of aliasing another extension.
use std::borrow::Cow;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::behavior::ExtensionBehavior;
use crate::catalog::{ExtensionId, CATALOG, CATALOG_OWNER};

static NEXT_MAP_TAG: AtomicU32 = AtomicU32::new(CATALOG_OWNER + 1);

/// Extension behavior state for one compilation unit.
///
/// Not shareable between concurrent compilations; each unit owns its own.
#[derive(Debug, Clone)]
pub struct ExtensionBehaviorMap {
    tag: u32,
    names: Vec<Cow<'static, str>>,
    behaviors: Vec<ExtensionBehavior>,
}

impl ExtensionBehaviorMap {
    /// An empty map seeded with the catalog names
    pub fn new() -> Self {
        Self {
            tag: NEXT_MAP_TAG.fetch_add(1, Ordering::Relaxed),
            names: CATALOG.iter().map(|info| Cow::Borrowed(info.name)).collect(),
            behaviors: vec![ExtensionBehavior::Missing; CATALOG.len()],
        }
    }

    /// Forget every behavior. Called at the start of each compilation unit.
    ///
    /// Interned names stay, so ids handed out earlier keep naming the same
    /// extension.
    pub fn reset(&mut self) {
        self.behaviors.clear();
        self.behaviors.resize(self.names.len(), ExtensionBehavior::Missing);
    }

    /// Map a name read from shader text onto its identity.
    ///
    /// Returns the existing id when a character-equal name is already
    /// interned, otherwise interns `raw` as a new identity. This is a linear
    /// scan, so compiler-internal code should use the [`ext`] constants.
    ///
    /// [`ext`]: crate::ext
    pub fn canonicalize(&mut self, raw: &str) -> ExtensionId {
        if let Some(id) = self.find(raw) {
            return id;
        }
        let id = self.id_at(self.names.len());
        tracing::debug!(extension = raw, id = id.index(), "interning extension name from source");
        self.names.push(Cow::Owned(raw.to_string()));
        self.behaviors.push(ExtensionBehavior::Missing);
        id
    }

    /// Content lookup without interning
    pub fn find(&self, name: &str) -> Option<ExtensionId> {
        self.names
            .iter()
            .position(|known| known == name)
            .map(|index| self.id_at(index))
    }

    /// The name an id was interned from
    ///
    /// # Panics
    ///
    /// If `id` was interned by another map.
    pub fn name(&self, id: ExtensionId) -> &str {
        &self.names[self.slot(id)]
    }

    /// `Missing` for anything never set
    ///
    /// # Panics
    ///
    /// If `id` was interned by another map.
    pub fn get(&self, id: ExtensionId) -> ExtensionBehavior {
        self.behaviors[self.slot(id)]
    }

    /// Record a behavior for a canonical id.
    ///
    /// # Panics
    ///
    /// If `id` was interned by another map. Names coming from source must go
    /// through [`canonicalize`](Self::canonicalize) first.
    pub fn set(&mut self, id: ExtensionId, behavior: ExtensionBehavior) {
        let slot = self.slot(id);
        self.behaviors[slot] = behavior;
    }

    /// Overwrite the behavior of every tracked extension. Untracked ones stay
    /// `Missing`.
    pub fn set_all(&mut self, behavior: ExtensionBehavior) {
        let mut touched = 0usize;
        for slot in self.behaviors.iter_mut().filter(|b| b.is_declared()) {
            *slot = behavior;
            touched += 1;
        }
        tracing::debug!(%behavior, touched, "applied behavior to all tracked extensions");
    }

    /// Ids and behaviors of every tracked extension
    pub fn tracked(&self) -> impl Iterator<Item = (ExtensionId, ExtensionBehavior)> + '_ {
        self.behaviors
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_declared())
            .map(move |(index, b)| (self.id_at(index), *b))
    }

    /// Number of interned names, catalog included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True if `id` is a catalog id or was interned by this map
    pub fn owns(&self, id: ExtensionId) -> bool {
        id.is_canonical() || id.owner() == self.tag
    }

    fn id_at(&self, index: usize) -> ExtensionId {
        if index < CATALOG.len() {
            ExtensionId::canonical(index as u32)
        } else {
            ExtensionId::owned(index, self.tag)
        }
    }

    fn slot(&self, id: ExtensionId) -> usize {
        assert!(
            self.owns(id),
            "extension id {} was interned by another behavior map",
            id.index()
        );
        id.index()
    }
}

impl Default for ExtensionBehaviorMap {
    fn default() -> Self {
        Self::new()
    }
}
