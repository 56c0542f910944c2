use super::{FluidEntry, FluidKind, builtin};
use crate::{RegistryError, RegistryExt};
use rustc_hash::FxHashMap;

/// Maps fluid kinds to their stable names and back.
///
/// Names are what persisted snapshots store, so they must stay stable across
/// runs even if raw ids are reassigned.
#[derive(Debug, Default)]
pub struct FluidRegistry {
    by_kind: FxHashMap<FluidKind, FluidEntry>,
    by_name: FxHashMap<&'static str, FluidKind>,
    frozen: bool,
}

impl FluidRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the [built-in](builtin) fluids, left
    /// unfrozen so callers can add their own.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for entry in builtin::ALL {
            registry.by_name.insert(entry.name, entry.kind);
            registry.by_kind.insert(entry.kind, entry);
        }
        registry
    }

    /// Registers a fluid.
    ///
    /// Re-registering the same kind under a new name replaces the old entry.
    pub fn register(&mut self, entry: FluidEntry) -> Result<(), RegistryError> {
        if self.frozen {
            return Err(RegistryError::Frozen { name: entry.name });
        }
        if let Some(&existing) = self.by_name.get(entry.name)
            && existing != entry.kind
        {
            return Err(RegistryError::DuplicateName {
                name: entry.name,
                existing: existing.id(),
            });
        }
        if let Some(old) = self.by_kind.insert(entry.kind, entry)
            && old.name != entry.name
        {
            log::warn!(
                "Fluid {} renamed from `{}` to `{}`",
                entry.kind,
                old.name,
                entry.name
            );
            self.by_name.remove(old.name);
        }
        self.by_name.insert(entry.name, entry.kind);
        Ok(())
    }

    /// Looks up a fluid by kind.
    #[must_use]
    pub fn get(&self, kind: FluidKind) -> Option<&FluidEntry> {
        self.by_kind.get(&kind)
    }

    /// Looks up a fluid by its registered name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<FluidKind> {
        self.by_name.get(name).copied()
    }

    /// Returns the registered name of `kind`, if any.
    #[must_use]
    pub fn name_of(&self, kind: FluidKind) -> Option<&'static str> {
        self.by_kind.get(&kind).map(|entry| entry.name)
    }

    /// Iterates over every registered fluid in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FluidEntry> {
        self.by_kind.values()
    }

    /// Number of registered fluids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl RegistryExt for FluidRegistry {
    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve_both_ways() {
        let registry = FluidRegistry::with_builtins();

        assert_eq!(registry.len(), builtin::ALL.len());
        assert_eq!(registry.by_name("yellorium"), Some(FluidKind::YELLORIUM));
        assert_eq!(registry.name_of(FluidKind::STEAM), Some("steam"));
        assert_eq!(registry.by_name("lava"), None);
    }

    #[test]
    fn frozen_registry_rejects_entries() {
        let mut registry = FluidRegistry::new();
        registry.freeze();

        let result = registry.register(FluidEntry {
            kind: FluidKind(42),
            name: "ludicrite",
        });

        assert_eq!(result, Err(RegistryError::Frozen { name: "ludicrite" }));
        assert!(registry.is_empty());
    }

    #[test]
    fn name_cannot_be_claimed_twice() {
        let mut registry = FluidRegistry::with_builtins();

        let result = registry.register(FluidEntry {
            kind: FluidKind(42),
            name: "water",
        });

        assert_eq!(
            result,
            Err(RegistryError::DuplicateName {
                name: "water",
                existing: FluidKind::WATER.id(),
            })
        );
    }

    #[test]
    fn renaming_a_kind_drops_the_old_name() {
        let mut registry = FluidRegistry::with_builtins();

        registry
            .register(FluidEntry {
                kind: FluidKind::STEAM,
                name: "vapor",
            })
            .unwrap();

        assert_eq!(registry.by_name("steam"), None);
        assert_eq!(registry.by_name("vapor"), Some(FluidKind::STEAM));
    }
}
