//! # Reactant Registry
//!
//! Identity registries consumed by the chamber store: the fluid kinds a
//! device can hold and the reactions that turn one fluid into another.

pub mod fluid;
pub mod reaction;

pub use fluid::{FluidEntry, FluidKind, FluidRegistry};
pub use reaction::{ReactionRegistry, ReactionRule};

use thiserror::Error;

/// Errors raised while populating a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry was frozen before this registration.
    #[error("cannot register `{name}` after the registry is frozen")]
    Frozen {
        /// Name of the rejected entry.
        name: &'static str,
    },
    /// Another entry already claimed this name under a different kind.
    #[error("fluid name `{name}` is already registered as kind {existing}")]
    DuplicateName {
        /// The contested name.
        name: &'static str,
        /// Raw id of the kind that owns the name.
        existing: u16,
    },
}

/// Shared behaviour for registries that stop accepting entries once loading
/// is done.
pub trait RegistryExt {
    /// Locks the registry against further registration.
    fn freeze(&mut self);

    /// Returns true once [`RegistryExt::freeze`] has been called.
    fn is_frozen(&self) -> bool;
}
