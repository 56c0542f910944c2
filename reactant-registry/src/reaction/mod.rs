//! Reactant conversion table.
//!
//! Maps a source fluid to the fluid it decays into when burned, optionally
//! with the coefficients the reactor simulation feeds into its fission math.

mod reaction;
mod registry;

pub use reaction::*;
pub use registry::*;
