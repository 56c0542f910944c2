//! Fluid identities.

pub mod builtin;
mod fluid;
mod registry;

pub use fluid::*;
pub use registry::*;

impl FluidKind {
    /// `water`
    pub const WATER: FluidKind = FluidKind(1);
    /// `steam`
    pub const STEAM: FluidKind = FluidKind(2);
    /// `yellorium`
    pub const YELLORIUM: FluidKind = FluidKind(3);
    /// `cyanite`
    pub const CYANITE: FluidKind = FluidKind(4);
    /// `blutonium`
    pub const BLUTONIUM: FluidKind = FluidKind(5);
}
