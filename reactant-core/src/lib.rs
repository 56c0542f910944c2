//! # Reactant Core
//!
//! Multi-chamber fluid storage for simulated devices.
//!
//! A [`ChamberStore`] holds a fixed number of chambers under a shared or
//! per-chamber capacity. [`FluidTanks`] wraps a store with an
//! [`UpdateThrottle`] and stable chamber names, giving the host a
//! fill/drain surface, a snapshot codec and a once-per-tick answer to
//! "should observers hear about this yet?".

pub mod chamber;
pub mod devices;
pub mod error;
pub mod snapshot;
pub mod tanks;
pub mod update;

pub use chamber::{Chamber, ChamberPolicy, ChamberStore, ClampPriority, FluidStack};
pub use error::ChamberError;
pub use tanks::{FluidTanks, TankInfo, TankQuery};
pub use update::{ConditionalUpdater, LastSeen, UpdateThrottle};
