//! Chamber layouts of the reactor's fluid-holding parts.

mod coolant;
mod fuel;

pub use coolant::{COOLANT, CoolantTanks, VAPOR};
pub use fuel::{FUEL, FuelTanks, ReactantPolicy, WASTE};
