//! Coolant and the vapor it boils into, each in its own chamber.

use reactant_registry::FluidKind;

use crate::chamber::{ChamberStore, FluidStack};
use crate::tanks::FluidTanks;
use crate::update::ConditionalUpdater;

/// Chamber holding liquid coolant.
pub const COOLANT: usize = 0;
/// Chamber holding boiled-off vapor.
pub const VAPOR: usize = 1;

const TANK_NAMES: &[&str] = &["coolant", "vapor"];

fn coolant_policy(index: usize, kind: FluidKind) -> bool {
    matches!(
        (index, kind),
        (COOLANT, FluidKind::WATER) | (VAPOR, FluidKind::STEAM)
    )
}

/// An active cooling loop: water goes in, steam comes out. Each chamber has
/// the full capacity to itself.
#[derive(Debug)]
pub struct CoolantTanks {
    tanks: FluidTanks,
}

impl CoolantTanks {
    /// Creates empty coolant and vapor chambers of `capacity` each.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        let mut store = ChamberStore::new(2, true, coolant_policy);
        store.set_capacity(capacity);
        Self {
            tanks: FluidTanks::new(store, TANK_NAMES),
        }
    }

    /// The underlying tanks.
    #[must_use]
    pub fn tanks(&self) -> &FluidTanks {
        &self.tanks
    }

    /// Mutable access to the underlying tanks, for loading and capacity changes.
    pub fn tanks_mut(&mut self) -> &mut FluidTanks {
        &mut self.tanks
    }

    /// Liquid coolant held, in mB.
    #[must_use]
    pub fn coolant_amount(&self) -> u64 {
        self.tanks.amount(COOLANT)
    }

    /// Vapor held, in mB.
    #[must_use]
    pub fn vapor_amount(&self) -> u64 {
        self.tanks.amount(VAPOR)
    }

    /// Offers water to the coolant chamber and returns how much it takes.
    pub fn add_coolant(&mut self, amount: u64, commit: bool) -> u64 {
        self.tanks
            .fill(COOLANT, FluidStack::new(FluidKind::WATER, amount), commit)
    }

    /// Takes steam out of the vapor chamber.
    pub fn drain_vapor(&mut self, amount: u64, commit: bool) -> Option<FluidStack> {
        self.tanks.drain(VAPOR, FluidKind::STEAM, amount, commit)
    }

    /// Boils up to `amount` of coolant, limited by the room left for vapor.
    /// Returns how much was converted.
    pub fn vaporize(&mut self, amount: u64) -> u64 {
        let room = self.tanks.store().remaining_space(VAPOR);
        let Some(boiled) = self
            .tanks
            .drain(COOLANT, FluidKind::WATER, amount.min(room), true)
        else {
            return 0;
        };
        self.tanks
            .fill(VAPOR, FluidStack::new(FluidKind::STEAM, boiled.amount), true)
    }
}

impl ConditionalUpdater for CoolantTanks {
    fn should_update(&mut self) -> bool {
        self.tanks.should_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chambers_only_take_their_own_fluid() {
        let mut tanks = CoolantTanks::new(100);

        assert_eq!(
            tanks
                .tanks_mut()
                .fill(COOLANT, FluidStack::new(FluidKind::STEAM, 10), true),
            0
        );
        assert_eq!(
            tanks
                .tanks_mut()
                .fill(VAPOR, FluidStack::new(FluidKind::WATER, 10), true),
            0
        );
        assert_eq!(tanks.add_coolant(10, true), 10);
    }

    #[test]
    fn vaporize_is_bounded_by_vapor_room() {
        let mut tanks = CoolantTanks::new(100);
        tanks.add_coolant(100, true);

        assert_eq!(tanks.vaporize(70), 70);
        assert_eq!(tanks.vaporize(70), 30);
        assert_eq!(tanks.coolant_amount(), 0);
        assert_eq!(tanks.vapor_amount(), 100);
        assert_eq!(tanks.vaporize(10), 0);

        tanks.drain_vapor(40, true);
        tanks.add_coolant(100, true);
        assert_eq!(tanks.vaporize(100), 40);
        assert_eq!(tanks.coolant_amount(), 60);
    }
}
