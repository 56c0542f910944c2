//! Fuel and waste share one pooled tank inside a reactor.

use reactant_registry::{FluidKind, ReactionRegistry};
use smallvec::SmallVec;

use crate::chamber::{ChamberPolicy, ChamberStore, FluidStack};
use crate::tanks::FluidTanks;
use crate::update::ConditionalUpdater;

/// Chamber holding unburnt reactant.
pub const FUEL: usize = 0;
/// Chamber holding reaction products.
pub const WASTE: usize = 1;

const TANK_NAMES: &[&str] = &["fuel", "waste"];

/// Admits reaction sources into the fuel chamber and reaction products into
/// the waste chamber.
#[derive(Debug, Clone, Default)]
pub struct ReactantPolicy {
    fuels: SmallVec<[FluidKind; 4]>,
    wastes: SmallVec<[FluidKind; 4]>,
}

impl ReactantPolicy {
    /// Snapshots the sources and products known to `reactions`.
    #[must_use]
    pub fn from_reactions(reactions: &ReactionRegistry) -> Self {
        let mut policy = Self::default();
        for rule in reactions.iter() {
            if !policy.fuels.contains(&rule.source) {
                policy.fuels.push(rule.source);
            }
            if !policy.wastes.contains(&rule.product) {
                policy.wastes.push(rule.product);
            }
        }
        policy
    }
}

impl ChamberPolicy for ReactantPolicy {
    fn is_fluid_valid_for_stack(&self, index: usize, kind: FluidKind) -> bool {
        match index {
            FUEL => self.fuels.contains(&kind),
            WASTE => self.wastes.contains(&kind),
            _ => false,
        }
    }
}

/// The reactor's fuel tank: fuel in front, waste behind, one shared capacity.
///
/// When the capacity shrinks, waste is given up before fuel.
#[derive(Debug)]
pub struct FuelTanks {
    tanks: FluidTanks,
}

impl FuelTanks {
    /// Creates empty fuel and waste chambers sharing `capacity`. Only fluids
    /// known to `reactions` are admitted.
    #[must_use]
    pub fn new(reactions: &ReactionRegistry, capacity: u64) -> Self {
        let mut store = ChamberStore::new(2, false, ReactantPolicy::from_reactions(reactions));
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

    /// Mutable access to the underlying tanks.
    pub fn tanks_mut(&mut self) -> &mut FluidTanks {
        &mut self.tanks
    }

    /// Unburnt fuel, in mB.
    #[must_use]
    pub fn fuel_amount(&self) -> u64 {
        self.tanks.amount(FUEL)
    }

    /// Waste, in mB.
    #[must_use]
    pub fn waste_amount(&self) -> u64 {
        self.tanks.amount(WASTE)
    }

    /// Offers reactant to the fuel chamber.
    pub fn add_fuel(&mut self, fuel: FluidStack, commit: bool) -> u64 {
        self.tanks.fill(FUEL, fuel, commit)
    }

    /// Takes waste out for reprocessing.
    pub fn drain_waste(&mut self, amount: u64, commit: bool) -> Option<FluidStack> {
        self.tanks.drain_any(WASTE, amount, commit)
    }

    /// Burns up to `amount` of fuel, turning it into its reaction product.
    ///
    /// Returns how much fuel was burned. Nothing burns if the fuel has no
    /// reaction, or if the waste chamber holds a different product.
    pub fn burn(&mut self, amount: u64, reactions: &ReactionRegistry) -> u64 {
        let Some(fuel) = self.tanks.kind(FUEL) else {
            return 0;
        };
        let Some(rule) = reactions.lookup(fuel) else {
            return 0;
        };
        if !self.tanks.can_fill(WASTE, rule.product) {
            return 0;
        }
        let Some(burned) = self.tanks.drain(FUEL, fuel, amount, true) else {
            return 0;
        };

        // Pooled: draining the fuel freed exactly the room the waste needs.
        let produced = self
            .tanks
            .fill(WASTE, FluidStack::new(rule.product, burned.amount), true);
        debug_assert_eq!(produced, burned.amount);
        burned.amount
    }
}

impl ConditionalUpdater for FuelTanks {
    fn should_update(&mut self) -> bool {
        self.tanks.should_update()
    }
}
