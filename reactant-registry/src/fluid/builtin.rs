//! Fluids every reactor ships with.

use super::{FluidEntry, FluidKind};

/// Liquid coolant.
pub const WATER: FluidEntry = FluidEntry {
    kind: FluidKind::WATER,
    name: "water",
};

/// Boiled coolant.
pub const STEAM: FluidEntry = FluidEntry {
    kind: FluidKind::STEAM,
    name: "steam",
};

/// Primary reactor fuel.
pub const YELLORIUM: FluidEntry = FluidEntry {
    kind: FluidKind::YELLORIUM,
    name: "yellorium",
};

/// Spent fuel.
pub const CYANITE: FluidEntry = FluidEntry {
    kind: FluidKind::CYANITE,
    name: "cyanite",
};

/// Bred fuel, made from reprocessed cyanite.
pub const BLUTONIUM: FluidEntry = FluidEntry {
    kind: FluidKind::BLUTONIUM,
    name: "blutonium",
};

/// All built-in fluids in registration order.
pub const ALL: [FluidEntry; 5] = [WATER, STEAM, YELLORIUM, CYANITE, BLUTONIUM];
