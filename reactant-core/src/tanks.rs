//! The tank surface a device exposes to its host.

use std::fmt::Write as _;

use reactant_registry::{FluidKind, FluidRegistry};
use smallvec::SmallVec;

use crate::ChamberError;
use crate::chamber::{ChamberStore, FluidStack};
use crate::update::{ConditionalUpdater, UpdateThrottle};

/// Which chambers [`FluidTanks::tank_info`] should describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankQuery {
    /// Every chamber, in index order.
    All,
    /// Only the chamber at this index.
    Single(usize),
}

/// A read-only view of one chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TankInfo {
    /// A copy of what the chamber holds.
    pub contents: Option<FluidStack>,
    /// Capacity as configured on the store. In pooled mode this is shared.
    pub capacity: u64,
}

impl ChamberStore {
    /// Describes the requested chambers. An out-of-range single query yields
    /// nothing.
    #[must_use]
    pub fn tank_info(&self, query: TankQuery) -> SmallVec<[TankInfo; 2]> {
        let describe = |index: usize| TankInfo {
            contents: self.chamber(index).and_then(|chamber| chamber.contents()),
            capacity: self.capacity(),
        };
        match query {
            TankQuery::All => (0..self.chamber_count()).map(describe).collect(),
            TankQuery::Single(index) if index < self.chamber_count() => {
                SmallVec::from_elem(describe(index), 1)
            }
            TankQuery::Single(_) => SmallVec::new(),
        }
    }
}

/// A chamber store bundled with its update throttle and chamber names.
///
/// This is what a device owns. Hosts fill and drain through it every tick,
/// poll [`ConditionalUpdater::should_update`] once per tick, and persist it
/// through [`FluidTanks::write_snapshot`] and [`FluidTanks::read_snapshot`].
#[derive(Debug)]
pub struct FluidTanks {
    pub(crate) store: ChamberStore,
    pub(crate) throttle: UpdateThrottle,
    pub(crate) tank_names: &'static [&'static str],
}

impl FluidTanks {
    /// Wraps `store`. `tank_names` must hold one stable name per chamber for
    /// snapshots to work; a mismatch surfaces when a snapshot is taken.
    #[must_use]
    pub fn new(store: ChamberStore, tank_names: &'static [&'static str]) -> Self {
        let throttle = UpdateThrottle::new(store.chamber_count());
        Self {
            store,
            throttle,
            tank_names,
        }
    }

    /// The chambers.
    #[must_use]
    pub fn store(&self) -> &ChamberStore {
        &self.store
    }

    /// The update throttle and its baselines.
    #[must_use]
    pub fn throttle(&self) -> &UpdateThrottle {
        &self.throttle
    }

    /// Stable chamber names used as snapshot keys.
    #[must_use]
    pub fn tank_names(&self) -> &'static [&'static str] {
        self.tank_names
    }

    pub(crate) fn check_tank_names(&self) -> Result<(), ChamberError> {
        if self.tank_names.len() == self.store.chamber_count() {
            Ok(())
        } else {
            Err(ChamberError::TankNameMismatch {
                expected: self.store.chamber_count(),
                actual: self.tank_names.len(),
            })
        }
    }

    /// See [`ChamberStore::capacity`].
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.store.capacity()
    }

    /// See [`ChamberStore::set_capacity`].
    pub fn set_capacity(&mut self, capacity: u64) {
        self.store.set_capacity(capacity);
    }

    /// See [`ChamberStore::total_amount`].
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.store.total_amount()
    }

    /// See [`ChamberStore::amount`].
    #[must_use]
    pub fn amount(&self, index: usize) -> u64 {
        self.store.amount(index)
    }

    /// See [`ChamberStore::kind`].
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<FluidKind> {
        self.store.kind(index)
    }

    /// See [`ChamberStore::fill`].
    pub fn fill(&mut self, index: usize, incoming: FluidStack, commit: bool) -> u64 {
        self.store.fill(index, incoming, commit)
    }

    /// See [`ChamberStore::fill_amount`].
    pub fn fill_amount(&mut self, index: usize, amount: u64) -> Result<u64, ChamberError> {
        self.store.fill_amount(index, amount)
    }

    /// See [`ChamberStore::drain`].
    pub fn drain(
        &mut self,
        index: usize,
        kind: FluidKind,
        amount: u64,
        commit: bool,
    ) -> Option<FluidStack> {
        self.store.drain(index, kind, amount, commit)
    }

    /// See [`ChamberStore::drain_any`].
    pub fn drain_any(&mut self, index: usize, amount: u64, commit: bool) -> Option<FluidStack> {
        self.store.drain_any(index, amount, commit)
    }

    /// See [`ChamberStore::can_accept`].
    #[must_use]
    pub fn can_fill(&self, index: usize, kind: FluidKind) -> bool {
        self.store.can_accept(index, kind)
    }

    /// See [`ChamberStore::can_drain`].
    #[must_use]
    pub fn can_drain(&self, index: usize, kind: FluidKind) -> bool {
        self.store.can_drain(index, kind)
    }

    /// See [`ChamberStore::tank_info`].
    #[must_use]
    pub fn tank_info(&self, query: TankQuery) -> SmallVec<[TankInfo; 2]> {
        self.store.tank_info(query)
    }

    /// Absorbs the tanks of a structure joining this one. See
    /// [`ChamberStore::merge`].
    pub fn merge(&mut self, other: FluidTanks) {
        self.store.merge(other.store);
    }

    /// Marks every chamber as never broadcast.
    pub fn force_update(&mut self) {
        self.throttle.force_update();
    }

    /// Human readable listing of the capacity and each chamber.
    #[must_use]
    pub fn debug_info(&self, fluids: &FluidRegistry) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Capacity (per): {}", self.store.capacity());
        for (index, chamber) in self.store.chambers().iter().enumerate() {
            let name = self.tank_names.get(index).copied().unwrap_or("?");
            let _ = write!(out, "[{index}] {name}: ");
            match chamber.contents() {
                None => out.push_str("empty"),
                Some(stack) => match fluids.name_of(stack.kind) {
                    Some(fluid) => {
                        let _ = write!(out, "{fluid}, {} mB", stack.amount);
                    }
                    None => {
                        let _ = write!(out, "{}, {} mB", stack.kind, stack.amount);
                    }
                },
            }
            out.push('\n');
        }
        out
    }
}

impl ConditionalUpdater for FluidTanks {
    fn should_update(&mut self) -> bool {
        self.throttle.should_update(&self.store)
    }
}
