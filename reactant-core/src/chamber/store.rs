use std::fmt;

use reactant_registry::FluidKind;
use smallvec::SmallVec;

use super::{Chamber, ChamberPolicy, ClampPriority, FluidStack};
use crate::ChamberError;

/// A fixed set of fluid chambers sharing one capacity setting.
///
/// With `separate` set, every chamber may hold up to `capacity` on its own.
/// Otherwise the chambers behave like one tank holding several fluids and
/// their combined amount is limited to `capacity`.
///
/// Every mutating operation takes a `commit` flag. A call with `commit`
/// unset reports what would happen and leaves the store untouched, for any
/// input, including invalid ones.
pub struct ChamberStore {
    chambers: SmallVec<[Chamber; 2]>,
    capacity: u64,
    separate: bool,
    clamp_priority: ClampPriority,
    policy: Box<dyn ChamberPolicy>,
}

impl ChamberStore {
    /// Creates a store with `chamber_count` empty chambers and no capacity.
    #[must_use]
    pub fn new(chamber_count: usize, separate: bool, policy: impl ChamberPolicy + 'static) -> Self {
        Self {
            chambers: SmallVec::from_elem(Chamber::EMPTY, chamber_count),
            capacity: 0,
            separate,
            clamp_priority: ClampPriority::default(),
            policy: Box::new(policy),
        }
    }

    /// Sets the order in which pooled contents are shed when capacity shrinks.
    #[must_use]
    pub fn with_clamp_priority(mut self, clamp_priority: ClampPriority) -> Self {
        self.clamp_priority = clamp_priority;
        self
    }

    /// Number of chambers. Fixed for the life of the store.
    #[must_use]
    pub fn chamber_count(&self) -> usize {
        self.chambers.len()
    }

    /// Returns true if each chamber has the full capacity to itself.
    #[must_use]
    pub fn is_separate(&self) -> bool {
        self.separate
    }

    /// The order pooled contents are shed in.
    #[must_use]
    pub fn clamp_priority(&self) -> &ClampPriority {
        &self.clamp_priority
    }

    /// All chambers in index order.
    #[must_use]
    pub fn chambers(&self) -> &[Chamber] {
        &self.chambers
    }

    /// Returns the chamber at `index`, or `None` if out of range.
    #[must_use]
    pub fn chamber(&self, index: usize) -> Option<&Chamber> {
        self.chambers.get(index)
    }

    /// Amount held in chamber `index`; 0 for empty or out-of-range chambers.
    #[must_use]
    pub fn amount(&self, index: usize) -> u64 {
        self.chambers.get(index).map_or(0, Chamber::amount)
    }

    /// Fluid held in chamber `index`.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<FluidKind> {
        self.chambers.get(index).and_then(Chamber::kind)
    }

    /// Capacity per chamber when separate, shared otherwise.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Changes the capacity and immediately sheds anything that no longer fits.
    pub fn set_capacity(&mut self, capacity: u64) {
        self.capacity = capacity;
        self.clamp_to_capacity();
    }

    /// Total amount held across all chambers, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.chambers
            .iter()
            .map(Chamber::amount)
            .fold(0, u64::saturating_add)
    }

    /// Space left for chamber `index`.
    ///
    /// Per chamber in separate mode, shared by every chamber in pooled mode.
    #[must_use]
    pub fn remaining_space(&self, index: usize) -> u64 {
        let contained = if self.separate {
            self.amount(index)
        } else {
            self.total_amount()
        };
        self.capacity.saturating_sub(contained)
    }

    /// Returns true if `kind` may be added to chamber `index`.
    #[must_use]
    pub fn can_accept(&self, index: usize, kind: FluidKind) -> bool {
        match self.chambers.get(index) {
            None => false,
            Some(chamber) => match chamber.kind() {
                None => self.policy.is_fluid_valid_for_stack(index, kind),
                Some(held) => held == kind,
            },
        }
    }

    /// Returns true if chamber `index` holds `kind` that could be drained.
    #[must_use]
    pub fn can_drain(&self, index: usize, kind: FluidKind) -> bool {
        self.chambers
            .get(index)
            .is_some_and(|chamber| chamber.holds(kind))
    }

    /// Offers `incoming` to chamber `index` and returns how much it takes.
    ///
    /// Takes nothing if the index is out of range, the stack is empty or the
    /// chamber cannot accept the fluid. Otherwise takes as much as fits.
    pub fn fill(&mut self, index: usize, incoming: FluidStack, commit: bool) -> u64 {
        if incoming.is_empty() || !self.can_accept(index, incoming.kind) {
            return 0;
        }

        let accepted = incoming.amount.min(self.remaining_space(index));
        if accepted == 0 || !commit {
            return accepted;
        }

        self.chambers[index].grow(incoming.kind, accepted);
        accepted
    }

    /// Tops up chamber `index` with more of the fluid it already holds.
    ///
    /// An empty chamber has no fluid to top up, which means the caller lost
    /// track of the chamber's contents; that is reported as an error.
    pub fn fill_amount(&mut self, index: usize, amount: u64) -> Result<u64, ChamberError> {
        let Some(chamber) = self.chambers.get(index) else {
            return Ok(0);
        };
        let Some(kind) = chamber.kind() else {
            return Err(ChamberError::KindlessFill { index });
        };

        let accepted = amount.min(self.remaining_space(index));
        self.chambers[index].grow(kind, accepted);
        Ok(accepted)
    }

    /// Drains up to `amount` of `kind` from chamber `index`.
    ///
    /// Returns `None` if the chamber is out of range, empty, holds another
    /// fluid, or `amount` is zero.
    pub fn drain(
        &mut self,
        index: usize,
        kind: FluidKind,
        amount: u64,
        commit: bool,
    ) -> Option<FluidStack> {
        if !self.can_drain(index, kind) {
            return None;
        }
        self.drain_any(index, amount, commit)
    }

    /// Drains up to `amount` from chamber `index` whatever it holds.
    pub fn drain_any(&mut self, index: usize, amount: u64, commit: bool) -> Option<FluidStack> {
        if amount == 0 {
            return None;
        }
        let chamber = self.chambers.get_mut(index)?;
        let held = chamber.contents()?;

        let removed = if commit {
            chamber.shrink(amount)
        } else {
            amount.min(held.amount)
        };
        Some(held.with_amount(removed))
    }

    /// Empties every chamber.
    pub fn clear(&mut self) {
        for chamber in &mut self.chambers {
            chamber.clear();
        }
    }

    /// Replaces the contents of chamber `index` without any checks except
    /// that a zero amount leaves it empty.
    ///
    /// Used when loading persisted state. Out-of-range indices are ignored.
    pub fn set_chamber(&mut self, index: usize, contents: Option<FluidStack>) {
        if let Some(chamber) = self.chambers.get_mut(index) {
            *chamber = Chamber::from(contents);
        }
    }

    /// Restores the capacity invariant.
    ///
    /// Separate chambers are each capped at the capacity. Pooled chambers
    /// shed the overflow following the clamp priority, emptying one chamber
    /// completely before touching the next.
    pub fn clamp_to_capacity(&mut self) {
        if self.separate {
            for chamber in &mut self.chambers {
                chamber.cap(self.capacity);
            }
            return;
        }

        let mut excess = self.total_amount().saturating_sub(self.capacity);
        if excess == 0 {
            return;
        }

        for index in self.clamp_priority.drain_order(self.chambers.len()) {
            if excess == 0 {
                break;
            }
            let removed = self.chambers[index].shrink(excess);
            if removed > 0 {
                log::debug!("Clamped {removed} from chamber {index} to fit capacity {}", self.capacity);
            }
            excess -= removed;
        }
    }

    /// Folds another store of the same layout into this one.
    ///
    /// The larger store wins outright: if `other` has more capacity, this
    /// store takes its capacity and all of its contents. Stores with a
    /// different chamber count are left alone.
    pub fn merge(&mut self, other: ChamberStore) {
        if other.chambers.len() != self.chambers.len() {
            log::warn!(
                "Refusing to merge a {}-chamber store into a {}-chamber store",
                other.chambers.len(),
                self.chambers.len()
            );
            return;
        }
        if other.capacity > self.capacity {
            self.capacity = other.capacity;
            self.chambers = other.chambers;
        }
    }
}

impl fmt::Debug for ChamberStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChamberStore")
            .field("chambers", &self.chambers)
            .field("capacity", &self.capacity)
            .field("separate", &self.separate)
            .field("clamp_priority", &self.clamp_priority)
            .finish_non_exhaustive()
    }
}
