//! Chambers and the store that owns them.

mod clamp;
mod policy;
mod store;

pub use clamp::ClampPriority;
pub use policy::{AcceptAll, ChamberPolicy};
pub use store::ChamberStore;

use reactant_registry::FluidKind;

/// A quantity of a single fluid.
///
/// Used both for chamber contents and for fill/drain requests. A request may
/// carry a zero amount; a chamber never stores one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FluidStack {
    /// The fluid.
    pub kind: FluidKind,
    /// Amount in mB.
    pub amount: u64,
}

impl FluidStack {
    /// Creates a stack of `amount` mB of `kind`.
    #[must_use]
    pub const fn new(kind: FluidKind, amount: u64) -> Self {
        Self { kind, amount }
    }

    /// Returns a copy of this stack with a different amount.
    #[must_use]
    pub const fn with_amount(self, amount: u64) -> Self {
        Self {
            kind: self.kind,
            amount,
        }
    }

    /// Returns true if the stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// One slot of a [`ChamberStore`].
///
/// Holds at most one fluid. The amount is always positive while a fluid is
/// present; draining to zero leaves the chamber empty and forgets the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chamber {
    contents: Option<FluidStack>,
}

impl Chamber {
    /// An empty chamber.
    pub const EMPTY: Chamber = Chamber { contents: None };

    /// Creates a chamber holding `stack`, or an empty one if the stack is empty.
    #[must_use]
    pub const fn of(stack: FluidStack) -> Self {
        if stack.is_empty() {
            Self::EMPTY
        } else {
            Self {
                contents: Some(stack),
            }
        }
    }

    /// Returns true if the chamber holds no fluid.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    /// What the chamber holds, if anything.
    #[must_use]
    pub const fn contents(&self) -> Option<FluidStack> {
        self.contents
    }

    /// The fluid held, if any.
    #[must_use]
    pub fn kind(&self) -> Option<FluidKind> {
        self.contents.map(|stack| stack.kind)
    }

    /// Amount held; 0 when empty.
    #[must_use]
    pub fn amount(&self) -> u64 {
        self.contents.map_or(0, |stack| stack.amount)
    }

    /// Returns true if the chamber currently holds `kind`.
    #[must_use]
    pub fn holds(&self, kind: FluidKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Adds `amount` of `kind`. The caller has already checked compatibility.
    pub(crate) fn grow(&mut self, kind: FluidKind, amount: u64) {
        if amount == 0 {
            return;
        }
        match &mut self.contents {
            Some(stack) => stack.amount += amount,
            None => self.contents = Some(FluidStack::new(kind, amount)),
        }
    }

    /// Removes up to `amount` and returns how much was actually removed.
    pub(crate) fn shrink(&mut self, amount: u64) -> u64 {
        let Some(stack) = &mut self.contents else {
            return 0;
        };
        if stack.amount <= amount {
            let removed = stack.amount;
            self.contents = None;
            removed
        } else {
            stack.amount -= amount;
            amount
        }
    }

    /// Caps the stored amount at `limit`.
    pub(crate) fn cap(&mut self, limit: u64) {
        let amount = self.amount();
        if amount > limit {
            self.shrink(amount - limit);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.contents = None;
    }
}

impl From<Option<FluidStack>> for Chamber {
    fn from(contents: Option<FluidStack>) -> Self {
        contents.map_or(Self::EMPTY, Self::of)
    }
}
