//! Change detection for observer updates.
//!
//! Hosts poll [`UpdateThrottle::should_update`] once per tick. It stays quiet
//! until [`MINIMUM_TICKS_BETWEEN_UPDATES`] ticks have gone by, then fires only
//! if the chambers moved by at least [`MINIMUM_DEVIANCE_FOR_UPDATE`] in total
//! since the last update, or if any chamber became empty or non-empty.

use crate::chamber::{Chamber, ChamberStore};

/// Ticks that must pass before the deviation is even looked at.
pub const MINIMUM_TICKS_BETWEEN_UPDATES: u32 = 60;
/// Combined absolute change, in mB, worth telling observers about.
pub const MINIMUM_DEVIANCE_FOR_UPDATE: u64 = 50;

/// Something that decides on its own when it is worth broadcasting.
pub trait ConditionalUpdater {
    /// Called once per tick. Returns true when observers should be updated.
    fn should_update(&mut self) -> bool;
}

/// The amount a chamber held when observers were last updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastSeen {
    /// Never captured. A non-empty chamber in this state always triggers.
    #[default]
    Unknown,
    /// The amount, in mB, observers were last told about.
    Known(u64),
}

impl LastSeen {
    fn capture(chamber: &Chamber) -> Self {
        Self::Known(chamber.amount())
    }
}

/// Per-chamber baselines plus the tick counter gating evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateThrottle {
    ticks_since_last_update: u32,
    last_seen: Vec<LastSeen>,
}

impl UpdateThrottle {
    /// Creates a throttle whose first eligible check fires for any chamber
    /// holding fluid.
    #[must_use]
    pub fn new(chamber_count: usize) -> Self {
        Self {
            ticks_since_last_update: 0,
            last_seen: vec![LastSeen::Unknown; chamber_count],
        }
    }

    /// Baselines in chamber order.
    #[must_use]
    pub fn last_seen(&self) -> &[LastSeen] {
        &self.last_seen
    }

    /// Ticks counted since the last evaluation.
    #[must_use]
    pub fn ticks_since_last_update(&self) -> u32 {
        self.ticks_since_last_update
    }

    /// Records one tick and reports whether an update is due.
    ///
    /// On a positive answer every chamber's baseline is refreshed, not only
    /// the chamber that tipped the decision.
    pub fn should_update(&mut self, store: &ChamberStore) -> bool {
        self.ticks_since_last_update += 1;
        if self.ticks_since_last_update <= MINIMUM_TICKS_BETWEEN_UPDATES {
            return false;
        }

        let triggered = self.has_deviated(store.chambers());
        if triggered {
            log::debug!(
                "Chamber levels changed after {} ticks, updating observers",
                self.ticks_since_last_update
            );
            self.reset_last_seen(store);
        }

        self.ticks_since_last_update = 0;
        triggered
    }

    fn has_deviated(&self, chambers: &[Chamber]) -> bool {
        let mut deviation: u64 = 0;
        for (chamber, last_seen) in chambers.iter().zip(&self.last_seen) {
            let amount = chamber.amount();
            match (chamber.is_empty(), *last_seen) {
                (true, LastSeen::Known(seen)) if seen > 0 => return true,
                (true, _) => {}
                (false, LastSeen::Unknown | LastSeen::Known(0)) => return true,
                (false, LastSeen::Known(seen)) => {
                    deviation += amount.abs_diff(seen);
                    if deviation >= MINIMUM_DEVIANCE_FOR_UPDATE {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Captures the current amounts as the new baseline.
    pub fn reset_last_seen(&mut self, store: &ChamberStore) {
        self.last_seen.clear();
        self.last_seen
            .extend(store.chambers().iter().map(LastSeen::capture));
    }

    /// Sets the baseline of a single chamber, as done when loading a snapshot.
    pub fn set_last_seen(&mut self, index: usize, last_seen: LastSeen) {
        if let Some(slot) = self.last_seen.get_mut(index) {
            *slot = last_seen;
        }
    }

    /// Forgets every baseline so the next eligible check fires for any chamber
    /// that holds fluid.
    pub fn force_update(&mut self) {
        self.last_seen.fill(LastSeen::Unknown);
    }
}

#[cfg(test)]
mod tests {
    use reactant_registry::FluidKind;

    use super::*;
    use crate::chamber::{AcceptAll, FluidStack};

    fn store() -> ChamberStore {
        let mut store = ChamberStore::new(2, true, AcceptAll);
        store.set_capacity(1000);
        store
    }

    fn fill(store: &mut ChamberStore, index: usize, amount: u64) {
        let kind = if index == 0 {
            FluidKind::WATER
        } else {
            FluidKind::STEAM
        };
        store.fill(index, FluidStack::new(kind, amount), true);
    }

    /// Runs the throttle through the interval gate without evaluating.
    fn wait_out_gate(throttle: &mut UpdateThrottle, store: &ChamberStore) {
        for _ in 0..MINIMUM_TICKS_BETWEEN_UPDATES {
            assert!(!throttle.should_update(store));
        }
    }

    #[test]
    fn never_fires_inside_the_gate() {
        let mut store = store();
        let mut throttle = UpdateThrottle::new(2);

        for tick in 0..MINIMUM_TICKS_BETWEEN_UPDATES {
            fill(&mut store, (tick % 2) as usize, 100);
            assert!(!throttle.should_update(&store));
        }
        assert!(throttle.should_update(&store));
    }

    #[test]
    fn unknown_baseline_fires_for_filled_chambers() {
        let mut store = store();
        fill(&mut store, 1, 1);
        let mut throttle = UpdateThrottle::new(2);

        wait_out_gate(&mut throttle, &store);
        assert!(throttle.should_update(&store));
        assert_eq!(
            throttle.last_seen(),
            &[LastSeen::Known(0), LastSeen::Known(1)]
        );
    }

    #[test]
    fn empty_store_with_unknown_baseline_stays_quiet() {
        let store = store();
        let mut throttle = UpdateThrottle::new(2);

        wait_out_gate(&mut throttle, &store);
        assert!(!throttle.should_update(&store));
        assert_eq!(throttle.ticks_since_last_update(), 0);
    }

    #[test]
    fn small_changes_are_suppressed() {
        let mut store = store();
        fill(&mut store, 0, 100);
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        fill(&mut store, 0, 49);
        wait_out_gate(&mut throttle, &store);
        assert!(!throttle.should_update(&store));
        assert_eq!(throttle.last_seen()[0], LastSeen::Known(100));
    }

    #[test]
    fn deviation_accumulates_across_chambers() {
        let mut store = store();
        fill(&mut store, 0, 100);
        fill(&mut store, 1, 100);
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        fill(&mut store, 0, 30);
        store.drain_any(1, 20, true);
        wait_out_gate(&mut throttle, &store);

        assert!(throttle.should_update(&store));
        assert_eq!(
            throttle.last_seen(),
            &[LastSeen::Known(130), LastSeen::Known(80)]
        );
    }

    #[test]
    fn emptying_a_chamber_always_fires() {
        let mut store = store();
        fill(&mut store, 0, 5);
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        store.drain_any(0, 5, true);
        wait_out_gate(&mut throttle, &store);
        assert!(throttle.should_update(&store));
    }

    #[test]
    fn filling_an_empty_chamber_always_fires() {
        let mut store = store();
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        fill(&mut store, 1, 3);
        wait_out_gate(&mut throttle, &store);
        assert!(throttle.should_update(&store));
    }

    #[test]
    fn counter_resets_even_without_trigger() {
        let mut store = store();
        fill(&mut store, 0, 100);
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        wait_out_gate(&mut throttle, &store);
        assert!(!throttle.should_update(&store));

        fill(&mut store, 0, 200);
        wait_out_gate(&mut throttle, &store);
        assert!(throttle.should_update(&store));
    }

    #[test]
    fn force_update_fires_on_next_eligible_tick() {
        let mut store = store();
        fill(&mut store, 0, 100);
        let mut throttle = UpdateThrottle::new(2);
        throttle.reset_last_seen(&store);

        throttle.force_update();
        wait_out_gate(&mut throttle, &store);
        assert!(throttle.should_update(&store));
    }
}
