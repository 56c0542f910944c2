//! The tick loop.

use std::time::Duration;

use reactant_core::devices::{CoolantTanks, FuelTanks};
use reactant_core::{ConditionalUpdater, FluidStack, FluidTanks};
use reactant_registry::{FluidKind, FluidRegistry, ReactionRegistry, RegistryExt};
use simdnbt::owned::NbtCompound;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::ReactorConfig;

/// How many unread updates an observer may fall behind by.
const UPDATE_BUFFER: usize = 64;

/// A snapshot sent to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct TankUpdate {
    /// Tick on which the update fired.
    pub tick: u64,
    /// Which part of the reactor changed: `"fuel"` or `"coolant"`.
    pub part: &'static str,
    /// The part's tanks, as written by [`FluidTanks::write_snapshot`].
    pub snapshot: NbtCompound,
}

/// A simulated reactor and the registries it runs on.
pub struct ReactorHost {
    config: ReactorConfig,
    fluids: FluidRegistry,
    reactions: ReactionRegistry,
    fuel: FuelTanks,
    coolant: CoolantTanks,
    updates: broadcast::Sender<TankUpdate>,
    tick: u64,
}

impl ReactorHost {
    /// Builds a reactor from `config`. The receiver gets every update the
    /// reactor publishes.
    #[must_use]
    pub fn new(config: ReactorConfig) -> (Self, broadcast::Receiver<TankUpdate>) {
        let mut fluids = FluidRegistry::with_builtins();
        fluids.freeze();
        let reactions = ReactionRegistry::with_builtins();
        let (updates, receiver) = broadcast::channel(UPDATE_BUFFER);

        let host = Self {
            fuel: FuelTanks::new(&reactions, config.fuel_capacity),
            coolant: CoolantTanks::new(config.coolant_capacity),
            config,
            fluids,
            reactions,
            updates,
            tick: 0,
        };
        (host, receiver)
    }

    /// Ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// The fuel and waste tanks.
    #[must_use]
    pub fn fuel(&self) -> &FuelTanks {
        &self.fuel
    }

    /// The coolant and vapor tanks.
    #[must_use]
    pub fn coolant(&self) -> &CoolantTanks {
        &self.coolant
    }

    /// The frozen fluid registry.
    #[must_use]
    pub fn fluids(&self) -> &FluidRegistry {
        &self.fluids
    }

    /// The reaction table fuel burns against.
    #[must_use]
    pub fn reactions(&self) -> &ReactionRegistry {
        &self.reactions
    }

    /// Advances the reactor by one tick and publishes any update that is due.
    pub fn tick(&mut self) {
        self.tick += 1;

        self.fuel.add_fuel(
            FluidStack::new(FluidKind::YELLORIUM, self.config.fuel_per_tick),
            true,
        );
        self.fuel.burn(self.config.burn_per_tick, &self.reactions);
        self.fuel
            .drain_waste(self.config.waste_drain_per_tick, true);

        self.coolant.add_coolant(self.config.coolant_per_tick, true);
        let boiled = self.coolant.vaporize(self.config.vaporize_per_tick);
        self.coolant.drain_vapor(boiled, true);

        if self.fuel.should_update() {
            self.publish("fuel", self.fuel.tanks());
        }
        if self.coolant.should_update() {
            self.publish("coolant", self.coolant.tanks());
        }
    }

    fn publish(&self, part: &'static str, tanks: &FluidTanks) {
        match tanks.write_snapshot(&self.fluids) {
            Ok(snapshot) => {
                // No subscribers is fine; the update is simply dropped.
                let _ = self.updates.send(TankUpdate {
                    tick: self.tick,
                    part,
                    snapshot,
                });
            }
            Err(err) => log::error!("Cannot snapshot {part} tanks: {err}"),
        }
    }

    /// Ticks until `cancel_token` fires or the configured tick limit is hit,
    /// then hands the reactor back.
    pub async fn run(mut self, cancel_token: CancellationToken) -> Self {
        let mut interval = time::interval(Duration::from_millis(self.config.tick_millis));
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            select! {
                biased;
                () = cancel_token.cancelled() => break,
                _ = interval.tick() => {
                    self.tick();
                    if self.config.max_ticks.is_some_and(|max| self.tick >= max) {
                        log::info!("Reached {} ticks, stopping", self.tick);
                        cancel_token.cancel();
                    }
                }
            }
        }
        self
    }

    /// Dumps both parts of the reactor.
    #[must_use]
    pub fn debug_info(&self) -> String {
        format!(
            "fuel\n{}coolant\n{}",
            self.fuel.tanks().debug_info(&self.fluids),
            self.coolant.tanks().debug_info(&self.fluids)
        )
    }
}

/// Logs every update until the reactor goes away.
pub async fn observe(mut updates: broadcast::Receiver<TankUpdate>) {
    loop {
        match updates.recv().await {
            Ok(update) => log::info!(
                "Tank update for {} on tick {}: {:?}",
                update.part,
                update.tick,
                update.snapshot
            ),
            Err(RecvError::Lagged(missed)) => {
                log::warn!("Observer fell behind, skipped {missed} updates");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
