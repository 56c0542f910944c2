//! NBT persistence for [`FluidTanks`].
//!
//! Each non-empty chamber is written under its tank name as
//! `{ FluidName: "<fluid>", Amount: <long> }`. Empty chambers are left out.
//! NBT has no unsigned long, so `Amount` carries the raw bits of the `u64`.

use reactant_registry::FluidRegistry;
use simdnbt::owned::{NbtCompound, NbtTag};

use crate::ChamberError;
use crate::chamber::FluidStack;
use crate::tanks::FluidTanks;

/// Key holding the registered fluid name.
pub const FLUID_NAME_KEY: &str = "FluidName";
/// Key holding the amount in mB.
pub const AMOUNT_KEY: &str = "Amount";

fn stack_to_nbt(stack: FluidStack, fluid_name: &str) -> NbtCompound {
    let mut nbt = NbtCompound::new();
    nbt.insert(FLUID_NAME_KEY, NbtTag::String(fluid_name.into()));
    nbt.insert(AMOUNT_KEY, NbtTag::Long(stack.amount.cast_signed()));
    nbt
}

fn nbt_amount(tag: &NbtTag) -> Option<u64> {
    let amount = match tag {
        NbtTag::Int(i) => u64::try_from(*i).ok()?,
        NbtTag::Long(l) => l.cast_unsigned(),
        _ => return None,
    };
    Some(amount).filter(|amount| *amount > 0)
}

fn stack_from_nbt(nbt: &NbtCompound, fluids: &FluidRegistry) -> Option<FluidStack> {
    let name = match nbt.get(FLUID_NAME_KEY)? {
        NbtTag::String(s) => s.to_str(),
        _ => return None,
    };
    let Some(kind) = fluids.by_name(&name) else {
        log::warn!("Dropping unknown fluid `{name}` from saved tanks");
        return None;
    };
    let Some(amount) = nbt.get(AMOUNT_KEY).and_then(nbt_amount) else {
        log::warn!("Dropping `{name}` with a missing or non-positive amount from saved tanks");
        return None;
    };
    Some(FluidStack::new(kind, amount))
}

impl FluidTanks {
    /// Serializes every non-empty chamber under its tank name.
    ///
    /// Chambers holding a fluid the registry does not know are skipped.
    pub fn write_snapshot(&self, fluids: &FluidRegistry) -> Result<NbtCompound, ChamberError> {
        self.check_tank_names()?;

        let mut nbt = NbtCompound::new();
        for (chamber, tank_name) in self.store.chambers().iter().zip(self.tank_names) {
            let Some(stack) = chamber.contents() else {
                continue;
            };
            let Some(fluid_name) = fluids.name_of(stack.kind) else {
                log::warn!("Not saving unregistered fluid {} in tank `{tank_name}`", stack.kind);
                continue;
            };
            nbt.insert(*tank_name, NbtTag::Compound(stack_to_nbt(stack, fluid_name)));
        }
        Ok(nbt)
    }

    /// Restores chamber contents from a snapshot.
    ///
    /// Loaded amounts become the update baseline, so a freshly loaded device
    /// does not broadcast until something actually changes. Tanks missing
    /// from the record, or holding an entry that cannot be read, are emptied.
    /// A record holding more than this store's capacity is clamped to fit.
    pub fn read_snapshot(
        &mut self,
        nbt: &NbtCompound,
        fluids: &FluidRegistry,
    ) -> Result<(), ChamberError> {
        self.check_tank_names()?;

        for (index, tank_name) in self.tank_names.iter().enumerate() {
            let contents = match nbt.get(tank_name) {
                Some(NbtTag::Compound(entry)) => stack_from_nbt(entry, fluids),
                Some(_) => {
                    log::warn!("Tank `{tank_name}` is not a compound, loading it empty");
                    None
                }
                None => None,
            };
            self.store.set_chamber(index, contents);
        }

        let loaded = self.store.total_amount();
        self.store.clamp_to_capacity();
        if self.store.total_amount() < loaded {
            log::warn!(
                "Saved tanks held {loaded} mB, clamped to capacity {}",
                self.store.capacity()
            );
        }
        self.throttle.reset_last_seen(&self.store);

        log::debug!("Loaded tanks with {} mB total", self.store.total_amount());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reactant_registry::{FluidKind, ReactionRegistry};

    use super::*;
    use crate::chamber::{AcceptAll, Chamber, ChamberStore};
    use crate::devices::FuelTanks;
    use crate::update::{ConditionalUpdater, LastSeen};

    const NAMES: &[&str] = &["fuel", "waste"];

    fn tanks(names: &'static [&'static str]) -> FluidTanks {
        let mut store = ChamberStore::new(2, false, AcceptAll);
        store.set_capacity(1000);
        FluidTanks::new(store, names)
    }

    #[test]
    fn round_trip_restores_contents() {
        let fluids = FluidRegistry::with_builtins();
        let mut source = tanks(NAMES);
        source.fill(0, FluidStack::new(FluidKind::YELLORIUM, 640), true);

        let nbt = source.write_snapshot(&fluids).unwrap();
        let mut loaded = tanks(NAMES);
        loaded.fill(1, FluidStack::new(FluidKind::CYANITE, 12), true);
        loaded.read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!(loaded.store().chambers(), source.store().chambers());
        assert_eq!(
            loaded.throttle().last_seen(),
            &[LastSeen::Known(640), LastSeen::Known(0)]
        );
    }

    #[test]
    fn empty_chambers_are_omitted() {
        let fluids = FluidRegistry::with_builtins();
        let mut source = tanks(NAMES);
        source.fill(1, FluidStack::new(FluidKind::CYANITE, 7), true);

        let nbt = source.write_snapshot(&fluids).unwrap();

        assert!(nbt.get("fuel").is_none());
        let Some(NbtTag::Compound(waste)) = nbt.get("waste") else {
            panic!("waste tank missing from snapshot");
        };
        assert!(matches!(waste.get(AMOUNT_KEY), Some(NbtTag::Long(7))));
        assert!(
            matches!(waste.get(FLUID_NAME_KEY), Some(NbtTag::String(s)) if s.to_str() == "cyanite")
        );
    }

    #[test]
    fn loaded_state_does_not_force_a_broadcast() {
        let fluids = FluidRegistry::with_builtins();
        let mut source = tanks(NAMES);
        source.fill(0, FluidStack::new(FluidKind::YELLORIUM, 300), true);
        let nbt = source.write_snapshot(&fluids).unwrap();

        let mut loaded = tanks(NAMES);
        loaded.read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!((0..61).filter(|_| loaded.should_update()).count(), 0);
    }

    #[test]
    fn unreadable_entries_load_empty() {
        let fluids = FluidRegistry::with_builtins();
        let mut nbt = NbtCompound::new();
        let mut unknown = NbtCompound::new();
        unknown.insert(FLUID_NAME_KEY, NbtTag::String("ludicrite".into()));
        unknown.insert(AMOUNT_KEY, NbtTag::Long(10));
        nbt.insert("fuel", NbtTag::Compound(unknown));
        let mut negative = NbtCompound::new();
        negative.insert(FLUID_NAME_KEY, NbtTag::String("cyanite".into()));
        negative.insert(AMOUNT_KEY, NbtTag::Int(-4));
        nbt.insert("waste", NbtTag::Compound(negative));

        let mut loaded = tanks(NAMES);
        loaded.fill(0, FluidStack::new(FluidKind::YELLORIUM, 50), true);
        loaded.read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!(loaded.store().chambers(), &[Chamber::EMPTY, Chamber::EMPTY]);
    }

    #[test]
    fn oversized_record_is_clamped_on_load() {
        let fluids = FluidRegistry::with_builtins();
        let reactions = ReactionRegistry::with_builtins();
        let mut source = tanks(NAMES);
        source.fill(0, FluidStack::new(FluidKind::YELLORIUM, 80), true);
        source.fill(1, FluidStack::new(FluidKind::CYANITE, 80), true);
        let nbt = source.write_snapshot(&fluids).unwrap();

        let mut small = FuelTanks::new(&reactions, 100);
        small.tanks_mut().read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!((small.fuel_amount(), small.waste_amount()), (80, 20));
        assert_eq!(
            small.tanks().throttle().last_seen(),
            &[LastSeen::Known(80), LastSeen::Known(20)]
        );

        small.burn(10, &reactions);
        assert_eq!((small.fuel_amount(), small.waste_amount()), (70, 30));
        assert!(small.tanks().total_amount() <= 100);
    }

    #[test]
    fn amounts_beyond_i64_survive_a_round_trip() {
        let fluids = FluidRegistry::with_builtins();
        let huge = (1 << 63) + 5;
        let mut source = FluidTanks::new(ChamberStore::new(2, true, AcceptAll), NAMES);
        source.set_capacity(u64::MAX);
        source.fill(0, FluidStack::new(FluidKind::WATER, huge), true);

        let nbt = source.write_snapshot(&fluids).unwrap();
        let mut loaded = FluidTanks::new(ChamberStore::new(2, true, AcceptAll), NAMES);
        loaded.set_capacity(u64::MAX);
        loaded.read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!(loaded.amount(0), huge);
        assert_eq!(loaded.kind(0), Some(FluidKind::WATER));
    }

    #[test]
    fn int_amounts_are_accepted() {
        let fluids = FluidRegistry::with_builtins();
        let mut nbt = NbtCompound::new();
        let mut fuel = NbtCompound::new();
        fuel.insert(FLUID_NAME_KEY, NbtTag::String("blutonium".into()));
        fuel.insert(AMOUNT_KEY, NbtTag::Int(25));
        nbt.insert("fuel", NbtTag::Compound(fuel));

        let mut loaded = tanks(NAMES);
        loaded.read_snapshot(&nbt, &fluids).unwrap();

        assert_eq!(loaded.kind(0), Some(FluidKind::BLUTONIUM));
        assert_eq!(loaded.amount(0), 25);
    }

    #[test]
    fn name_count_must_match_chambers() {
        let fluids = FluidRegistry::with_builtins();
        let mut bad = tanks(&["fuel"]);
        let expected = ChamberError::TankNameMismatch {
            expected: 2,
            actual: 1,
        };

        assert_eq!(bad.write_snapshot(&fluids), Err(expected.clone()));
        assert_eq!(
            bad.read_snapshot(&NbtCompound::new(), &fluids),
            Err(expected)
        );
    }
}
