use reactant_registry::FluidKind;

/// Decides which fluids an empty chamber may take.
///
/// Supplied by the concrete device. A reactor, for example, only lets fuel
/// into its first chamber and only waste into its second. Non-empty chambers
/// ignore the policy and accept more of whatever they already hold.
pub trait ChamberPolicy: Send + Sync {
    /// Returns true if `kind` may be put into the empty chamber at `index`.
    fn is_fluid_valid_for_stack(&self, index: usize, kind: FluidKind) -> bool;
}

impl<F> ChamberPolicy for F
where
    F: Fn(usize, FluidKind) -> bool + Send + Sync,
{
    fn is_fluid_valid_for_stack(&self, index: usize, kind: FluidKind) -> bool {
        self(index, kind)
    }
}

/// Lets any fluid into any chamber.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ChamberPolicy for AcceptAll {
    fn is_fluid_valid_for_stack(&self, _index: usize, _kind: FluidKind) -> bool {
        true
    }
}
