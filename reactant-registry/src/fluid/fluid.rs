use std::fmt;

/// Opaque fluid identity.
///
/// Two stacks hold the same fluid exactly when their kinds compare equal; the
/// human readable name lives in the [`FluidRegistry`](super::FluidRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FluidKind(pub u16);

impl FluidKind {
    /// Returns the raw registry id.
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }
}

impl fmt::Display for FluidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidEntry {
    /// Identity token.
    pub kind: FluidKind,
    /// Unique name, used when persisting.
    pub name: &'static str,
}
