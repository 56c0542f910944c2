use crate::FluidKind;

/// Reactivity used when a mapping is registered without coefficients.
pub const DEFAULT_REACTIVITY: f32 = 1.0;
/// Fission rate used when a mapping is registered without coefficients.
pub const DEFAULT_FISSION_RATE: f32 = 0.01;

/// How one reactant turns into its product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionRule {
    /// Fluid consumed.
    pub source: FluidKind,
    /// Fluid produced.
    pub product: FluidKind,
    /// Relative reactivity of the source.
    pub reactivity: f32,
    /// Fraction of the source that fissions per burn.
    pub fission_rate: f32,
}

impl ReactionRule {
    /// A plain source to product mapping with default coefficients.
    #[must_use]
    pub const fn new(source: FluidKind, product: FluidKind) -> Self {
        Self::with_coefficients(source, product, DEFAULT_REACTIVITY, DEFAULT_FISSION_RATE)
    }

    /// A mapping with explicit coefficients.
    #[must_use]
    pub const fn with_coefficients(
        source: FluidKind,
        product: FluidKind,
        reactivity: f32,
        fission_rate: f32,
    ) -> Self {
        Self {
            source,
            product,
            reactivity,
            fission_rate,
        }
    }
}
