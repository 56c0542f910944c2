use super::ReactionRule;
use crate::FluidKind;
use rustc_hash::FxHashMap;

/// Source reactant to reaction data. The last registration for a source wins.
#[derive(Debug, Default)]
pub struct ReactionRegistry {
    reactions: FxHashMap<FluidKind, ReactionRule>,
}

impl ReactionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the stock fuel reactions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(FluidKind::YELLORIUM, FluidKind::CYANITE);
        registry.register(FluidKind::BLUTONIUM, FluidKind::CYANITE);
        registry
    }

    /// Registers a plain mapping with default coefficients.
    pub fn register(&mut self, source: FluidKind, product: FluidKind) {
        self.insert(ReactionRule::new(source, product));
    }

    /// Registers a mapping with explicit coefficients.
    pub fn register_with(
        &mut self,
        source: FluidKind,
        product: FluidKind,
        reactivity: f32,
        fission_rate: f32,
    ) {
        self.insert(ReactionRule::with_coefficients(
            source,
            product,
            reactivity,
            fission_rate,
        ));
    }

    fn insert(&mut self, rule: ReactionRule) {
        if let Some(previous) = self.reactions.insert(rule.source, rule) {
            log::warn!(
                "Overwriting {} => {} reaction mapping with {} => {}",
                previous.source,
                previous.product,
                rule.source,
                rule.product
            );
        }
    }

    /// Looks up the reaction consuming `source`.
    #[must_use]
    pub fn lookup(&self, source: FluidKind) -> Option<&ReactionRule> {
        self.reactions.get(&source)
    }

    /// Iterates over every registered reaction in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ReactionRule> {
        self.reactions.values()
    }

    /// Returns true if `kind` is consumed by some reaction.
    #[must_use]
    pub fn is_reactant(&self, kind: FluidKind) -> bool {
        self.reactions.contains_key(&kind)
    }

    /// Returns true if `kind` is produced by some reaction.
    #[must_use]
    pub fn is_product(&self, kind: FluidKind) -> bool {
        self.reactions.values().any(|rule| rule.product == kind)
    }
}
