use smallvec::SmallVec;

/// The order in which a pooled store gives up contents when its capacity
/// shrinks below the amount it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClampPriority {
    /// Last chamber first. Suits layouts where later chambers hold byproducts,
    /// such as waste behind fuel.
    #[default]
    ReverseIndex,
    /// Chamber indices from first drained to last drained.
    ///
    /// Chambers left out are drained after the listed ones, last index first.
    /// Out-of-range and repeated indices are ignored.
    Explicit(Vec<usize>),
}

impl ClampPriority {
    /// Every index in `0..chamber_count` exactly once, in drain order.
    #[must_use]
    pub fn drain_order(&self, chamber_count: usize) -> SmallVec<[usize; 4]> {
        let mut order: SmallVec<[usize; 4]> = SmallVec::with_capacity(chamber_count);
        if let Self::Explicit(listed) = self {
            for &index in listed {
                if index < chamber_count && !order.contains(&index) {
                    order.push(index);
                }
            }
        }
        for index in (0..chamber_count).rev() {
            if !order.contains(&index) {
                order.push(index);
            }
        }
        order
    }
}
