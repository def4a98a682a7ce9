//! Symmetry filters. Both only ever kill a term, never revive it, and both
//! pass over labels they cannot classify.

use num::Float;

use crate::{
    Class,
    Spin,
    Term,
};

/// Both labels carry a spin and the spins differ.
pub(crate) fn opposite_spins(
    left: &str,
    right: &str,
) -> bool {
    matches!(
        (Spin::of(left), Spin::of(right)),
        (Some(a), Some(b)) if a.is_alpha() != b.is_alpha()
    )
}

/// Both labels are classified and lie in different orbital spaces.
pub(crate) fn opposite_classes(
    left: &str,
    right: &str,
) -> bool {
    matches!(
        (Class::of(left), Class::of(right)),
        (Some(a), Some(b)) if a.is_occupied() != b.is_occupied()
    )
}

impl<T> Term<T>
where
    T: Float,
{
    /// Kill the term if a delta ties an occupied index to a virtual one.
    pub fn check_occ_vir(&mut self) {
        if self
            .deltas
            .iter()
            .any(|delta| opposite_classes(&delta.0, &delta.1))
        {
            self.skip = true;
        }
    }

    /// Kill the term if a delta, or a bra/ket pair of the tensor, ties an
    /// alpha index to a beta one.
    pub fn check_spin(&mut self) {
        if self
            .deltas
            .iter()
            .any(|delta| opposite_spins(&delta.0, &delta.1))
        {
            self.skip = true;
            return;
        }

        let tensor = match self.tensor.as_slice() {
            [p, q] => opposite_spins(p, q),
            [p, q, r, s] => opposite_spins(p, q) || opposite_spins(r, s),
            _ => false,
        };
        if tensor {
            self.skip = true;
        }
    }
}
