use log::trace;
use num::Float;

use crate::{
    filter,
    Delta,
    Term,
};

/// Where a term stands with respect to normal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Normal,
    /// Position of the leftmost annihilator directly followed by a creator.
    Inversion(usize),
}

impl<T> Term<T>
where
    T: Float,
{
    fn order(&self) -> Order {
        self.symbols
            .windows(2)
            .position(|pair| !pair[0].dagger && pair[1].dagger)
            .map_or(Order::Normal, Order::Inversion)
    }

    /// No annihilation operator stands left of a creation operator.
    pub fn is_normal_order(&self) -> bool {
        self.order() == Order::Normal
    }

    /// Expand the term by Wick's theorem and append the normal-ordered
    /// results to `ordered`.
    ///
    /// Each inversion `a_p a_q^+` is replaced by `d(pq) - a_q^+ a_p`; both
    /// branches are expanded in turn until no inversion is left. Dead terms
    /// contribute nothing.
    pub fn normal_order(
        &self,
        ordered: &mut Vec<Self>,
    ) {
        if self.skip {
            return;
        }

        match self.order() {
            Order::Normal => {
                trace!("normal order reached with {} operators", self.symbols.len());
                ordered.push(Self::copy(self));
            }
            Order::Inversion(at) => {
                trace!("inversion at {at} of {}", self.symbols.len());
                let (contracted, swapped) = self.split(at);
                contracted.normal_order(ordered);
                swapped.normal_order(ordered);
            }
        }
    }

    /// Contraction and exchange branches of the inversion at `at`.
    fn split(
        &self,
        at: usize,
    ) -> (Self, Self) {
        let (left, right) = (&self.symbols[at], &self.symbols[at + 1]);

        let mut contracted = Self::shallow_copy(self);
        if filter::opposite_spins(&left.label, &right.label) {
            contracted.skip = true;
        }
        contracted
            .deltas
            .push(Delta::new(left.label.clone(), right.label.clone()));
        contracted.symbols.extend_from_slice(&self.symbols[..at]);
        contracted.symbols.extend_from_slice(&self.symbols[at + 2..]);

        let mut swapped = Self::shallow_copy(self);
        swapped.sign = swapped.sign.flip();
        swapped.symbols = self.symbols.clone();
        swapped.symbols.swap(at, at + 1);

        (contracted, swapped)
    }
}
