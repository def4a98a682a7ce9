//! Normal ordering of fermionic operator strings by Wick's theorem.
//!
//! A [`Term`] is a signed product of creation/annihilation operators together
//! with the Kronecker deltas produced by contractions and some opaque tensor
//! and amplitude labels. [`Term::normal_order`] expands one term into a list of
//! normal-ordered terms, [`alphabetize`] brings every term into a fixed
//! operator order and [`cleanup`] removes pairs of terms that cancel.
//!
//! [`Expansion`] bundles these steps behind the surface a driver needs.

use serde::{
    Deserialize,
    Serialize,
};

mod canon;
mod cleanup;
mod error;
mod expansion;
mod filter;
mod order;
mod term;


pub use canon::alphabetize;
pub use cleanup::cleanup;
pub use error::TermError;
pub use expansion::{
    Expansion,
    Projection,
    Settings,
};
pub use term::{
    Delta,
    Sign,
    Symbol,
    Term,
};

/// Spin carried by the second character of an index label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum Spin {
    #[default]
    Alpha,
    Beta,
}

impl Spin {
    pub fn is_alpha(&self) -> bool {
        *self == Self::Alpha
    }

    pub fn flip(self) -> Self {
        use Spin::*;
        match self {
            Alpha => Beta,
            Beta => Alpha,
        }
    }

    /// Spin of an index label such as `"iA"` or `"bB"`.
    ///
    /// Labels without a second character, or whose second character is
    /// neither `'A'` nor `'B'`, carry no spin.
    pub fn of(label: &str) -> Option<Self> {
        match label.chars().nth(1)? {
            'A' => Some(Spin::Alpha),
            'B' => Some(Spin::Beta),
            _ => None,
        }
    }
}

impl From<Spin> for char {
    fn from(value: Spin) -> Self {
        match value {
            Spin::Alpha => 'A',
            Spin::Beta => 'B',
        }
    }
}

/// Orbital space of an index label.
///
/// Occupied indices are `I..N`, virtual indices are `A..F`, case-insensitive.
/// General indices (`P`, `Q`, ...) belong to neither.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum Class {
    Occupied,
    Virtual,
}

impl Class {
    pub fn is_occupied(&self) -> bool {
        *self == Self::Occupied
    }

    pub fn of(label: &str) -> Option<Self> {
        match label.chars().next()?.to_ascii_uppercase() {
            'I'..='N' => Some(Class::Occupied),
            'A'..='F' => Some(Class::Virtual),
            _ => None,
        }
    }
}

/// Hermitian adjoint.
pub trait Conj {
    fn conj(self) -> Self;
}
