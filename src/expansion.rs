use std::fmt;

use log::debug;
use num::Float;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    alphabetize,
    cleanup,
    Conj,
    Symbol,
    Term,
};

/// Excitation level of a bra or ket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Vacuum,
    Singles,
    Doubles,
}

impl Projection {
    /// Operators acting on the vacuum ket: `e* m` or `e* f* n m`.
    pub fn ket(self) -> Vec<Symbol> {
        match self {
            Projection::Vacuum => Vec::new(),
            Projection::Singles => vec![Symbol::create("e"), Symbol::annihilate("m")],
            Projection::Doubles => vec![
                Symbol::create("e"),
                Symbol::create("f"),
                Symbol::annihilate("n"),
                Symbol::annihilate("m"),
            ],
        }
    }

    /// Adjoint of [`Projection::ket`], acting on the vacuum bra.
    pub fn bra(self) -> Vec<Symbol> {
        self.ket().into_iter().rev().map(Conj::conj).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bra:            Projection,
    pub ket:            Projection,
    pub occ_vir_filter: bool,
    pub spin_filter:    bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bra:            Projection::Vacuum,
            ket:            Projection::Vacuum,
            occ_vir_filter: true,
            spin_filter:    true,
        }
    }
}

/// Running list of normal-ordered terms.
#[derive(Debug, Clone)]
pub struct Expansion<T = f64> {
    settings: Settings,
    ordered:  Vec<Term<T>>,
}

impl<T> Default for Expansion<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Expansion<T>
where
    T: Float,
{
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ordered: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sandwich `term` between the bra and ket strings and append its
    /// normal-ordered expansion.
    pub fn add(
        &mut self,
        term: &Term<T>,
    ) {
        let mut product = term.clone();
        product.symbols = self.settings.bra.bra();
        product.symbols.extend_from_slice(&term.symbols);
        product.symbols.extend(self.settings.ket.ket());

        let before = self.ordered.len();
        product.normal_order(&mut self.ordered);
        debug!(
            "normal ordering {} operators gave {} terms",
            product.symbols.len(),
            self.ordered.len() - before
        );
    }

    /// Apply the enabled filters, alphabetize and cancel.
    pub fn simplify(&mut self) {
        let alive = self.live();
        for term in self.ordered.iter_mut() {
            if self.settings.occ_vir_filter {
                term.check_occ_vir();
            }
            if self.settings.spin_filter {
                term.check_spin();
            }
        }
        let filtered = self.live();

        alphabetize(&mut self.ordered);
        cleanup(&mut self.ordered);
        debug!(
            "simplify: {alive} terms, {} removed by symmetry, {} cancelled",
            alive - filtered,
            filtered - self.live()
        );
    }

    fn live(&self) -> usize {
        self.terms().count()
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term<T>> {
        self.ordered.iter().filter(|term| !term.skip)
    }

    pub fn fully_contracted(&self) -> impl Iterator<Item = &Term<T>> {
        self.rank(0)
    }

    pub fn one_body(&self) -> impl Iterator<Item = &Term<T>> {
        self.rank(2)
    }

    pub fn two_body(&self) -> impl Iterator<Item = &Term<T>> {
        self.rank(4)
    }

    fn rank(
        &self,
        operators: usize,
    ) -> impl Iterator<Item = &Term<T>> {
        self.terms()
            .filter(move |term| term.symbols.len() == operators)
    }

    pub fn clear(&mut self) {
        self.ordered.clear();
    }

    pub fn into_terms(self) -> Vec<Term<T>> {
        self.ordered.into_iter().filter(|term| !term.skip).collect()
    }
}

impl<T> Expansion<T>
where
    T: Float + fmt::Display,
{
    pub fn fully_contracted_strings(&self) -> Vec<Vec<String>> {
        self.fully_contracted().map(Term::tokens).collect()
    }
}

impl<T> fmt::Display for Expansion<T>
where
    T: Float + fmt::Display,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for term in self.terms() {
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
