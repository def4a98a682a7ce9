use std::fmt;

use num::Float;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    filter,
    Conj,
    TermError,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    pub fn is_plus(&self) -> bool {
        *self == Self::Plus
    }

    pub fn flip(self) -> Self {
        use Sign::*;
        match self {
            Plus => Minus,
            Minus => Plus,
        }
    }
}

impl From<Sign> for i8 {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl From<Sign> for char {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// A single creation (`dagger`) or annihilation operator.
#[derive(Debug, Clone, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub label:  String,
    pub dagger: bool,
}

impl Symbol {
    pub fn new(
        label: impl Into<String>,
        dagger: bool,
    ) -> Self {
        Self {
            label: label.into(),
            dagger,
        }
    }

    pub fn create(label: impl Into<String>) -> Self {
        Self::new(label, true)
    }

    pub fn annihilate(label: impl Into<String>) -> Self {
        Self::new(label, false)
    }

    /// First character of the label, used for alphabetical ordering.
    pub(crate) fn key(&self) -> Option<u8> {
        self.label.bytes().next()
    }
}

impl Conj for Symbol {
    fn conj(self) -> Self {
        Self {
            label:  self.label,
            dagger: !self.dagger,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if self.dagger {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Kronecker delta between two index labels.
#[derive(Debug, Clone, PartialEq, Hash, Eq, Serialize, Deserialize)]
pub struct Delta(pub String, pub String);

impl Delta {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self(left.into(), right.into())
    }

    pub fn contains(
        &self,
        label: &str,
    ) -> bool {
        self.0 == label || self.1 == label
    }

    /// The other side of the delta, if `label` is one of its sides.
    pub fn partner(
        &self,
        label: &str,
    ) -> Option<&str> {
        if self.0 == label {
            Some(&self.1)
        } else if self.1 == label {
            Some(&self.0)
        } else {
            None
        }
    }

    /// Equality up to orientation.
    pub fn matches(
        &self,
        other: &Self,
    ) -> bool {
        (self.0 == other.0 && self.1 == other.1)
            || (self.0 == other.1 && self.1 == other.0)
    }

    /// Orient the pair so that its first characters are ascending.
    pub fn canonical(self) -> Self {
        if self.1.bytes().next() < self.0.bytes().next() {
            Self(self.1, self.0)
        } else {
            self
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "d({}{})", self.0, self.1)
    }
}

/// Signed operator string with its contractions and opaque labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term<T = f64> {
    pub(crate) skip:       bool,
    pub(crate) sign:       Sign,
    pub(crate) factor:     T,
    pub(crate) symbols:    Vec<Symbol>,
    pub(crate) deltas:     Vec<Delta>,
    pub(crate) tensor:     Vec<String>,
    pub(crate) amplitudes: Vec<Vec<String>>,
}

impl<T> Default for Term<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Term<T>
where
    T: Float,
{
    pub fn new() -> Self {
        Self::with_factor(T::one())
    }

    pub fn with_factor(factor: T) -> Self {
        Self {
            skip: false,
            sign: Sign::Plus,
            factor,
            symbols: Vec::new(),
            deltas: Vec::new(),
            tensor: Vec::new(),
            amplitudes: Vec::new(),
        }
    }

    /// Copy everything except the operator string.
    ///
    /// A tensor or amplitude index that appears in one of the source deltas
    /// is replaced by the other side of that delta, and every delta touching
    /// such an index is consumed: it does not reach the copy. Consuming a
    /// delta between an occupied and a virtual index kills the copy.
    pub fn shallow_copy(source: &Self) -> Self {
        let substitute = |label: &String| {
            source
                .deltas
                .iter()
                .find_map(|delta| delta.partner(label))
                .unwrap_or(label.as_str())
                .to_owned()
        };

        let tensor = source.tensor.iter().map(substitute).collect();
        let amplitudes = source
            .amplitudes
            .iter()
            .map(|amp| amp.iter().map(substitute).collect())
            .collect();
        let (consumed, deltas): (Vec<_>, Vec<_>) = source
            .deltas
            .iter()
            .cloned()
            .partition(|delta| source.labels().any(|label| delta.contains(label)));
        let vanishes = consumed
            .iter()
            .any(|delta| filter::opposite_classes(&delta.0, &delta.1));

        Self {
            skip: source.skip || vanishes,
            sign: source.sign,
            factor: source.factor,
            symbols: Vec::new(),
            deltas,
            tensor,
            amplitudes,
        }
    }

    /// [`Term::shallow_copy`] followed by a verbatim copy of the operators.
    pub fn copy(source: &Self) -> Self {
        let mut term = Self::shallow_copy(source);
        term.symbols = source.symbols.clone();
        term
    }

    /// Tensor and amplitude labels, in storage order.
    fn labels(&self) -> impl Iterator<Item = &str> {
        self.tensor
            .iter()
            .chain(self.amplitudes.iter().flatten())
            .map(String::as_str)
    }

    pub fn push(
        &mut self,
        label: impl Into<String>,
        dagger: bool,
    ) -> Result<&mut Self, TermError> {
        let label = nonempty(label.into())?;
        self.symbols.push(Symbol::new(label, dagger));
        Ok(self)
    }

    pub fn create(
        &mut self,
        label: impl Into<String>,
    ) -> Result<&mut Self, TermError> {
        self.push(label, true)
    }

    pub fn annihilate(
        &mut self,
        label: impl Into<String>,
    ) -> Result<&mut Self, TermError> {
        self.push(label, false)
    }

    pub fn add_delta(
        &mut self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<&mut Self, TermError> {
        let delta = Delta(nonempty(left.into())?, nonempty(right.into())?);
        self.deltas.push(delta);
        Ok(self)
    }

    /// Replace the tensor labels: none, `h(pq)` or `(pq|rs)`.
    pub fn set_tensor<I, S>(
        &mut self,
        labels: I,
    ) -> Result<&mut Self, TermError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = collect_labels(labels)?;
        if !matches!(labels.len(), 0 | 2 | 4) {
            return Err(TermError::TensorRank(labels.len()));
        }
        self.tensor = labels;
        Ok(self)
    }

    /// Attach a `t1` or `t2` amplitude.
    pub fn add_amplitude<I, S>(
        &mut self,
        labels: I,
    ) -> Result<&mut Self, TermError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = collect_labels(labels)?;
        if !matches!(labels.len(), 2 | 4) {
            return Err(TermError::AmplitudeRank(labels.len()));
        }
        self.amplitudes.push(labels);
        Ok(self)
    }

    pub fn set_factor(
        &mut self,
        factor: T,
    ) -> &mut Self {
        self.factor = factor;
        self
    }

    pub fn set_sign(
        &mut self,
        sign: Sign,
    ) -> &mut Self {
        self.sign = sign;
        self
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn factor(&self) -> T {
        self.factor
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn tensor(&self) -> &[String] {
        &self.tensor
    }

    pub fn amplitudes(&self) -> &[Vec<String>] {
        &self.amplitudes
    }

    pub fn is_dead(&self) -> bool {
        self.skip
    }

    /// Mark the term as identically zero. There is no way back.
    pub fn kill(&mut self) {
        self.skip = true;
    }
}

impl<T> Term<T>
where
    T: Float + fmt::Display,
{
    /// Rendered pieces of the term: signed factor, operators, deltas,
    /// tensor and amplitudes.
    pub fn tokens(&self) -> Vec<String> {
        let sign = if self.sign.is_plus() { '+' } else { '-' };
        let mut tokens = vec![format!("{sign}{:7.5}", self.factor.abs())];
        tokens.extend(self.symbols.iter().map(Symbol::to_string));
        tokens.extend(self.deltas.iter().map(Delta::to_string));
        match self.tensor.as_slice() {
            [p, q] => tokens.push(format!("h({p}{q})")),
            [p, q, r, s] => tokens.push(format!("({p}{q}|{r}{s})")),
            _ => {}
        }
        for amp in &self.amplitudes {
            match amp.len() {
                2 => tokens.push(format!("t1({})", amp.concat())),
                4 => tokens.push(format!("t2({})", amp.concat())),
                _ => {}
            }
        }
        tokens
    }
}

impl<T> fmt::Display for Term<T>
where
    T: Float + fmt::Display,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.skip {
            return Ok(());
        }
        writeln!(f, "{}", self.tokens().join(" "))
    }
}

impl<T> Conj for Term<T> {
    fn conj(mut self) -> Self {
        self.symbols = self.symbols.into_iter().rev().map(Conj::conj).collect();
        self
    }
}

fn nonempty(label: String) -> Result<String, TermError> {
    if label.is_empty() {
        Err(TermError::EmptyLabel)
    } else {
        Ok(label)
    }
}

fn collect_labels<I, S>(labels: I) -> Result<Vec<String>, TermError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(|label| nonempty(label.into())).collect()
}
