//! Dynamic quantities and point resolution.
//!
//! Some transforms are parameterised by other model variables (the impact
//! parameter bound depends on the radius ratio `ror`). Such a parameter is
//! stored as a [`Quantity::Var`] at construction time and its concrete value
//! is looked up in a [`Point`] every time the transform is evaluated.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Identity of a model variable whose value is resolved per posterior draw.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarId(String);

impl VarId {
    /// Create a variable identity from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Variable name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VarId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for VarId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A transform construction parameter.
///
/// Serialises untagged: a JSON number is [`Quantity::Fixed`], a JSON string
/// is [`Quantity::Var`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Known at construction time.
    Fixed(f64),
    /// Value of another model variable at the current point.
    Var(VarId),
}

impl Quantity {
    /// Reference another model variable.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(VarId::new(name))
    }

    /// The fixed value, if this quantity does not depend on the point.
    pub fn as_fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(*v),
            Self::Var(_) => None,
        }
    }

    /// Resolve to a concrete value at `point`.
    pub fn resolve<S, P>(&self, point: &P) -> Result<S>
    where
        S: From<f64>,
        P: Point<S> + ?Sized,
    {
        match self {
            Self::Fixed(v) => Ok(S::from(*v)),
            Self::Var(id) => point.get(id).ok_or_else(|| Error::Unresolved(id.to_string())),
        }
    }
}

impl From<f64> for Quantity {
    fn from(v: f64) -> Self {
        Self::Fixed(v)
    }
}

impl From<&str> for Quantity {
    fn from(name: &str) -> Self {
        Self::var(name)
    }
}

impl From<VarId> for Quantity {
    fn from(id: VarId) -> Self {
        Self::Var(id)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Var(id) => write!(f, "{id}"),
        }
    }
}

/// Values of model variables at one posterior draw.
///
/// `S` is the scalar type of the evaluation: `f64` on the numeric path, or a
/// differentiable scalar when a host graph supplies tracked values.
pub trait Point<S> {
    /// Value of `id` at this point, if known.
    fn get(&self, id: &VarId) -> Option<S>;
}

/// Resolver with no variables; use for transforms without dynamic parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPoint;

impl<S> Point<S> for NoPoint {
    #[inline]
    fn get(&self, _id: &VarId) -> Option<S> {
        None
    }
}

impl<S: Copy> Point<S> for HashMap<VarId, S> {
    fn get(&self, id: &VarId) -> Option<S> {
        HashMap::get(self, id).copied()
    }
}

impl<S: Copy> Point<S> for BTreeMap<VarId, S> {
    fn get(&self, id: &VarId) -> Option<S> {
        BTreeMap::get(self, id).copied()
    }
}

impl<S: Copy> Point<S> for HashMap<String, S> {
    fn get(&self, id: &VarId) -> Option<S> {
        HashMap::get(self, id.as_str()).copied()
    }
}

impl<S, F> Point<S> for F
where
    F: Fn(&VarId) -> Option<S>,
{
    fn get(&self, id: &VarId) -> Option<S> {
        self(id)
    }
}
