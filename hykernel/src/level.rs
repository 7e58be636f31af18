//! Universe levels.
use std::sync::Arc;

use strum::EnumIs;

use crate::name::Name;

/// A universe level expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIs)]
pub enum Level {
    Zero,
    Succ(Arc<Level>),
    Max(Arc<Level>, Arc<Level>),
    /// Universe parameter of the enclosing declaration
    Param(Name),
}

impl Level {
    pub fn one() -> Self {
        Level::Zero.succ()
    }

    pub fn succ(self) -> Self {
        Level::Succ(Arc::new(self))
    }

    pub fn max(self, other: Level) -> Self {
        Level::Max(Arc::new(self), Arc::new(other))
    }

    pub fn param<N: Into<Name>>(name: N) -> Self {
        Level::Param(name.into())
    }

    /// Returns `Some(n)` when the level is the closed numeral `n`.
    pub fn to_numeral(&self) -> Option<u32> {
        match self {
            Level::Zero => Some(0),
            Level::Succ(l) => l.to_numeral().map(|n| n + 1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(n) = self.to_numeral() {
            return write!(f, "{}", n);
        }
        match self {
            Level::Succ(l) => write!(f, "{}+1", l),
            Level::Max(a, b) => write!(f, "max({}, {})", a, b),
            Level::Param(n) => write!(f, "{}", n),
            Level::Zero => unreachable!("zero is a numeral"),
        }
    }
}
