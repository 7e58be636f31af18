//! Local contexts: the binders a target type lives under.
use std::sync::Arc;

use hykernel::{expr::Expr, name::Name};

/// A local binder `(name : ty)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub name: Name,
    pub ty: Expr,
}

/// Ordered telescope of local binders, outermost first.
///
/// Terms under the context refer to entry `i` (0-based, outermost first) through the de
/// Bruijn index `len - 1 - i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: Arc<[ContextEntry]>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new context with `(name : ty)` as innermost binder.
    pub fn extend<N: Into<Name>>(&self, name: N, ty: Expr) -> Self {
        let mut entries = self.entries.to_vec();
        entries.push(ContextEntry {
            name: name.into(),
            ty,
        });
        Self {
            entries: entries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ContextEntry> {
        self.entries.iter()
    }
}

impl<N: Into<Name>> FromIterator<(N, Expr)> for Context {
    fn from_iter<I: IntoIterator<Item = (N, Expr)>>(iter: I) -> Self {
        let entries: Vec<ContextEntry> = iter
            .into_iter()
            .map(|(name, ty)| ContextEntry {
                name: name.into(),
                ty,
            })
            .collect();
        Self {
            entries: entries.into(),
        }
    }
}
