//! Persistent store of global declarations.
use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::declaration::{Declaration, uses_meta};
use crate::error::{KernelError, KernelResult};
use crate::name::Name;

/// Immutable map from names to declarations.
///
/// Extending an environment returns a new one; existing handles are never affected.
/// Cloning is O(1).
#[derive(Debug, Clone, Default)]
pub struct Environment {
    declarations: Arc<BTreeMap<Name, Declaration>>,
}

impl Environment {
    /// Creates a new, empty [`Environment`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &Name) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Like [`Environment::find`] but fails on unknown names.
    pub fn get(&self, name: &Name) -> KernelResult<&Declaration> {
        self.find(name)
            .ok_or_else(|| KernelError::UnknownDeclaration(name.clone()))
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.declarations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Returns an iterator over all declarations, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Both handles share the same underlying store.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.declarations, &other.declarations)
    }

    /// Returns a new environment extended with `decl`.
    ///
    /// Rejects duplicated names, and non-meta declarations whose type or value use meta
    /// declarations.
    pub fn add(&self, decl: Declaration) -> KernelResult<Environment> {
        if self.contains(decl.name()) {
            return Err(KernelError::AlreadyDeclared(decl.name().clone()));
        }

        if !decl.is_meta()
            && (uses_meta(self, decl.ty()) || decl.try_value().is_some_and(|v| uses_meta(self, v)))
        {
            return Err(KernelError::MetaDependency {
                name: decl.name().clone(),
            });
        }

        debug!(
            "adding {} `{}` (hints: {:?}, meta: {})",
            decl.kind(),
            decl.name(),
            decl.hints(),
            decl.is_meta()
        );

        let mut declarations = (*self.declarations).clone();
        declarations.insert(decl.name().clone(), decl);
        Ok(Environment {
            declarations: Arc::new(declarations),
        })
    }
}
