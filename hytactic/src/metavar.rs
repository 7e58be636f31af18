//! Metavariable environments and assignments.
use std::collections::BTreeMap;
use std::sync::Arc;

use hykernel::{
    expr::{Expr, ExprKind},
    name::Name,
};

use crate::{
    error::{TacticError, TacticResult},
    magic::METAVAR_PREFIX,
};

/// Persistent map from metavariable names to their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: Arc<BTreeMap<Name, Expr>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &Name) -> Option<&Expr> {
        self.values.get(name)
    }

    pub fn is_assigned(&self, name: &Name) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn with(&self, name: Name, value: Expr) -> Self {
        let mut values = (*self.values).clone();
        values.insert(name, value);
        Self {
            values: Arc::new(values),
        }
    }

    /// Replace assigned metavariables in `e`, following chains of assignments.
    pub fn instantiate(&self, e: &Expr) -> Expr {
        if self.values.is_empty() || !e.has_metavar() {
            return e.clone();
        }
        e.replace(&|s| match s.kind() {
            ExprKind::MetaVar(n) => self.get(n).map(|v| self.instantiate(v)),
            _ => None,
        })
    }
}

/// Declared metavariables, their types, and the current assignment.
#[derive(Debug, Clone, Default)]
pub struct MetavarEnv {
    next_id: u64,
    types: Arc<BTreeMap<Name, Expr>>,
    assignment: Assignment,
}

impl MetavarEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a fresh metavariable of type `ty`.
    ///
    /// Returns the extended environment and the metavariable term.
    pub fn mk_metavar(&self, ty: Expr) -> (MetavarEnv, Expr) {
        let name = Name::from(METAVAR_PREFIX).append_num(self.next_id);
        let mut types = (*self.types).clone();
        types.insert(name.clone(), ty);
        let menv = MetavarEnv {
            next_id: self.next_id + 1,
            types: Arc::new(types),
            assignment: self.assignment.clone(),
        };
        (menv, Expr::mvar(name))
    }

    pub fn type_of(&self, name: &Name) -> Option<&Expr> {
        self.types.get(name)
    }

    pub fn num_metavars(&self) -> usize {
        self.types.len()
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Assign `value` to the declared, unassigned metavariable `name`.
    ///
    /// Fails if `value` reaches `name` through the current assignment.
    pub fn assign(&self, name: &Name, value: Expr) -> TacticResult<MetavarEnv> {
        if !self.types.contains_key(name) {
            return Err(TacticError::UnknownMetavar(name.clone()));
        }
        if self.assignment.is_assigned(name) {
            return Err(TacticError::MetavarAlreadyAssigned(name.clone()));
        }
        // The current assignment is acyclic, so instantiating `value` terminates
        if occurs(name, &self.assignment.instantiate(&value)) {
            return Err(TacticError::CyclicAssignment { name: name.clone() });
        }
        Ok(MetavarEnv {
            next_id: self.next_id,
            types: self.types.clone(),
            assignment: self.assignment.with(name.clone(), value),
        })
    }
}

fn occurs(name: &Name, e: &Expr) -> bool {
    let mut stack: Vec<&Expr> = vec![e];
    while let Some(e) = stack.pop() {
        if matches!(e.kind(), ExprKind::MetaVar(n) if n == name) {
            return true;
        }
        stack.extend(e.children());
    }
    false
}
