//! Environment declarations: definitions, theorems, axioms and constant assumptions.
//!
//! A [`Declaration`] is an immutable record shared by reference counting. Its logical kind
//! is fully determined by whether it carries a value and by its theorem marker:
//!
//! | has value | theorem | kind                 |
//! |-----------|---------|----------------------|
//! | no        | yes     | axiom                |
//! | no        | no      | constant assumption  |
//! | yes       | no      | definition           |
//! | yes       | yes     | theorem              |
//!
//! Declarations are created through the factory functions on [`Declaration`] and never
//! mutated afterwards.
use std::collections::BTreeSet;
use std::sync::Arc;

use log::trace;
use strum::{Display, EnumIs};

use crate::environment::Environment;
use crate::error::{KernelError, KernelResult};
use crate::expr::Expr;
use crate::hints::ReducibilityHints;
use crate::name::Name;

/// Logical kind of a declaration, derived from (has value, is theorem).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeclarationKind {
    Axiom,
    ConstantAssumption,
    Definition,
    Theorem,
}

#[derive(Debug)]
struct DeclarationCell {
    name: Name,
    univ_params: Arc<[Name]>,
    ty: Expr,
    theorem: bool,
    /// `None` for postulates (axioms and constant assumptions)
    value: Option<Expr>,
    hints: ReducibilityHints,
    /// Definitions are non-meta by default; meta marks tactic-only definitions
    meta: bool,
}

/// Shared, immutable environment declaration.
#[derive(Debug, Clone)]
pub struct Declaration(Arc<DeclarationCell>);

impl Declaration {
    fn from_cell(cell: DeclarationCell) -> Self {
        Self(Arc::new(cell))
    }

    /// A definition with explicit hints and meta flag.
    pub fn definition<N: Into<Name>>(
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
        value: Expr,
        hints: ReducibilityHints,
        meta: bool,
    ) -> Self {
        Self::from_cell(DeclarationCell {
            name: name.into(),
            univ_params: univ_params.into(),
            ty,
            theorem: false,
            value: Some(value),
            hints,
            meta,
        })
    }

    /// A theorem. Theorems are always opaque and never meta.
    pub fn theorem<N: Into<Name>>(name: N, univ_params: Vec<Name>, ty: Expr, value: Expr) -> Self {
        Self::from_cell(DeclarationCell {
            name: name.into(),
            univ_params: univ_params.into(),
            ty,
            theorem: true,
            value: Some(value),
            hints: ReducibilityHints::Opaque,
            meta: false,
        })
    }

    /// An axiom: a postulate with the theorem marker set.
    pub fn axiom<N: Into<Name>>(name: N, univ_params: Vec<Name>, ty: Expr) -> Self {
        Self::from_cell(DeclarationCell {
            name: name.into(),
            univ_params: univ_params.into(),
            ty,
            theorem: true,
            value: None,
            hints: ReducibilityHints::Opaque,
            meta: false,
        })
    }

    /// A constant assumption: a postulate that is not an axiom.
    pub fn constant_assumption<N: Into<Name>>(
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
        meta: bool,
    ) -> Self {
        Self::from_cell(DeclarationCell {
            name: name.into(),
            univ_params: univ_params.into(),
            ty,
            theorem: false,
            value: None,
            hints: ReducibilityHints::Opaque,
            meta,
        })
    }

    /// Same as [`Declaration::definition`], with meta set iff `ty` or `value` use meta
    /// declarations of `env`.
    pub fn definition_inferring_meta<N: Into<Name>>(
        env: &Environment,
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
        value: Expr,
        hints: ReducibilityHints,
    ) -> Self {
        let meta = uses_meta(env, &ty) || uses_meta(env, &value);
        Self::definition(name, univ_params, ty, value, hints, meta)
    }

    /// Same as [`Declaration::constant_assumption`], with meta set iff `ty` uses meta
    /// declarations of `env`.
    pub fn constant_assumption_inferring_meta<N: Into<Name>>(
        env: &Environment,
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
    ) -> Self {
        let meta = uses_meta(env, &ty);
        Self::constant_assumption(name, univ_params, ty, meta)
    }

    /// A regular definition whose height is one more than the largest height among the
    /// regular definitions its value refers to, capped at `u32::MAX`.
    pub fn definition_with_height<N: Into<Name>>(
        env: &Environment,
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
        value: Expr,
        meta: bool,
    ) -> Self {
        let hints = ReducibilityHints::Regular(max_height(env, &value).saturating_add(1));
        Self::definition(name, univ_params, ty, value, hints, meta)
    }

    /// [`Declaration::definition_with_height`] with the meta flag inferred.
    pub fn definition_with_height_inferring_meta<N: Into<Name>>(
        env: &Environment,
        name: N,
        univ_params: Vec<Name>,
        ty: Expr,
        value: Expr,
    ) -> Self {
        let meta = uses_meta(env, &ty) || uses_meta(env, &value);
        Self::definition_with_height(env, name, univ_params, ty, value, meta)
    }

    pub fn kind(&self) -> DeclarationKind {
        match (self.0.value.is_some(), self.0.theorem) {
            (false, true) => DeclarationKind::Axiom,
            (false, false) => DeclarationKind::ConstantAssumption,
            (true, false) => DeclarationKind::Definition,
            (true, true) => DeclarationKind::Theorem,
        }
    }

    pub fn is_definition(&self) -> bool {
        self.kind().is_definition()
    }

    pub fn is_axiom(&self) -> bool {
        self.kind().is_axiom()
    }

    pub fn is_theorem(&self) -> bool {
        self.kind().is_theorem()
    }

    pub fn is_constant_assumption(&self) -> bool {
        self.kind().is_constant_assumption()
    }

    pub fn is_meta(&self) -> bool {
        self.0.meta
    }

    pub fn name(&self) -> &Name {
        &self.0.name
    }

    pub fn univ_params(&self) -> &[Name] {
        &self.0.univ_params
    }

    pub fn num_univ_params(&self) -> usize {
        self.0.univ_params.len()
    }

    pub fn ty(&self) -> &Expr {
        &self.0.ty
    }

    /// The value of a definition or theorem.
    ///
    /// Fails with [`KernelError::InvariantViolation`] on postulates; check the kind first.
    pub fn value(&self) -> KernelResult<&Expr> {
        self.0
            .value
            .as_ref()
            .ok_or_else(|| KernelError::InvariantViolation {
                name: self.0.name.clone(),
                reason: "postulates (axioms and constant assumptions) have no value",
            })
    }

    pub fn try_value(&self) -> Option<&Expr> {
        self.0.value.as_ref()
    }

    pub fn hints(&self) -> &ReducibilityHints {
        &self.0.hints
    }

    /// Both handles refer to the same declaration cell.
    pub fn ptr_eq(&self, other: &Declaration) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Returns `true` iff `e` depends on meta declarations of `env`.
///
/// The check is transitive: types and values of referenced declarations are inspected
/// too. Names unknown to `env` contribute nothing.
pub fn uses_meta(env: &Environment, e: &Expr) -> bool {
    let mut visited: BTreeSet<Name> = BTreeSet::new();
    let mut pending: Vec<Name> = e.constants().into_iter().collect();

    while let Some(n) = pending.pop() {
        if !visited.insert(n.clone()) {
            continue;
        }
        let Some(d) = env.find(&n) else {
            trace!("uses_meta: `{}` is not declared, skipping", n);
            continue;
        };
        if d.is_meta() {
            trace!("uses_meta: `{}` is meta", n);
            return true;
        }
        pending.extend(d.ty().constants());
        if let Some(v) = d.try_value() {
            pending.extend(v.constants());
        }
    }

    false
}

/// Largest height among the regular definitions directly referenced by `e`, or `0`.
fn max_height(env: &Environment, e: &Expr) -> u32 {
    e.constants()
        .iter()
        .filter_map(|n| env.find(n))
        .filter(|d| d.is_definition())
        .map(|d| d.hints().height())
        .max()
        .unwrap_or(0)
}
