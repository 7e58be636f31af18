//! Proof and counterexample builders.
//!
//! Builders are the continuations of a proof state: they assemble the final artifact from
//! per-goal results once the search is over. They are shared closures, composed (never
//! mutated) each time a tactic focuses, splits or discharges a goal.
use std::collections::BTreeMap;
use std::sync::Arc;

use hykernel::{environment::Environment, expr::Expr, name::Name};

use crate::{
    error::{TacticError, TacticResult},
    metavar::Assignment,
};

/// Synthesized proofs, keyed by goal identifier.
pub type ProofMap = BTreeMap<Name, Expr>;

/// A counterexample is a model given as an environment.
pub type Counterexample = Environment;

type ProofFn = dyn Fn(&ProofMap, &Assignment) -> TacticResult<Expr> + Send + Sync;
type CexFn = dyn Fn(&Name, Option<&Counterexample>, &Assignment) -> TacticResult<Counterexample>
    + Send
    + Sync;

/// Look up the proof of goal `id`.
pub fn find_proof<'a>(map: &'a ProofMap, id: &Name) -> TacticResult<&'a Expr> {
    map.get(id)
        .ok_or_else(|| TacticError::MissingProof { id: id.clone() })
}

/// Builds the overall proof term from the proofs of individual goals.
#[derive(Clone)]
pub struct ProofBuilder(Arc<ProofFn>);

impl ProofBuilder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ProofMap, &Assignment) -> TacticResult<Expr> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn build(&self, map: &ProofMap, assignment: &Assignment) -> TacticResult<Expr> {
        (self.0)(map, assignment)
    }

    /// Record `proof` as the proof of goal `id` before delegating to `self`.
    pub fn discharge<N: Into<Name>>(&self, id: N, proof: Expr) -> Self {
        let inner = self.clone();
        let id = id.into();
        Self::new(move |map, assignment| {
            let mut map = map.clone();
            map.insert(id.clone(), proof.clone());
            inner.build(&map, assignment)
        })
    }

    /// Goal `id` was split into `subgoals`; its proof is `combine` applied to theirs.
    pub fn refine<N, F>(&self, id: N, subgoals: Vec<Name>, combine: F) -> Self
    where
        N: Into<Name>,
        F: Fn(&[Expr]) -> Expr + Send + Sync + 'static,
    {
        let inner = self.clone();
        let id = id.into();
        Self::new(move |map, assignment| {
            let proofs = subgoals
                .iter()
                .map(|sub| find_proof(map, sub).cloned())
                .collect::<TacticResult<Vec<Expr>>>()?;
            let mut map = map.clone();
            map.insert(id.clone(), combine(&proofs));
            inner.build(&map, assignment)
        })
    }
}

impl std::fmt::Debug for ProofBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProofBuilder(..)")
    }
}

/// Builds the overall counterexample from a counterexample for one goal.
#[derive(Clone)]
pub struct CexBuilder(Arc<CexFn>);

impl CexBuilder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Name, Option<&Counterexample>, &Assignment) -> TacticResult<Counterexample>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn build(
        &self,
        id: &Name,
        cex: Option<&Counterexample>,
        assignment: &Assignment,
    ) -> TacticResult<Counterexample> {
        (self.0)(id, cex, assignment)
    }

    /// Counterexamples for any of `subgoals` refute `parent`.
    pub fn redirect<N: Into<Name>>(&self, subgoals: Vec<Name>, parent: N) -> Self {
        let inner = self.clone();
        let parent = parent.into();
        Self::new(move |id, cex, assignment| {
            if subgoals.contains(id) {
                inner.build(&parent, cex, assignment)
            } else {
                inner.build(id, cex, assignment)
            }
        })
    }
}

impl std::fmt::Debug for CexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CexBuilder(..)")
    }
}
