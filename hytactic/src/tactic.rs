//! Tactics and the search driver.
//!
//! A tactic maps one proof state to a lazy sequence of candidate successors: zero
//! candidates means failure, several mean alternative ways to proceed. Sequences are plain
//! iterators; dropping one cancels the remaining work.
use std::sync::Arc;

use hykernel::expr::Expr;
use log::{debug, trace};
use strum::EnumIs;

use crate::{
    builder::Counterexample, conf::TacticOptions, error::TacticResult, proof_state::ProofState,
};

/// Lazy sequence of successor states.
pub type ProofStateSeq = Box<dyn Iterator<Item = ProofState> + Send>;

pub trait Tactic: Send + Sync {
    fn apply(&self, state: &ProofState) -> ProofStateSeq;
}

impl<F> Tactic for F
where
    F: Fn(&ProofState) -> ProofStateSeq + Send + Sync,
{
    fn apply(&self, state: &ProofState) -> ProofStateSeq {
        self(state)
    }
}

/// Shared, type-erased tactic.
pub type TacticRef = Arc<dyn Tactic>;

/// Succeeds once with the state unchanged.
pub fn id_tactic() -> TacticRef {
    Arc::new(|s: &ProofState| -> ProofStateSeq { Box::new(std::iter::once(s.clone())) })
}

/// Never produces a successor.
pub fn fail_tactic() -> TacticRef {
    Arc::new(|_: &ProofState| -> ProofStateSeq { Box::new(std::iter::empty()) })
}

/// Runs `second` on every successor of `first`.
pub fn then(first: TacticRef, second: TacticRef) -> TacticRef {
    Arc::new(move |s: &ProofState| -> ProofStateSeq {
        let second = second.clone();
        Box::new(first.apply(s).flat_map(move |s1| second.apply(&s1)))
    })
}

/// Candidates of `first`, or those of `second` if `first` produced none.
pub fn orelse(first: TacticRef, second: TacticRef) -> TacticRef {
    Arc::new(move |s: &ProofState| -> ProofStateSeq {
        let mut seq = first.apply(s).peekable();
        if seq.peek().is_some() {
            Box::new(seq)
        } else {
            second.apply(s)
        }
    })
}

/// Candidates of `first` followed by those of `second`.
pub fn append(first: TacticRef, second: TacticRef) -> TacticRef {
    Arc::new(move |s: &ProofState| -> ProofStateSeq {
        let second = second.clone();
        let state = s.clone();
        Box::new(
            first
                .apply(s)
                .chain(std::iter::once(()).flat_map(move |_| second.apply(&state))),
        )
    })
}

/// Close the goal in focus with a hypothesis whose type is its conclusion.
///
/// Hypothesis types are compared in the scope of the conclusion. One candidate per matching
/// hypothesis, innermost first.
pub fn assumption_tactic() -> TacticRef {
    Arc::new(|s: &ProofState| -> ProofStateSeq {
        let (Ok((id, goal)), Ok(rest)) = (s.goals().head(), s.goals().tail()) else {
            return Box::new(std::iter::empty());
        };
        let (id, goal, state) = (id.clone(), goal.clone(), s.clone());

        let matches: Vec<(usize, u32)> = (0..goal.hypotheses().len())
            .rev()
            .filter(|&i| {
                goal.hypothesis_type_in_conclusion(i).as_ref() == Some(goal.conclusion())
            })
            .filter_map(|i| Some((i, goal.hypothesis_index(i)?)))
            .collect();

        Box::new(matches.into_iter().map(move |(i, idx)| {
            trace!("assumption: closing `{}` with `{}`", id, goal.hypotheses()[i].name);
            let pb = state.proof_builder().discharge(id.clone(), Expr::var(idx));
            state.with_goals(rest.clone(), pb)
        }))
    })
}

/// Result of a search.
#[derive(Debug, EnumIs)]
pub enum Outcome {
    Proof(Expr),
    Counterexample(Counterexample),
    /// No terminal state among the explored candidates.
    Exhausted { explored: usize },
}

/// Apply `tactic` to `state` and consume candidates until one is terminal.
///
/// Proof-final states yield their proof; counterexample-final states yield the
/// counterexample built from the state's environment. When `options.max_candidates` is set,
/// no more than that many candidates are produced; a zero budget never runs the tactic.
pub fn solve(
    tactic: &dyn Tactic,
    state: &ProofState,
    options: &TacticOptions,
) -> TacticResult<Outcome> {
    let budget = options.max_candidates.unwrap_or(usize::MAX);
    let mut explored = 0usize;
    if budget == 0 {
        debug!("solve: empty candidate budget, tactic not run");
        return Ok(Outcome::Exhausted { explored });
    }

    for candidate in tactic.apply(state).take(budget) {
        explored += 1;

        if candidate.is_proof_final_state() {
            debug!("solve: proof found after {} candidate(s)", explored);
            return Ok(Outcome::Proof(candidate.build_proof()?));
        }
        if candidate.is_cex_final_state() {
            debug!("solve: counterexample found after {} candidate(s)", explored);
            let cex = candidate.build_counterexample(candidate.env().clone())?;
            return Ok(Outcome::Counterexample(cex));
        }
        trace!(
            "solve: candidate {} not terminal ({} goal(s), {})",
            explored,
            candidate.goals().len(),
            candidate.precision()
        );
    }

    if explored == budget {
        debug!("solve: candidate budget of {} exhausted", budget);
    }
    Ok(Outcome::Exhausted { explored })
}
