//! Proof states: the unit tactics transform.
//!
//! A [`ProofState`] bundles the open goals, the metavariable environment, the proof and
//! counterexample builders, and the precision of the reasoning so far. States are values:
//! every transformation returns a new state and leaves the original untouched.
//!
//! A search is over when a state satisfies [`ProofState::is_proof_final_state`] (no goals
//! left, precision trusted for proofs) or [`ProofState::is_cex_final_state`] (a single
//! hypothesis-free goal `false`, precision trusted for refutations).
use std::io::Write;

use hykernel::{
    environment::Environment,
    expr::Expr,
    name::Name,
    pretty::{PrettyDoc, Style},
};
use log::trace;
use pretty::RcDoc;
use termcolor::WriteColor;

use crate::{
    builder::{CexBuilder, Counterexample, ProofBuilder, ProofMap, find_proof},
    conf::TacticOptions,
    context::Context,
    error::{TacticError, TacticResult},
    goal::to_goal,
    goals::Goals,
    magic::MAIN_GOAL_NAME,
    metavar::MetavarEnv,
    precision::Precision,
};

#[derive(Debug, Clone)]
pub struct ProofState {
    env: Environment,
    goals: Goals,
    menv: MetavarEnv,
    proof_builder: ProofBuilder,
    cex_builder: CexBuilder,
    precision: Precision,
}

impl ProofState {
    /// A state with [`Precision::Precise`] precision.
    pub fn new(
        env: Environment,
        goals: Goals,
        menv: MetavarEnv,
        proof_builder: ProofBuilder,
        cex_builder: CexBuilder,
    ) -> Self {
        Self {
            env,
            goals,
            menv,
            proof_builder,
            cex_builder,
            precision: Precision::Precise,
        }
    }

    /// The initial state of a proof attempt of `target` under `ctx`.
    ///
    /// The state has a single goal named `main`. Its proof builder abstracts the proof of
    /// `main` over `ctx`; its counterexample builder only accepts a counterexample for
    /// `main`, which it returns unchanged.
    pub fn initial(env: &Environment, ctx: &Context, target: &Expr) -> Self {
        let (goal, wrap, precision) = to_goal(ctx, target);
        let main = Name::from(MAIN_GOAL_NAME);

        let proof_builder = {
            let main = main.clone();
            ProofBuilder::new(move |map: &ProofMap, _| Ok(wrap(find_proof(map, &main)?.clone())))
        };

        let cex_builder = {
            let main = main.clone();
            CexBuilder::new(move |id, cex, _| match cex {
                Some(cex) if *id == main => Ok(cex.clone()),
                _ => Err(TacticError::CounterexampleConstruction { id: main.clone() }),
            })
        };

        trace!("initial proof state for `{}` under {} binder(s)", target, ctx.len());

        Self {
            env: env.clone(),
            goals: Goals::singleton(main, goal),
            menv: MetavarEnv::new(),
            proof_builder,
            cex_builder,
            precision,
        }
    }

    /// Same state with new goals and proof builder.
    pub fn with_goals(&self, goals: Goals, proof_builder: ProofBuilder) -> Self {
        Self {
            goals,
            proof_builder,
            ..self.clone()
        }
    }

    pub fn with_cex_builder(&self, cex_builder: CexBuilder) -> Self {
        Self {
            cex_builder,
            ..self.clone()
        }
    }

    pub fn with_menv(&self, menv: MetavarEnv) -> Self {
        Self {
            menv,
            ..self.clone()
        }
    }

    pub fn with_precision(&self, precision: Precision) -> Self {
        Self {
            precision,
            ..self.clone()
        }
    }

    /// Replace the goal in focus by subgoals.
    ///
    /// `subgoal_precisions` are the precisions of the steps that derived each subgoal. The
    /// new state's precision is their join with the current one.
    pub fn split<I>(
        &self,
        goals: Goals,
        proof_builder: ProofBuilder,
        cex_builder: CexBuilder,
        subgoal_precisions: I,
    ) -> Self
    where
        I: IntoIterator<Item = Precision>,
    {
        let precision =
            Precision::join_all(std::iter::once(self.precision).chain(subgoal_precisions));
        trace!("split into {} goal(s), precision {}", goals.len(), precision);
        Self {
            goals,
            proof_builder,
            cex_builder,
            precision,
            ..self.clone()
        }
    }

    /// Account for an approximation step: joins `p` into the current precision.
    pub fn approximate(&self, p: Precision) -> Self {
        self.with_precision(self.precision.join(p))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn menv(&self) -> &MetavarEnv {
        &self.menv
    }

    pub fn proof_builder(&self) -> &ProofBuilder {
        &self.proof_builder
    }

    pub fn cex_builder(&self) -> &CexBuilder {
        &self.cex_builder
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// No goals left and the precision can be trusted for proofs.
    pub fn is_proof_final_state(&self) -> bool {
        self.goals.is_empty() && self.precision.trusted_for_proof()
    }

    /// A single goal `false` without hypotheses, and the precision can be trusted for
    /// refutations.
    pub fn is_cex_final_state(&self) -> bool {
        if self.goals.len() != 1 || !self.precision.trusted_for_refutation() {
            return false;
        }
        match self.goals.head() {
            Ok((_, g)) => g.conclusion().is_false() && g.hypotheses().is_empty(),
            Err(_) => false,
        }
    }

    /// Run the proof builder with no further goal proofs.
    pub fn build_proof(&self) -> TacticResult<Expr> {
        let proof = self
            .proof_builder
            .build(&ProofMap::new(), self.menv.assignment())?;
        Ok(self.menv.assignment().instantiate(&proof))
    }

    /// Run the counterexample builder on the goal in focus.
    pub fn build_counterexample(&self, cex: Counterexample) -> TacticResult<Counterexample> {
        let (id, _) = self.goals.head()?;
        self.cex_builder
            .build(id, Some(&cex), self.menv.assignment())
    }

    /// Goals rendered in order, separated by line breaks.
    pub fn render(&self, width: usize) -> String {
        self.pretty_string(width)
    }

    /// Render to a terminal sink, honoring the width and color options.
    pub fn render_to<W: WriteColor + Write>(
        &self,
        options: &TacticOptions,
        out: &mut W,
    ) -> std::io::Result<()> {
        if options.color {
            self.pretty_render_to(options.pp_width, out)
        } else {
            out.write_all(self.render(options.pp_width).as_bytes())
        }
    }
}

impl PrettyDoc for ProofState {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        RcDoc::intersperse(
            self.goals.iter().map(|(_, g)| g.pretty_doc()),
            RcDoc::hardline(),
        )
    }
}

hykernel::impl_display_via_pretty!(ProofState);
