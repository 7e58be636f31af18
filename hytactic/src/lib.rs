//! Hytactic: proof states and the tactic framework of the hyperion prover.
//!
//! A proof attempt starts from [`proof_state::ProofState::initial`], which turns a target
//! type under a local context into a single goal named `main`. Tactics
//! ([`tactic::Tactic`]) map a state to a lazy sequence of successor states; the driver
//! [`tactic::solve`] consumes candidates until one is terminal:
//!  - proof-final: no goals left and [`precision::Precision`] trusted for proofs;
//!  - counterexample-final: a single hypothesis-free goal `false` and precision trusted
//!    for refutations.
//!
//! Example
//! ```
//! use hytactic::prelude::*;
//! use hykernel::prelude::*;
//!
//! let env = Environment::new();
//! let ctx = Context::new().extend("h", Expr::cnst("p"));
//! let state = ProofState::initial(&env, &ctx, &Expr::cnst("p"));
//! assert_eq!(state.goals().len(), 1);
//!
//! let outcome = solve(&*assumption_tactic(), &state, &TacticOptions::default()).unwrap();
//! let Outcome::Proof(proof) = outcome else { panic!("expected a proof") };
//! assert_eq!(proof, Expr::lambda("h", Expr::cnst("p"), Expr::var(0)));
//! ```

/// Proof and counterexample builders.
pub mod builder;
/// Driver options.
pub mod conf;
/// Local contexts.
pub mod context;
pub mod error;
/// Goals and their derivation from a context.
pub mod goal;
/// Persistent goal sequences.
pub mod goals;
pub mod magic;
/// Metavariable environments.
pub mod metavar;
/// Soundness tags.
pub mod precision;
pub mod proof_state;
/// Tactics, combinators and the search driver.
pub mod tactic;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::builder::{CexBuilder, Counterexample, ProofBuilder, ProofMap};
    pub use crate::conf::TacticOptions;
    pub use crate::context::Context;
    pub use crate::error::{TacticError, TacticResult};
    pub use crate::goal::{Goal, Hypothesis, to_goal};
    pub use crate::goals::Goals;
    pub use crate::metavar::{Assignment, MetavarEnv};
    pub use crate::precision::Precision;
    pub use crate::proof_state::ProofState;
    pub use crate::tactic::{
        Outcome, ProofStateSeq, Tactic, TacticRef, append, assumption_tactic, fail_tactic,
        id_tactic, orelse, solve, then,
    };
}
