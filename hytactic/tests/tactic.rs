use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hykernel::prelude::*;
use hytactic::prelude::*;

fn p() -> Expr {
    Expr::cnst("p")
}

fn q() -> Expr {
    Expr::cnst("q")
}

/// Splits `a /\ b` (encoded as `and a b`) into two goals.
fn split_and() -> TacticRef {
    Arc::new(|s: &ProofState| -> ProofStateSeq {
        let (Ok((id, goal)), Ok(rest)) = (s.goals().head(), s.goals().tail()) else {
            return Box::new(std::iter::empty());
        };
        let ExprKind::App(f, b) = goal.conclusion().kind() else {
            return Box::new(std::iter::empty());
        };
        let ExprKind::App(and, a) = f.kind() else {
            return Box::new(std::iter::empty());
        };
        if and != &Expr::cnst("and") {
            return Box::new(std::iter::empty());
        }

        let (left, right) = (id.append_str("left"), id.append_str("right"));
        let goals = Goals::cons(
            left.clone(),
            goal.with_conclusion(a.clone()),
            &Goals::cons(right.clone(), goal.with_conclusion(b.clone()), &rest),
        );
        let pb = s.proof_builder().refine(
            id.clone(),
            vec![left.clone(), right.clone()],
            |ps: &[Expr]| Expr::mk_app(Expr::cnst("and.intro"), ps.iter().cloned()),
        );
        let cb = s.cex_builder().redirect(vec![left, right], id.clone());
        let precisions = [Precision::Precise, Precision::Precise];
        Box::new(std::iter::once(s.split(goals, pb, cb, precisions)))
    })
}

/// Replaces the focused goal by `false`, an under-approximation.
fn weaken_to_false() -> TacticRef {
    Arc::new(|s: &ProofState| -> ProofStateSeq {
        let Ok((id, _)) = s.goals().head() else {
            return Box::new(std::iter::empty());
        };
        let Ok(rest) = s.goals().tail() else {
            return Box::new(std::iter::empty());
        };
        let goals = Goals::cons(id.clone(), Goal::new(vec![], Expr::mk_false()), &rest);
        let next = s
            .with_goals(goals, s.proof_builder().clone())
            .approximate(Precision::Under);
        Box::new(std::iter::once(next))
    })
}

fn options() -> TacticOptions {
    TacticOptions::default()
}

#[test]
fn assumption_closes_matching_goals() {
    let ctx = Context::new().extend("hp", p()).extend("hq", q());
    let state = ProofState::initial(&Environment::new(), &ctx, &p());

    let outcome = solve(&*assumption_tactic(), &state, &options()).unwrap();
    let Outcome::Proof(proof) = outcome else {
        panic!("expected a proof, got {outcome:?}");
    };
    assert_eq!(proof, Expr::lambda("hp", p(), Expr::lambda("hq", q(), Expr::var(1))));
}

#[test]
fn assumption_offers_one_candidate_per_match() {
    let ctx = Context::new().extend("h1", p()).extend("h2", p());
    let state = ProofState::initial(&Environment::new(), &ctx, &p());
    let candidates: Vec<ProofState> = assumption_tactic().apply(&state).collect();
    assert_eq!(candidates.len(), 2);

    // Innermost hypothesis first
    let proofs: Vec<Expr> = candidates.iter().map(|c| c.build_proof().unwrap()).collect();
    let wrap = |body| Expr::lambda("h1", p(), Expr::lambda("h2", p(), body));
    assert_eq!(proofs, vec![wrap(Expr::var(0)), wrap(Expr::var(1))]);
}

#[test]
fn assumption_fails_without_matching_hypothesis() {
    let state = ProofState::initial(&Environment::new(), &Context::new().extend("h", q()), &p());
    assert_eq!(assumption_tactic().apply(&state).count(), 0);

    let outcome = solve(&*assumption_tactic(), &state, &options()).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 0 }));
}

#[test]
fn split_then_assumption_composes_proofs() {
    let ctx = Context::new().extend("hp", p()).extend("hq", q());
    let target = Expr::mk_app(Expr::cnst("and"), [p(), q()]);
    let state = ProofState::initial(&Environment::new(), &ctx, &target);

    let tactic = then(split_and(), then(assumption_tactic(), assumption_tactic()));
    let Outcome::Proof(proof) = solve(&*tactic, &state, &options()).unwrap() else {
        panic!("expected a proof");
    };
    let body = Expr::mk_app(Expr::cnst("and.intro"), [Expr::var(1), Expr::var(0)]);
    assert_eq!(proof, Expr::lambda("hp", p(), Expr::lambda("hq", q(), body)));
}

#[test]
fn under_approximation_to_false_yields_counterexample() {
    let env = Environment::new()
        .add(Declaration::constant_assumption("p", vec![], Expr::prop(), false))
        .unwrap();
    let state = ProofState::initial(&env, &Context::new(), &p());

    let Outcome::Counterexample(cex) = solve(&*weaken_to_false(), &state, &options()).unwrap()
    else {
        panic!("expected a counterexample");
    };
    assert!(cex.ptr_eq(&env));
}

#[test]
fn counterexamples_of_subgoals_refute_the_parent() {
    let target = Expr::mk_app(Expr::cnst("and"), [p(), q()]);
    let state = ProofState::initial(&Environment::new(), &Context::new(), &target);
    let split = split_and().apply(&state).next().unwrap();

    let cex = Environment::new();
    let left = Name::from("main").append_str("left");
    let built = split
        .cex_builder()
        .build(&left, Some(&cex), split.menv().assignment())
        .unwrap();
    assert!(built.ptr_eq(&cex));
}

#[test]
fn orelse_and_append() {
    let ctx = Context::new().extend("h", p());
    let state = ProofState::initial(&Environment::new(), &ctx, &p());

    let t = orelse(fail_tactic(), assumption_tactic());
    assert_eq!(t.apply(&state).count(), 1);

    let t = orelse(id_tactic(), assumption_tactic());
    let first = t.apply(&state).next().unwrap();
    assert_eq!(first.goals().len(), 1);

    let t = append(id_tactic(), assumption_tactic());
    let all: Vec<ProofState> = t.apply(&state).collect();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].goals().len(), 1);
    assert!(all[1].is_proof_final_state());
}

#[test]
fn sequences_are_lazy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let counting: TacticRef = Arc::new(move |s: &ProofState| -> ProofStateSeq {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(std::iter::once(s.clone()))
    });

    let state = ProofState::initial(&Environment::new(), &Context::new(), &p());
    let seq = append(id_tactic(), counting).apply(&state);
    let first: Vec<ProofState> = seq.take(1).collect();
    assert_eq!(first.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn solve_respects_the_candidate_budget() {
    let ctx = Context::new().extend("h", p());
    let state = ProofState::initial(&Environment::new(), &ctx, &p());
    // id candidate first, then the proof
    let tactic = append(id_tactic(), assumption_tactic());

    let bounded = TacticOptions {
        max_candidates: Some(1),
        ..TacticOptions::default()
    };
    let outcome = solve(&*tactic, &state, &bounded).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 1 }));

    let outcome = solve(&*tactic, &state, &options()).unwrap();
    assert!(outcome.is_proof());
}

#[test]
fn over_approximated_proofs_are_accepted() {
    let ctx = Context::new().extend("h", p());
    let state = ProofState::initial(&Environment::new(), &ctx, &p()).approximate(Precision::Over);
    assert!(solve(&*assumption_tactic(), &state, &options()).unwrap().is_proof());

    let state = state.approximate(Precision::Under);
    let outcome = solve(&*assumption_tactic(), &state, &options()).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 1 }));
}

#[test]
fn assumption_compares_types_in_the_scope_of_the_conclusion() {
    // a : Prop, h1 : a, b : Prop |- b. `h1 : #0` names `a`, not `b`
    let ctx = Context::new()
        .extend("a", Expr::prop())
        .extend("h1", Expr::var(0))
        .extend("b", Expr::prop());
    let state = ProofState::initial(&Environment::new(), &ctx, &Expr::var(0));
    let outcome = solve(&*assumption_tactic(), &state, &options()).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 0 }));

    // a : Prop, h : a |- a
    let ctx = Context::new()
        .extend("a", Expr::prop())
        .extend("h", Expr::var(0));
    let state = ProofState::initial(&Environment::new(), &ctx, &Expr::var(1));
    let Outcome::Proof(proof) = solve(&*assumption_tactic(), &state, &options()).unwrap() else {
        panic!("expected a proof");
    };
    let expected = Expr::lambda(
        "a",
        Expr::prop(),
        Expr::lambda("h", Expr::var(0), Expr::var(0)),
    );
    assert_eq!(proof, expected);
}

#[test]
fn solve_never_pulls_past_the_budget() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let counting: TacticRef = Arc::new(move |s: &ProofState| -> ProofStateSeq {
        let counter = counter.clone();
        let s = s.clone();
        Box::new(std::iter::repeat_with(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            s.clone()
        }))
    });
    let state = ProofState::initial(&Environment::new(), &Context::new(), &p());

    let bounded = TacticOptions {
        max_candidates: Some(3),
        ..TacticOptions::default()
    };
    let outcome = solve(&*counting, &state, &bounded).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 3 }));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let applied = Arc::new(AtomicUsize::new(0));
    let counter = applied.clone();
    let tracked: TacticRef = Arc::new(move |s: &ProofState| -> ProofStateSeq {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::new(std::iter::once(s.clone()))
    });
    let zero = TacticOptions {
        max_candidates: Some(0),
        ..TacticOptions::default()
    };
    let outcome = solve(&*tracked, &state, &zero).unwrap();
    assert!(matches!(outcome, Outcome::Exhausted { explored: 0 }));
    assert_eq!(applied.load(Ordering::SeqCst), 0);
}
