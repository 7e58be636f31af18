use hykernel::prelude::*;
use hytactic::prelude::*;

fn empty_state() -> ProofState {
    ProofState::new(
        Environment::new(),
        Goals::empty(),
        MetavarEnv::new(),
        ProofBuilder::new(|_, _| Ok(Expr::cnst("trivial"))),
        CexBuilder::new(|id, _, _| Err(TacticError::CounterexampleConstruction { id: id.clone() })),
    )
}

fn false_state(hypotheses: Vec<Hypothesis>) -> ProofState {
    let goals = Goals::singleton("g", Goal::new(hypotheses, Expr::mk_false()));
    empty_state().with_goals(goals, ProofBuilder::new(|_, _| Ok(Expr::cnst("trivial"))))
}

fn model() -> Environment {
    Environment::new()
        .add(Declaration::constant_assumption("witness", vec![], Expr::cnst("nat"), false))
        .unwrap()
}

#[test]
fn initial_state_has_a_single_main_goal() {
    let ctx = Context::new().extend("a", Expr::prop());
    let state = ProofState::initial(&Environment::new(), &ctx, &Expr::var(0));

    assert_eq!(state.goals().len(), 1);
    let (id, goal) = state.goals().head().unwrap();
    assert_eq!(id, &Name::from("main"));
    assert_eq!(goal.hypotheses().len(), 1);
    assert_eq!(goal.conclusion(), &Expr::var(0));
    assert_eq!(state.precision(), Precision::Precise);
    assert!(!state.is_proof_final_state());
}

#[test]
fn initial_proof_builder_wraps_the_main_proof() {
    let ctx = Context::new().extend("a", Expr::prop()).extend("h", Expr::var(0));
    let state = ProofState::initial(&Environment::new(), &ctx, &Expr::var(1));

    let mut map = ProofMap::new();
    map.insert(Name::from("main"), Expr::var(0));
    let proof = state
        .proof_builder()
        .build(&map, state.menv().assignment())
        .unwrap();
    let expected = Expr::lambda("a", Expr::prop(), Expr::lambda("h", Expr::var(0), Expr::var(0)));
    assert_eq!(proof, expected);

    // Without a proof for `main` the builder fails
    let err = state.build_proof().unwrap_err();
    assert!(err.is_missing_proof());
}

#[test]
fn initial_cex_builder_only_accepts_main() {
    let state = ProofState::initial(&Environment::new(), &Context::new(), &Expr::mk_false());
    let cex = model();
    let assignment = Assignment::new();

    let built = state
        .cex_builder()
        .build(&Name::from("main"), Some(&cex), &assignment)
        .unwrap();
    assert!(built.ptr_eq(&cex));

    let err = state
        .cex_builder()
        .build(&Name::from("other"), Some(&cex), &assignment)
        .unwrap_err();
    assert!(err.is_counterexample_construction());

    let err = state
        .cex_builder()
        .build(&Name::from("main"), None, &assignment)
        .unwrap_err();
    assert!(err.is_counterexample_construction());

    assert!(state.build_counterexample(cex.clone()).unwrap().ptr_eq(&cex));
}

#[test]
fn proof_final_depends_on_precision() {
    let state = empty_state().with_precision(Precision::Over);
    assert!(state.is_proof_final_state());

    let state = state.with_precision(Precision::Under);
    assert!(!state.is_proof_final_state());
    assert!(!state.with_precision(Precision::UnderOver).is_proof_final_state());
    assert!(empty_state().is_proof_final_state());
}

#[test]
fn cex_final_requires_a_bare_false_goal() {
    let state = false_state(vec![]).with_precision(Precision::Under);
    assert!(state.is_cex_final_state());
    assert!(!state.with_precision(Precision::Over).is_cex_final_state());

    let hyp = Hypothesis {
        name: "h".into(),
        ty: Expr::cnst("p"),
    };
    let state = false_state(vec![hyp]).with_precision(Precision::Under);
    assert!(!state.is_cex_final_state());

    // Two goals are never counterexample-final
    let two = Goals::cons("g0", Goal::new(vec![], Expr::mk_false()), false_state(vec![]).goals());
    let state = empty_state().with_goals(two, empty_state().proof_builder().clone());
    assert!(!state.is_cex_final_state());

    // Nor is an empty sequence or a goal other than false
    assert!(!empty_state().is_cex_final_state());
    let state = ProofState::initial(&Environment::new(), &Context::new(), &Expr::cnst("p"));
    assert!(!state.is_cex_final_state());
}

#[test]
fn approximation_joins_precisions() {
    let state = empty_state().approximate(Precision::Over);
    assert_eq!(state.precision(), Precision::Over);
    let state = state.approximate(Precision::Under);
    assert_eq!(state.precision(), Precision::UnderOver);
    assert!(!state.is_proof_final_state());
}

#[test]
fn transformations_leave_the_original_untouched() {
    let state = ProofState::initial(&Environment::new(), &Context::new(), &Expr::cnst("p"));
    let derived = state
        .with_goals(Goals::empty(), state.proof_builder().clone())
        .with_precision(Precision::Under);
    assert_eq!(state.goals().len(), 1);
    assert_eq!(state.precision(), Precision::Precise);
    assert!(derived.goals().is_empty());
}

#[test]
fn rendering_separates_goals_by_line_breaks() {
    let hyp = Hypothesis {
        name: "h".into(),
        ty: Expr::cnst("p"),
    };
    let goals: Goals = [
        ("a", Goal::new(vec![hyp], Expr::cnst("q"))),
        ("b", Goal::new(vec![], Expr::mk_false())),
    ]
    .into_iter()
    .collect();
    let state = empty_state().with_goals(goals, empty_state().proof_builder().clone());

    assert_eq!(state.render(80), "h : p, |- q\n|- false");
    assert_eq!(state.to_string(), state.render(80));
    assert_eq!(empty_state().render(80), "");

    let options = TacticOptions {
        color: false,
        ..TacticOptions::default()
    };
    let mut out = termcolor::NoColor::new(Vec::new());
    state.render_to(&options, &mut out).unwrap();
    assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "h : p, |- q\n|- false");
}

#[test]
fn build_proof_instantiates_metavariables() {
    let (menv, m) = MetavarEnv::new().mk_metavar(Expr::cnst("p"));
    let hykernel::expr::ExprKind::MetaVar(name) = m.kind().clone() else {
        panic!("expected a metavariable");
    };
    let menv = menv.assign(&name, Expr::cnst("proof_of_p")).unwrap();

    let state = ProofState::initial(&Environment::new(), &Context::new(), &Expr::cnst("p"));
    let pb = state.proof_builder().discharge("main", m);
    let state = state.with_goals(Goals::empty(), pb).with_menv(menv);

    assert_eq!(state.build_proof().unwrap(), Expr::cnst("proof_of_p"));
}

#[test]
fn split_joins_parent_and_subgoal_precisions() {
    let parent = ProofState::initial(&Environment::new(), &Context::new(), &Expr::cnst("p"))
        .approximate(Precision::Over);
    let goals = Goals::from_iter([
        (Name::from("l"), Goal::new(vec![], Expr::cnst("a"))),
        (Name::from("r"), Goal::new(vec![], Expr::cnst("b"))),
    ]);

    let exact = parent.split(
        goals.clone(),
        parent.proof_builder().clone(),
        parent.cex_builder().clone(),
        [Precision::Precise, Precision::Over],
    );
    assert_eq!(exact.precision(), Precision::Over);
    assert_eq!(exact.goals(), &goals);
    assert_eq!(parent.goals().len(), 1);

    let mixed = parent.split(
        goals,
        parent.proof_builder().clone(),
        parent.cex_builder().clone(),
        [Precision::Under],
    );
    assert_eq!(mixed.precision(), Precision::UnderOver);

    let unchanged = ProofState::initial(&Environment::new(), &Context::new(), &Expr::cnst("p"))
        .split(
            Goals::empty(),
            parent.proof_builder().clone(),
            parent.cex_builder().clone(),
            Vec::<Precision>::new(),
        );
    assert_eq!(unchanged.precision(), Precision::Precise);
}
