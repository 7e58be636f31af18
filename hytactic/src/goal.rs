//! Goals: a conclusion to prove or refute under hypotheses.
use std::sync::Arc;

use hykernel::{
    expr::Expr,
    name::Name,
    pretty::{PrettyDoc, Style, expr_doc, punct, styled},
};
use pretty::RcDoc;

use crate::{context::Context, precision::Precision};

/// A named hypothesis `name : ty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub name: Name,
    pub ty: Expr,
}

/// An obligation. Hypotheses are ordered outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    hypotheses: Arc<[Hypothesis]>,
    conclusion: Expr,
}

impl Goal {
    pub fn new(hypotheses: Vec<Hypothesis>, conclusion: Expr) -> Self {
        Self {
            hypotheses: hypotheses.into(),
            conclusion,
        }
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn conclusion(&self) -> &Expr {
        &self.conclusion
    }

    /// Same hypotheses, new conclusion.
    pub fn with_conclusion(&self, conclusion: Expr) -> Self {
        Self {
            hypotheses: self.hypotheses.clone(),
            conclusion,
        }
    }

    /// De Bruijn index by which the conclusion refers to hypothesis `i`.
    pub fn hypothesis_index(&self, i: usize) -> Option<u32> {
        let idx = self.hypotheses.len().checked_sub(i + 1)?;
        u32::try_from(idx).ok()
    }

    /// Type of hypothesis `i`, moved into the scope of the conclusion.
    ///
    /// Hypothesis `i` only sees the `i` hypotheses before it.
    pub fn hypothesis_type_in_conclusion(&self, i: usize) -> Option<Expr> {
        let h = self.hypotheses.get(i)?;
        let shift = u32::try_from(self.hypotheses.len() - i).ok()?;
        Some(h.ty.lift_loose_vars(shift))
    }
}

impl PrettyDoc for Goal {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        let hyps = self.hypotheses.iter().map(|h| {
            styled(Style::Local, h.name.to_string())
                .append(RcDoc::space())
                .append(punct(":"))
                .append(RcDoc::space())
                .append(expr_doc(&h.ty, 0))
                .append(punct(","))
                .append(RcDoc::line())
                .group()
        });
        RcDoc::concat(hyps)
            .append(styled(Style::Turnstile, "|-"))
            .append(RcDoc::space())
            .append(expr_doc(&self.conclusion, 0))
            .group()
    }
}

hykernel::impl_display_via_pretty!(Goal);

/// Turns a proof of a derived goal into a proof of the original obligation.
pub type GoalProofFn = Arc<dyn Fn(Expr) -> Expr + Send + Sync>;

/// Derive a goal from a target type living under `ctx`.
///
/// Context entries become hypotheses in order. The returned function abstracts a proof of
/// the goal over the context, yielding a closed proof of `Pi ctx, target`. Goals derived
/// this way are exact, so the returned precision is [`Precision::Precise`].
pub fn to_goal(ctx: &Context, target: &Expr) -> (Goal, GoalProofFn, Precision) {
    let hypotheses: Vec<Hypothesis> = ctx
        .iter()
        .map(|e| Hypothesis {
            name: e.name.clone(),
            ty: e.ty.clone(),
        })
        .collect();

    let binders: Vec<(Name, Expr)> = ctx.iter().map(|e| (e.name.clone(), e.ty.clone())).collect();
    let wrap: GoalProofFn = Arc::new(move |proof: Expr| {
        binders
            .iter()
            .rev()
            .fold(proof, |body, (n, ty)| Expr::lambda(n.clone(), ty.clone(), body))
    });

    (Goal::new(hypotheses, target.clone()), wrap, Precision::Precise)
}
