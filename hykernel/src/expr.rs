//! Shared, immutable kernel terms.
//!
//! Role
//! - Give the declaration model and the proof-state engine a concrete term type.
//! - Expose only what the core needs: construction, structural equality, the set of
//!   referenced constants, recognition of `false`, and a structural rewrite.
//!
//! Representation
//! - [`Expr`] is an `Arc` around an [`ExprKind`]; cloning is O(1) and subterms are shared.
//! - Bound variables are de Bruijn indices ([`ExprKind::Var`]).
use std::collections::BTreeSet;
use std::sync::Arc;

use strum::EnumIs;

use crate::level::Level;
use crate::name::Name;

/// Name of the constant recognized by [`Expr::is_false`].
pub const FALSE_NAME: &str = "false";

/// Outer constructor of an [`Expr`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIs)]
pub enum ExprKind {
    /// Bound variable, as a de Bruijn index.
    Var(u32),
    Sort(Level),
    /// Reference to a global declaration instantiated at the given levels.
    Constant { name: Name, levels: Arc<[Level]> },
    /// Metavariable, solved through a metavariable assignment.
    MetaVar(Name),
    App(Expr, Expr),
    Lambda { binder: Name, domain: Expr, body: Expr },
    Pi { binder: Name, domain: Expr, body: Expr },
}

/// Kernel term. Equality is structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Expr(Arc<ExprKind>);

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self(Arc::new(kind))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    pub fn var(idx: u32) -> Self {
        Self::new(ExprKind::Var(idx))
    }

    pub fn sort(level: Level) -> Self {
        Self::new(ExprKind::Sort(level))
    }

    /// `Sort 0`, the sort of propositions.
    pub fn prop() -> Self {
        Self::sort(Level::Zero)
    }

    pub fn constant<N: Into<Name>>(name: N, levels: Vec<Level>) -> Self {
        Self::new(ExprKind::Constant {
            name: name.into(),
            levels: levels.into(),
        })
    }

    /// Constant with no universe arguments.
    pub fn cnst<N: Into<Name>>(name: N) -> Self {
        Self::constant(name, Vec::new())
    }

    pub fn mvar<N: Into<Name>>(name: N) -> Self {
        Self::new(ExprKind::MetaVar(name.into()))
    }

    pub fn app(self, arg: Expr) -> Self {
        Self::new(ExprKind::App(self, arg))
    }

    /// `f a1 ... an`
    pub fn mk_app<I: IntoIterator<Item = Expr>>(f: Expr, args: I) -> Self {
        args.into_iter().fold(f, Expr::app)
    }

    pub fn lambda<N: Into<Name>>(binder: N, domain: Expr, body: Expr) -> Self {
        Self::new(ExprKind::Lambda {
            binder: binder.into(),
            domain,
            body,
        })
    }

    pub fn pi<N: Into<Name>>(binder: N, domain: Expr, body: Expr) -> Self {
        Self::new(ExprKind::Pi {
            binder: binder.into(),
            domain,
            body,
        })
    }

    /// Non-dependent arrow `a -> b`.
    pub fn arrow(domain: Expr, codomain: Expr) -> Self {
        Self::pi(Name::anonymous(), domain, codomain)
    }

    /// The proposition `false`.
    pub fn mk_false() -> Self {
        Self::cnst(FALSE_NAME)
    }

    /// Syntactic equality with [`Expr::mk_false`].
    pub fn is_false(&self) -> bool {
        match self.kind() {
            ExprKind::Constant { name, levels } => {
                levels.is_empty() && *name == Name::from(FALSE_NAME)
            }
            _ => false,
        }
    }

    /// Returns the same pointer as `other`.
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Immediate subterms, in left-to-right order.
    pub fn children(&self) -> impl Iterator<Item = &Expr> {
        let (a, b) = match self.kind() {
            ExprKind::App(f, a) => (Some(f), Some(a)),
            ExprKind::Lambda { domain, body, .. } | ExprKind::Pi { domain, body, .. } => {
                (Some(domain), Some(body))
            }
            _ => (None, None),
        };
        a.into_iter().chain(b)
    }

    /// Visit every constant occurring in this term.
    ///
    /// Iterative traversal with an explicit stack; shared subterms are visited once per
    /// occurrence.
    pub fn for_each_constant(&self, mut f: impl FnMut(&Name)) {
        let mut stack: Vec<&Expr> = vec![self];
        while let Some(e) = stack.pop() {
            if let ExprKind::Constant { name, .. } = e.kind() {
                f(name);
            }
            // Push in reverse so constants are reported left to right
            let children: Vec<&Expr> = e.children().collect();
            stack.extend(children.into_iter().rev());
        }
    }

    /// The set of global names referenced by this term.
    pub fn constants(&self) -> BTreeSet<Name> {
        let mut out = BTreeSet::new();
        self.for_each_constant(|n| {
            out.insert(n.clone());
        });
        out
    }

    pub fn has_metavar(&self) -> bool {
        let mut stack: Vec<&Expr> = vec![self];
        while let Some(e) = stack.pop() {
            if e.kind().is_meta_var() {
                return true;
            }
            stack.extend(e.children());
        }
        false
    }

    /// Rebuild the term bottom-up, replacing every subterm for which `f` returns `Some`.
    ///
    /// Replaced subterms are not visited again. Untouched subterms keep their sharing.
    pub fn replace(&self, f: &impl Fn(&Expr) -> Option<Expr>) -> Expr {
        if let Some(r) = f(self) {
            return r;
        }
        match self.kind() {
            ExprKind::App(fun, arg) => {
                let (nf, na) = (fun.replace(f), arg.replace(f));
                if nf.ptr_eq(fun) && na.ptr_eq(arg) {
                    self.clone()
                } else {
                    nf.app(na)
                }
            }
            ExprKind::Lambda {
                binder,
                domain,
                body,
            } => {
                let (nd, nb) = (domain.replace(f), body.replace(f));
                if nd.ptr_eq(domain) && nb.ptr_eq(body) {
                    self.clone()
                } else {
                    Expr::lambda(binder.clone(), nd, nb)
                }
            }
            ExprKind::Pi {
                binder,
                domain,
                body,
            } => {
                let (nd, nb) = (domain.replace(f), body.replace(f));
                if nd.ptr_eq(domain) && nb.ptr_eq(body) {
                    self.clone()
                } else {
                    Expr::pi(binder.clone(), nd, nb)
                }
            }
            _ => self.clone(),
        }
    }

    /// Add `n` to every de Bruijn index that is not bound inside the term.
    ///
    /// Moves a term from a context into one extended with `n` further binders.
    pub fn lift_loose_vars(&self, n: u32) -> Expr {
        if n == 0 {
            return self.clone();
        }
        self.lift_above(0, n)
    }

    fn lift_above(&self, cutoff: u32, n: u32) -> Expr {
        match self.kind() {
            ExprKind::Var(i) if *i >= cutoff => Expr::var(i.saturating_add(n)),
            ExprKind::App(fun, arg) => {
                let (nf, na) = (fun.lift_above(cutoff, n), arg.lift_above(cutoff, n));
                if nf.ptr_eq(fun) && na.ptr_eq(arg) {
                    self.clone()
                } else {
                    nf.app(na)
                }
            }
            ExprKind::Lambda {
                binder,
                domain,
                body,
            } => {
                let nd = domain.lift_above(cutoff, n);
                let nb = body.lift_above(cutoff + 1, n);
                if nd.ptr_eq(domain) && nb.ptr_eq(body) {
                    self.clone()
                } else {
                    Expr::lambda(binder.clone(), nd, nb)
                }
            }
            ExprKind::Pi {
                binder,
                domain,
                body,
            } => {
                let nd = domain.lift_above(cutoff, n);
                let nb = body.lift_above(cutoff + 1, n);
                if nd.ptr_eq(domain) && nb.ptr_eq(body) {
                    self.clone()
                } else {
                    Expr::pi(binder.clone(), nd, nb)
                }
            }
            _ => self.clone(),
        }
    }
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
