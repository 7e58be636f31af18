//! Hykernel: the declaration model of the hyperion trusted kernel.
//!
//! This crate holds the pieces the definitional-equality checker relies on to decide how
//! global definitions unfold:
//!  - [`hints`]: reducibility hints and the [`hints::compare`] unfolding policy.
//!  - [`declaration`]: immutable, shared declarations (definitions, theorems, axioms and
//!    constant assumptions) with their meta taint.
//!  - [`environment`]: the persistent store declarations are added to.
//!
//! Terms ([`expr`]), universe levels ([`level`]) and names ([`name`]) are kept minimal;
//! they expose only what the kernel policies and the proof-state engine need.
//!
//! Example
//! ```
//! use hykernel::prelude::*;
//!
//! let env = Environment::new()
//!     .add(Declaration::constant_assumption("nat", vec![], Expr::sort(Level::one()), false))
//!     .unwrap();
//! let id = Declaration::definition_with_height(
//!     &env,
//!     "id_nat",
//!     vec![],
//!     Expr::arrow(Expr::cnst("nat"), Expr::cnst("nat")),
//!     Expr::lambda("x", Expr::cnst("nat"), Expr::var(0)),
//!     false,
//! );
//! assert!(id.is_definition());
//! assert_eq!(id.hints(), &ReducibilityHints::Regular(1));
//! assert!(compare(&ReducibilityHints::Abbreviation, id.hints()) < 0);
//! ```

/// Declarations and their logical kinds.
pub mod declaration;
/// Persistent declaration store.
pub mod environment;
pub mod error;
/// Kernel terms.
pub mod expr;
/// Reducibility hints and the unfolding policy.
pub mod hints;
pub mod level;
pub mod name;
/// Pretty-printing with style annotations.
pub mod pretty;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::declaration::{Declaration, DeclarationKind, uses_meta};
    pub use crate::environment::Environment;
    pub use crate::error::{KernelError, KernelResult};
    pub use crate::expr::{Expr, ExprKind};
    pub use crate::hints::{ReducibilityHints, UnfoldChoice, compare, unfold_choice};
    pub use crate::level::Level;
    pub use crate::name::Name;
    pub use crate::pretty::PrettyDoc;
}
