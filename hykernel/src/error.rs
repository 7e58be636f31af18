use strum::EnumIs;
use thiserror::Error;

use crate::name::Name;

#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum KernelError {
    /// An accessor was used on a declaration of the wrong kind.
    #[error("Invariant violation on declaration `{name}`: {reason}")]
    InvariantViolation { name: Name, reason: &'static str },

    #[error("A declaration named `{0}` already exists in the environment")]
    AlreadyDeclared(Name),

    #[error("Unknown declaration `{0}`")]
    UnknownDeclaration(Name),

    /// A non-meta declaration refers to meta declarations.
    #[error(
        "Declaration `{name}` is not meta but depends on meta declarations. Theorems and non-meta definitions cannot use tactic-only constructs."
    )]
    MetaDependency { name: Name },
}

pub type KernelResult<T> = Result<T, KernelError>;
