use hykernel::{error::KernelError, name::Name};
use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, EnumIs, Error)]
pub enum TacticError {
    #[error("Goal sequence is empty: `head` and `tail` expect a non-empty sequence")]
    EmptyGoalSequence,

    /// The counterexample builder was asked about a goal it was not built for, or without
    /// a counterexample.
    #[error("Failed to build counterexample for goal `{id}`")]
    CounterexampleConstruction { id: Name },

    #[error("No proof was synthesized for goal `{id}`")]
    MissingProof { id: Name },

    #[error("Unknown metavariable `{0}`")]
    UnknownMetavar(Name),

    #[error("Metavariable `{0}` is already assigned")]
    MetavarAlreadyAssigned(Name),

    #[error("Assigning `{name}` would make it occur in its own value")]
    CyclicAssignment { name: Name },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tactic options '{file}': {source}")]
    ConfigParse {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize tactic options: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type TacticResult<T> = Result<T, TacticError>;
