//! Soundness tag of the reasoning accumulated in a proof state.
//!
//! Tactics may approximate a goal. An over-approximating step (`Over`) can still be
//! trusted to conclude that a proof exists, but it may have discarded real solutions and
//! cannot certify a counterexample. Symmetrically, `Under` can certify counterexamples but
//! not proofs. `UnderOver` can be trusted for neither.
use strum::{Display, EnumIs, EnumIter};

/// Four-valued join semilattice; `Precise` is the identity, `UnderOver` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIs, EnumIter, Display)]
pub enum Precision {
    #[default]
    Precise,
    Over,
    Under,
    UnderOver,
}

impl Precision {
    pub fn join(self, other: Precision) -> Precision {
        if self == other {
            self
        } else if self == Precision::Precise {
            other
        } else if other == Precision::Precise {
            self
        } else {
            Precision::UnderOver
        }
    }

    /// Join of all precisions in `iter`; `Precise` when empty.
    pub fn join_all<I: IntoIterator<Item = Precision>>(iter: I) -> Precision {
        iter.into_iter().fold(Precision::Precise, Precision::join)
    }

    pub fn trusted_for_proof(self) -> bool {
        matches!(self, Precision::Precise | Precision::Over)
    }

    pub fn trusted_for_refutation(self) -> bool {
        matches!(self, Precision::Precise | Precision::Under)
    }
}
