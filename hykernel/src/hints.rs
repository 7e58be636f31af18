//! Reducibility hints and the unfolding policy of the definitional-equality checker.
//!
//! When the checker faces a constraint `(f ...) =?= (g ...)` where `f` and `g` are both
//! definitions, it consults [`compare`] on their hints to decide which side to unfold:
//!
//! - if exactly one side is [`ReducibilityHints::Opaque`], the other side is unfolded;
//! - else if exactly one side is [`ReducibilityHints::Abbreviation`], that side is unfolded;
//! - else if both are [`ReducibilityHints::Regular`], heights decide;
//! - otherwise both sides are unfolded.
//!
//! Hints only affect performance, never soundness.
use std::cmp::Ordering;

use strum::EnumIs;

/// How freely a definition may be unfolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIs)]
pub enum ReducibilityHints {
    /// Never unfolded in isolation.
    #[default]
    Opaque,
    /// Always unfolded when compared against a non-abbreviation.
    Abbreviation,
    /// Unfolded according to its definitional height.
    Regular(u32),
}

impl ReducibilityHints {
    /// Definitional height; `0` for non-regular hints.
    pub fn height(&self) -> u32 {
        match self {
            ReducibilityHints::Regular(h) => *h,
            _ => 0,
        }
    }
}

/// Which side(s) of a definitional-equality constraint to unfold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
pub enum UnfoldChoice {
    Left,
    Right,
    Both,
}

/// Compare the hints `h1` and `h2` of two definitions `f1` and `f2`.
///
/// Result is
/// - `< 0` if `f1` should be unfolded,
/// - `== 0` if both should be unfolded,
/// - `> 0` if `f2` should be unfolded.
///
/// Between two regular hints the result is the sign of `height(h1) - height(h2)`.
/// Swapping the arguments negates the result.
pub fn compare(h1: &ReducibilityHints, h2: &ReducibilityHints) -> i32 {
    use ReducibilityHints::*;

    match (h1, h2) {
        (Opaque, Opaque) | (Abbreviation, Abbreviation) => 0,
        (Opaque, _) => 1,
        (_, Opaque) => -1,
        (Abbreviation, _) => -1,
        (_, Abbreviation) => 1,
        (Regular(a), Regular(b)) => match a.cmp(b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        },
    }
}

/// Typed reading of [`compare`].
pub fn unfold_choice(h1: &ReducibilityHints, h2: &ReducibilityHints) -> UnfoldChoice {
    match compare(h1, h2) {
        c if c < 0 => UnfoldChoice::Left,
        0 => UnfoldChoice::Both,
        _ => UnfoldChoice::Right,
    }
}
