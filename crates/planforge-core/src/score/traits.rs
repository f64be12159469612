//! The `Score` abstraction shared by every score type.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

use super::ScoreLevel;

/// A fixed-arity, lexicographically ordered tuple of `i64` levels.
///
/// Higher is better. Arithmetic is componentwise and never saturates, so
/// the sentinel from [`Score::min_value`] must stay out of it.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// True when no hard level is negative.
    fn is_feasible(&self) -> bool;

    /// All levels zero.
    fn zero() -> Self;

    /// Every level at `i64::MIN`, below any evaluated score.
    ///
    /// Negating or subtracting it overflows.
    fn min_value() -> Self;

    /// Number of levels; `H + S` for `BendableScore<H, S>`.
    fn levels_count() -> usize;

    /// The levels, most significant first.
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Inverse of [`Score::to_level_numbers`].
    ///
    /// # Panics
    /// If `levels.len() != Self::levels_count()`.
    fn from_level_numbers(levels: &[i64]) -> Self;

    /// Scales every level, rounding to the nearest integer.
    fn multiply(&self, multiplicand: f64) -> Self;

    fn divide(&self, divisor: f64) -> Self;

    fn abs(&self) -> Self;

    /// Meaning of the level at `index`.
    ///
    /// # Panics
    /// If `index >= Self::levels_count()`.
    fn level_label(index: usize) -> ScoreLevel;

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }

    fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }
}

/// Scores with a text form, such as `0hard/-100soft` or
/// `[0/-1]hard/[-5/0/-7]soft`.
pub trait ParseableScore: Score {
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Same text as `Display`; `parse` accepts it back.
    fn to_string_repr(&self) -> String;
}

/// Malformed score text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse score: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

impl ScoreParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
