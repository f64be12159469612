//! BendableScore - Fixed-arity score with H hard and S soft levels

use std::array;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::traits::{ParseableScore, Score, ScoreParseError};
use super::ScoreLevel;

/// A score with `H` hard levels followed by `S` soft levels.
///
/// The arity is part of the type, so two scores of the same problem always
/// have the same number of levels and stay `Copy`.
///
/// # Examples
///
/// ```
/// use planforge_core::score::{BendableScore, Score};
///
/// let score = BendableScore::<2, 3>::of([-1, -2], [-10, -20, -30]);
///
/// assert_eq!(BendableScore::<2, 3>::levels_count(), 5);
/// assert!(!score.is_feasible());
/// assert!(BendableScore::of([0, -5], [0, 0, 0]) > BendableScore::of([-1, 0], [0, 0, 0]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BendableScore<const H: usize, const S: usize> {
    hard: [i64; H],
    soft: [i64; S],
}

impl<const H: usize, const S: usize> BendableScore<H, S> {
    /// Creates a score from its hard and soft levels.
    pub const fn of(hard: [i64; H], soft: [i64; S]) -> Self {
        BendableScore { hard, soft }
    }

    /// Returns the hard score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn hard_score(&self, level: usize) -> i64 {
        self.hard[level]
    }

    /// Returns the soft score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn soft_score(&self, level: usize) -> i64 {
        self.soft[level]
    }

    /// Returns all hard scores as a slice.
    pub fn hard_scores(&self) -> &[i64] {
        &self.hard
    }

    /// Returns all soft scores as a slice.
    pub fn soft_scores(&self) -> &[i64] {
        &self.soft
    }

    fn map(&self, f: impl Fn(i64) -> i64) -> Self {
        BendableScore {
            hard: array::from_fn(|i| f(self.hard[i])),
            soft: array::from_fn(|i| f(self.soft[i])),
        }
    }

    fn zip(&self, other: &Self, f: impl Fn(i64, i64) -> i64) -> Self {
        BendableScore {
            hard: array::from_fn(|i| f(self.hard[i], other.hard[i])),
            soft: array::from_fn(|i| f(self.soft[i], other.soft[i])),
        }
    }
}

impl<const H: usize, const S: usize> Default for BendableScore<H, S> {
    fn default() -> Self {
        BendableScore {
            hard: [0; H],
            soft: [0; S],
        }
    }
}

impl<const H: usize, const S: usize> Score for BendableScore<H, S> {
    fn is_feasible(&self) -> bool {
        self.hard.iter().all(|&s| s >= 0)
    }

    fn zero() -> Self {
        BendableScore::default()
    }

    fn min_value() -> Self {
        BendableScore {
            hard: [i64::MIN; H],
            soft: [i64::MIN; S],
        }
    }

    fn levels_count() -> usize {
        H + S
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        self.hard.iter().chain(self.soft.iter()).copied().collect()
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        assert_eq!(
            levels.len(),
            H + S,
            "BendableScore<{}, {}> requires exactly {} levels",
            H,
            S,
            H + S
        );
        BendableScore {
            hard: array::from_fn(|i| levels[i]),
            soft: array::from_fn(|i| levels[H + i]),
        }
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        self.map(|v| (v as f64 * multiplicand).round() as i64)
    }

    fn divide(&self, divisor: f64) -> Self {
        self.map(|v| (v as f64 / divisor).round() as i64)
    }

    fn abs(&self) -> Self {
        self.map(i64::abs)
    }

    fn level_label(index: usize) -> ScoreLevel {
        if index < H {
            ScoreLevel::Hard
        } else if index < H + S {
            ScoreLevel::Soft
        } else {
            panic!("BendableScore has {} levels, got index {}", H + S, index)
        }
    }
}

impl<const H: usize, const S: usize> Add for BendableScore<H, S> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip(&other, |a, b| a + b)
    }
}

impl<const H: usize, const S: usize> Sub for BendableScore<H, S> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip(&other, |a, b| a - b)
    }
}

impl<const H: usize, const S: usize> Neg for BendableScore<H, S> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

fn join_levels(levels: &[i64]) -> String {
    levels
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

impl<const H: usize, const S: usize> fmt::Debug for BendableScore<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BendableScore({:?}, {:?})", self.hard, self.soft)
    }
}

impl<const H: usize, const S: usize> fmt::Display for BendableScore<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]hard/[{}]soft",
            join_levels(&self.hard),
            join_levels(&self.soft)
        )
    }
}

fn parse_bracketed<const N: usize>(
    part: &str,
    suffix: &str,
) -> Result<[i64; N], ScoreParseError> {
    let inner = part
        .strip_suffix(suffix)
        .and_then(|p| p.strip_prefix('['))
        .and_then(|p| p.strip_suffix(']'))
        .ok_or_else(|| {
            ScoreParseError::new(format!("'{}' must look like '[..]{}'", part, suffix))
        })?;

    let values: Vec<i64> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner
            .split('/')
            .map(|v| {
                v.trim().parse::<i64>().map_err(|e| {
                    ScoreParseError::new(format!("invalid {} level '{}': {}", suffix, v, e))
                })
            })
            .collect::<Result<_, _>>()?
    };

    <[i64; N]>::try_from(values).map_err(|values| {
        ScoreParseError::new(format!(
            "expected {} {} levels, got {}",
            N,
            suffix,
            values.len()
        ))
    })
}

impl<const H: usize, const S: usize> ParseableScore for BendableScore<H, S> {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let split = s.find("hard/").ok_or_else(|| {
            ScoreParseError::new(format!("invalid BendableScore '{}': missing 'hard/'", s))
        })?;
        let (hard_part, soft_part) = s.split_at(split + "hard".len());
        let soft_part = &soft_part[1..];

        Ok(BendableScore {
            hard: parse_bracketed::<H>(hard_part, "hard")?,
            soft: parse_bracketed::<S>(soft_part, "soft")?,
        })
    }

    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}
