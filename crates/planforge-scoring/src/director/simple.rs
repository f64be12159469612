//! Full-recalculation score director.

use planforge_core::domain::PlanningSolution;

use super::traits::ScoreDirector;

/// Scores by running a plain function over the whole solution.
///
/// The last result is cached until the next change notification or mutable
/// access, so repeated score calls between moves are free.
///
/// ```
/// use planforge_core::domain::PlanningSolution;
/// use planforge_core::score::HardSoftScore;
/// use planforge_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Week { overtime: i64, score: Option<HardSoftScore> }
///
/// impl PlanningSolution for Week {
///     type Score = HardSoftScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let mut director = SimpleScoreDirector::new(
///     Week { overtime: 3, score: None },
///     |w: &Week| HardSoftScore::of_soft(-w.overtime),
/// );
/// assert_eq!(director.calculate_score(), HardSoftScore::of_soft(-3));
///
/// director.working_solution_mut().overtime = 1;
/// assert_eq!(director.calculate_score(), HardSoftScore::of_soft(-1));
/// ```
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    solution: S,
    calculator: C,
    // None whenever the solution may have changed since the last call.
    cached: Option<S::Score>,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    pub fn new(solution: S, calculator: C) -> Self {
        SimpleScoreDirector {
            solution,
            calculator,
            cached: None,
        }
    }

    /// Gives the working solution back, score field included.
    pub fn take_solution(self) -> S {
        self.solution
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.cached = None;
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if let Some(score) = self.cached {
            return score;
        }
        let score = (self.calculator)(&self.solution);
        self.solution.set_score(Some(score));
        self.cached = Some(score);
        score
    }

    fn clone_working_solution(&self) -> S {
        self.solution.clone()
    }

    fn before_variable_changed(&mut self, _: usize, _: usize, _: &str) {
        self.cached = None;
    }

    fn after_variable_changed(&mut self, _: usize, _: usize, _: &str) {
        self.cached = None;
    }

    fn reset(&mut self) {
        self.cached = None;
    }
}
