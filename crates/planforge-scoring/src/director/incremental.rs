//! Incremental score director for delta scoring.
//!
//! The director forwards change notifications to an
//! [`IncrementalScoreCalculator`], which retracts an entity's contribution
//! before a change and inserts it again afterwards. Only the first score
//! call after construction or [`reset`](ScoreDirector::reset) scans the
//! whole solution.

use planforge_core::domain::PlanningSolution;
use planforge_core::error::Result;
use planforge_core::score::Score;

use super::traits::ScoreDirector;

/// Score calculator maintaining its own running total.
///
/// # Example
///
/// ```
/// use planforge_core::domain::PlanningSolution;
/// use planforge_core::score::HardSoftScore;
/// use planforge_scoring::{IncrementalScoreCalculator, IncrementalScoreDirector, ScoreDirector};
///
/// #[derive(Clone)]
/// struct Plan { values: Vec<Option<i64>>, score: Option<HardSoftScore> }
///
/// impl PlanningSolution for Plan {
///     type Score = HardSoftScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// #[derive(Default)]
/// struct Unassigned { count: i64 }
///
/// impl IncrementalScoreCalculator<Plan> for Unassigned {
///     fn reset_working_solution(&mut self, solution: &Plan) {
///         self.count = solution.values.iter().filter(|v| v.is_none()).count() as i64;
///     }
///     fn before_entity_changed(&mut self, solution: &Plan, _: usize, entity_index: usize) {
///         if solution.values[entity_index].is_none() { self.count -= 1; }
///     }
///     fn after_entity_changed(&mut self, solution: &Plan, _: usize, entity_index: usize) {
///         if solution.values[entity_index].is_none() { self.count += 1; }
///     }
///     fn calculate_score(&self) -> HardSoftScore {
///         HardSoftScore::of_hard(-self.count)
///     }
/// }
///
/// let plan = Plan { values: vec![None, Some(1)], score: None };
/// let mut director = IncrementalScoreDirector::new(plan, Unassigned::default());
/// assert_eq!(director.calculate_score(), HardSoftScore::of_hard(-1));
///
/// director.before_variable_changed(0, 0, "value");
/// director.working_solution_mut().values[0] = Some(2);
/// director.after_variable_changed(0, 0, "value");
/// assert_eq!(director.calculate_score(), HardSoftScore::ZERO);
/// ```
pub trait IncrementalScoreCalculator<S: PlanningSolution>: Send {
    /// Rebuilds all internal state from scratch.
    fn reset_working_solution(&mut self, solution: &S);

    /// Retracts the entity's current contribution.
    fn before_entity_changed(&mut self, solution: &S, descriptor_index: usize, entity_index: usize);

    /// Inserts the entity's new contribution.
    fn after_entity_changed(&mut self, solution: &S, descriptor_index: usize, entity_index: usize);

    /// Inserts a freshly appended entity.
    fn after_entity_added(&mut self, solution: &S, descriptor_index: usize, entity_index: usize) {
        self.after_entity_changed(solution, descriptor_index, entity_index);
    }

    /// Returns the running score.
    fn calculate_score(&self) -> S::Score;

    /// Returns the running score, reporting evaluation failures.
    fn try_calculate_score(&self) -> Result<S::Score> {
        Ok(self.calculate_score())
    }
}

/// Score director delegating to an [`IncrementalScoreCalculator`].
pub struct IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    working_solution: S,
    calculator: C,
    // False until the first full scan; notifications are ignored before it.
    initialized: bool,
}

impl<S, C> IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    /// Creates a new director; the first score call performs the full scan.
    pub fn new(solution: S, calculator: C) -> Self {
        Self {
            working_solution: solution,
            calculator,
            initialized: false,
        }
    }

    /// Returns a reference to the calculator.
    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Returns whether the full scan has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Consumes the director and returns the working solution.
    pub fn take_solution(self) -> S {
        self.working_solution
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.calculator.reset_working_solution(&self.working_solution);
            self.initialized = true;
        }
    }
}

impl<S, C> std::fmt::Debug for IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    C: IncrementalScoreCalculator<S>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalScoreDirector")
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl<S, C> ScoreDirector<S> for IncrementalScoreDirector<S, C>
where
    S: PlanningSolution,
    S::Score: Score,
    C: IncrementalScoreCalculator<S>,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        self.ensure_initialized();
        let score = self.calculator.calculate_score();
        self.working_solution.set_score(Some(score));
        score
    }

    fn try_calculate_score(&mut self) -> Result<S::Score> {
        self.ensure_initialized();
        let score = self.calculator.try_calculate_score()?;
        self.working_solution.set_score(Some(score));
        Ok(score)
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        if !self.initialized {
            return;
        }
        self.calculator
            .before_entity_changed(&self.working_solution, descriptor_index, entity_index);
    }

    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        _variable_name: &str,
    ) {
        if !self.initialized {
            return;
        }
        self.calculator
            .after_entity_changed(&self.working_solution, descriptor_index, entity_index);
    }

    fn after_entity_added(&mut self, descriptor_index: usize, entity_index: usize) {
        if !self.initialized {
            return;
        }
        self.calculator
            .after_entity_added(&self.working_solution, descriptor_index, entity_index);
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.initialized = false;
    }
}
