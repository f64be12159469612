//! Trial evaluation with automatic rollback.

use planforge_core::domain::PlanningSolution;
use planforge_core::error::Result;

use super::ScoreDirector;

/// Borrows another director for one trial move and can roll it back.
///
/// Moves register an undo closure for every change they make. After the
/// trial is scored, [`undo_changes`](Self::undo_changes) replays those
/// closures newest first and re-notifies the inner director for every
/// entity the move touched.
///
/// ```
/// use planforge_core::domain::PlanningSolution;
/// use planforge_core::score::{HardSoftScore, Score};
/// use planforge_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Slot { nurse: Option<u32>, score: Option<HardSoftScore> }
///
/// impl PlanningSolution for Slot {
///     type Score = HardSoftScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let mut director = SimpleScoreDirector::new(
///     Slot { nurse: None, score: None },
///     |s: &Slot| HardSoftScore::of_hard(if s.nurse.is_some() { 0 } else { -1 }),
/// );
///
/// let mut trial = RecordingScoreDirector::new(&mut director);
/// trial.before_variable_changed(0, 0, "nurse");
/// trial.working_solution_mut().nurse = Some(4);
/// trial.after_variable_changed(0, 0, "nurse");
/// trial.register_undo(Box::new(|s: &mut Slot| s.nurse = None));
/// assert!(trial.calculate_score().is_feasible());
///
/// trial.undo_changes();
/// assert_eq!(trial.working_solution().nurse, None);
/// ```
pub struct RecordingScoreDirector<'a, S: PlanningSolution> {
    inner: &'a mut dyn ScoreDirector<S>,
    undo_log: Vec<Box<dyn FnOnce(&mut S) + Send>>,
    touched: Vec<(usize, usize)>,
}

impl<'a, S: PlanningSolution> RecordingScoreDirector<'a, S> {
    pub fn new(inner: &'a mut dyn ScoreDirector<S>) -> Self {
        Self {
            inner,
            undo_log: Vec::new(),
            touched: Vec::new(),
        }
    }

    /// Reverts every recorded change, newest first.
    pub fn undo_changes(&mut self) {
        for &(descriptor_index, entity_index) in &self.touched {
            self.inner
                .before_variable_changed(descriptor_index, entity_index, "");
        }
        while let Some(undo) = self.undo_log.pop() {
            undo(self.inner.working_solution_mut());
        }
        for (descriptor_index, entity_index) in self.touched.drain(..) {
            self.inner
                .after_variable_changed(descriptor_index, entity_index, "");
        }
    }

    /// Forgets the recording, keeping the changes.
    pub fn clear(&mut self) {
        self.undo_log.clear();
        self.touched.clear();
    }

    pub fn change_count(&self) -> usize {
        self.undo_log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_log.is_empty()
    }
}

impl<S: PlanningSolution> ScoreDirector<S> for RecordingScoreDirector<'_, S> {
    fn working_solution(&self) -> &S {
        self.inner.working_solution()
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.inner.working_solution_mut()
    }

    fn calculate_score(&mut self) -> S::Score {
        self.inner.calculate_score()
    }

    fn try_calculate_score(&mut self) -> Result<S::Score> {
        self.inner.try_calculate_score()
    }

    fn clone_working_solution(&self) -> S {
        self.inner.clone_working_solution()
    }

    fn before_variable_changed(&mut self, descriptor_index: usize, entity_index: usize, name: &str) {
        self.inner
            .before_variable_changed(descriptor_index, entity_index, name);
    }

    fn after_variable_changed(&mut self, descriptor_index: usize, entity_index: usize, name: &str) {
        self.inner
            .after_variable_changed(descriptor_index, entity_index, name);
        if !self.touched.contains(&(descriptor_index, entity_index)) {
            self.touched.push((descriptor_index, entity_index));
        }
    }

    fn after_entity_added(&mut self, descriptor_index: usize, entity_index: usize) {
        self.inner.after_entity_added(descriptor_index, entity_index);
    }

    fn is_incremental(&self) -> bool {
        self.inner.is_incremental()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.clear();
    }

    fn register_undo(&mut self, undo: Box<dyn FnOnce(&mut S) + Send>) {
        self.undo_log.push(undo);
    }
}
