//! Two-level score: hard levels decide feasibility, soft levels rank the
//! feasible solutions.

level_score! {
    /// Hard and soft constraint totals.
    ///
    /// The hard level always dominates, so any feasible roster beats any
    /// infeasible one no matter how bad its soft level is.
    ///
    /// ```
    /// use planforge_core::HardSoftScore;
    ///
    /// let broken = HardSoftScore::of(-1, 0);
    /// let feasible = HardSoftScore::of(0, -200);
    /// assert!(feasible > broken);
    /// assert!(HardSoftScore::of(0, -50) > feasible);
    /// assert_eq!(feasible.to_string(), "0hard/-200soft");
    /// ```
    HardSoftScore { hard: Hard => "hard", soft: Soft => "soft" }
}

impl HardSoftScore {
    /// A score with only the hard level set.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        Self::of(hard, 0)
    }

    /// A score with only the soft level set.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        Self::of(0, soft)
    }
}
