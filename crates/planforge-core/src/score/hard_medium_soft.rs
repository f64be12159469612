//! Three-level score with a medium level between hard and soft.

level_score! {
    /// Hard, medium and soft constraint totals, compared in that order.
    ///
    /// Medium usually carries "assign as much as possible" style goals that
    /// must outrank plain preferences.
    ///
    /// ```
    /// use planforge_core::HardMediumSoftScore;
    ///
    /// let fewer_open = HardMediumSoftScore::of(0, -5, -200);
    /// let more_open = HardMediumSoftScore::of(0, -10, -100);
    /// assert!(fewer_open > more_open);
    /// ```
    HardMediumSoftScore {
        hard: Hard => "hard",
        medium: Medium => "medium",
        soft: Soft => "soft",
    }
}
