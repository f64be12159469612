//! Tests for score types.

use super::*;

// ============================================================================
// HardSoftScore Tests
// ============================================================================

mod hard_soft_score {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_creation() {
        let score = HardSoftScore::of(-2, -100);
        assert_eq!(score.hard(), -2);
        assert_eq!(score.soft(), -100);
        assert_eq!(HardSoftScore::of_hard(-2), HardSoftScore::of(-2, 0));
        assert_eq!(HardSoftScore::of_soft(-7), HardSoftScore::of(0, -7));
    }

    #[test]
    fn test_feasibility() {
        assert!(HardSoftScore::of(0, -1000).is_feasible());
        assert!(HardSoftScore::of(10, -50).is_feasible());
        assert!(!HardSoftScore::of(-1, 0).is_feasible());
    }

    #[test]
    fn test_comparison_is_lexicographic() {
        let infeasible = HardSoftScore::of(-1, 0);
        let feasible = HardSoftScore::of(0, -1000);
        assert!(feasible > infeasible);
        assert!(feasible.is_better_than(&infeasible));
        assert!(infeasible.is_worse_than(&feasible));

        let s1 = HardSoftScore::of(0, -100);
        let s2 = HardSoftScore::of(0, -50);
        assert_eq!(s2.compare(&s1), Ordering::Greater);
        assert!(s2.is_equal_to(&HardSoftScore::of(0, -50)));
    }

    #[test]
    fn test_arithmetic() {
        let s1 = HardSoftScore::of(-1, -100);
        let s2 = HardSoftScore::of(-2, -50);

        assert_eq!(s1 + s2, HardSoftScore::of(-3, -150));
        assert_eq!(s1 - s2, HardSoftScore::of(1, -50));
        assert_eq!(-s1, HardSoftScore::of(1, 100));
        assert_eq!(s1.abs(), HardSoftScore::of(1, 100));
    }

    #[test]
    fn test_multiply_divide() {
        let score = HardSoftScore::of(-3, 10);
        assert_eq!(score.multiply(2.0), HardSoftScore::of(-6, 20));
        assert_eq!(score.divide(2.0), HardSoftScore::of(-2, 5));
    }

    #[test]
    fn test_min_value_is_below_everything() {
        let min = HardSoftScore::min_value();
        assert!(HardSoftScore::of(i64::MIN, i64::MIN + 1) > min);
        assert!(HardSoftScore::of(-1_000_000, -1_000_000) > min);
        assert_eq!(min, HardSoftScore::MIN);
    }

    #[test]
    fn test_parse_and_display() {
        let score = HardSoftScore::parse("-1hard/-20soft").unwrap();
        assert_eq!(score, HardSoftScore::of(-1, -20));
        assert_eq!(score.to_string(), "-1hard/-20soft");
        assert_eq!(score.to_string_repr(), "-1hard/-20soft");

        assert!(HardSoftScore::parse("-1hard").is_err());
        assert!(HardSoftScore::parse("-1medium/0soft").is_err());
        assert!(HardSoftScore::parse("xhard/0soft").is_err());
    }

    #[test]
    fn test_level_numbers() {
        let score = HardSoftScore::of(-1, -5);
        assert_eq!(score.to_level_numbers(), vec![-1, -5]);
        assert_eq!(HardSoftScore::from_level_numbers(&[-1, -5]), score);
        assert_eq!(HardSoftScore::levels_count(), 2);
        assert_eq!(HardSoftScore::level_label(0), ScoreLevel::Hard);
        assert_eq!(HardSoftScore::level_label(1), ScoreLevel::Soft);
    }
}

// ============================================================================
// HardMediumSoftScore Tests
// ============================================================================

mod hard_medium_soft_score {
    use super::*;

    #[test]
    fn test_medium_outranks_soft() {
        let s1 = HardMediumSoftScore::of(0, -10, 0);
        let s2 = HardMediumSoftScore::of(0, -5, -1000);
        assert!(s2 > s1);
        assert!(HardMediumSoftScore::of(-1, 0, 0) < s1);
    }

    #[test]
    fn test_parse_round_trip_format() {
        let score = HardMediumSoftScore::parse("0hard/-2medium/-30soft").unwrap();
        assert_eq!(score, HardMediumSoftScore::of(0, -2, -30));
        assert_eq!(score.to_string(), "0hard/-2medium/-30soft");
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(HardMediumSoftScore::levels_count(), 3);
        assert_eq!(HardMediumSoftScore::level_label(1), ScoreLevel::Medium);
        assert!(HardMediumSoftScore::of(1, 0, 0) > HardMediumSoftScore::min_value());
    }
}

// ============================================================================
// BendableScore Tests
// ============================================================================

mod bendable_score {
    use super::*;

    type Score23 = BendableScore<2, 3>;

    #[test]
    fn test_comparison_across_levels() {
        let a = Score23::of([0, -1], [0, 0, 0]);
        let b = Score23::of([-1, 0], [100, 100, 100]);
        let c = Score23::of([0, -1], [0, 0, 1]);

        assert!(a > b);
        assert!(c > a);
        assert!(b > Score23::min_value());
    }

    #[test]
    fn test_componentwise_arithmetic() {
        let a = Score23::of([1, -2], [3, -4, 5]);
        let b = Score23::of([-1, -1], [1, 1, 1]);

        assert_eq!(a + b, Score23::of([0, -3], [4, -3, 6]));
        assert_eq!(a - b, Score23::of([2, -1], [2, -5, 4]));
        assert_eq!(-a, Score23::of([-1, 2], [-3, 4, -5]));
    }

    #[test]
    fn test_feasibility_checks_every_hard_level() {
        assert!(Score23::of([0, 0], [-5, -5, -5]).is_feasible());
        assert!(!Score23::of([0, -1], [0, 0, 0]).is_feasible());
    }

    #[test]
    fn test_level_numbers() {
        let score = Score23::of([1, 2], [3, 4, 5]);
        assert_eq!(score.to_level_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Score23::from_level_numbers(&[1, 2, 3, 4, 5]), score);
        assert_eq!(Score23::level_label(1), ScoreLevel::Hard);
        assert_eq!(Score23::level_label(2), ScoreLevel::Soft);
    }

    #[test]
    fn test_parse_and_display() {
        let score = Score23::parse("[0/-1]hard/[-5/0/-7]soft").unwrap();
        assert_eq!(score, Score23::of([0, -1], [-5, 0, -7]));
        assert_eq!(score.to_string(), "[0/-1]hard/[-5/0/-7]soft");

        assert!(Score23::parse("[0]hard/[-5/0/-7]soft").is_err());
        assert!(Score23::parse("0hard/0soft").is_err());
    }
}
