//! Declarative macros shared by the fixed-arity score types.
//!
//! A field-based score lists its levels once, most significant first, each
//! with its [`ScoreLevel`](super::ScoreLevel) and text suffix. `level_score!`
//! turns that list into the struct, its constructors, the `Score` impl,
//! ordering, arithmetic, formatting and parsing.

/// Lexicographic `Ord` plus componentwise `Add`, `Sub` and `Neg`.
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        impl Ord for $type {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                std::cmp::Ordering::Equal
                    $(.then_with(|| self.$field.cmp(&other.$field)))+
            }
        }

        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::$ctor( $(self.$field + other.$field),+ )
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::$ctor( $(self.$field - other.$field),+ )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::$ctor( $(-self.$field),+ )
            }
        }
    };
}

/// Scaling methods of `Score`; expands inside the trait impl.
macro_rules! impl_score_scale {
    ($type:ident { $($field:ident),+ } => $ctor:ident) => {
        fn multiply(&self, multiplicand: f64) -> Self {
            $type::$ctor( $( (self.$field as f64 * multiplicand).round() as i64 ),+ )
        }

        fn divide(&self, divisor: f64) -> Self {
            $type::$ctor( $( (self.$field as f64 / divisor).round() as i64 ),+ )
        }

        fn abs(&self) -> Self {
            $type::$ctor( $( self.$field.abs() ),+ )
        }
    };
}

/// `ParseableScore` for slash-separated text such as `0hard/-3soft`.
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ } => $ctor:ident) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::score::traits::ScoreParseError> {
                use $crate::score::traits::ScoreParseError;

                let s = s.trim();
                let parts: Vec<&str> = s.split('/').collect();
                let suffixes: &[&str] = &[ $($suffix),+ ];

                if parts.len() != suffixes.len() {
                    return Err(ScoreParseError::new(format!(
                        "invalid {} '{}': expected {} parts separated by '/'",
                        stringify!($type),
                        s,
                        suffixes.len()
                    )));
                }

                let mut parts = parts.into_iter();
                $(
                    let $field = {
                        let part = parts.next().unwrap_or_default().trim();
                        let digits = part.strip_suffix($suffix).ok_or_else(|| {
                            ScoreParseError::new(format!(
                                "{} part '{}' must end with '{}'",
                                stringify!($field), part, $suffix
                            ))
                        })?;
                        digits.parse::<i64>().map_err(|e| {
                            ScoreParseError::new(format!(
                                "invalid {} level '{}': {}",
                                $suffix, digits, e
                            ))
                        })?
                    };
                )+

                Ok($type::$ctor( $($field),+ ))
            }

            fn to_string_repr(&self) -> String {
                let parts: Vec<String> = vec![ $(format!("{}{}", self.$field, $suffix)),+ ];
                parts.join("/")
            }
        }
    };
}

/// Declares a field-based score type from its level list.
///
/// ```ignore
/// level_score! {
///     /// Docs for the type.
///     HardSoftScore { hard: Hard => "hard", soft: Soft => "soft" }
/// }
/// ```
macro_rules! level_score {
    (
        $(#[$meta:meta])*
        $type:ident { $($field:ident : $level:ident => $suffix:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $type {
            $($field: i64),+
        }

        impl $type {
            /// Every level at zero.
            pub const ZERO: $type = $type { $($field: 0),+ };

            /// Every level at `i64::MIN`. Only for seeding comparisons.
            pub const MIN: $type = $type { $($field: i64::MIN),+ };

            const LEVELS: &'static [$crate::score::ScoreLevel] =
                &[$($crate::score::ScoreLevel::$level),+];

            /// Builds a score from its levels, most significant first.
            #[inline]
            pub const fn of($($field: i64),+) -> Self {
                $type { $($field),+ }
            }

            $(
                #[doc = concat!("The `", $suffix, "` level.")]
                #[inline]
                pub const fn $field(&self) -> i64 {
                    self.$field
                }
            )+
        }

        impl $crate::score::traits::Score for $type {
            fn is_feasible(&self) -> bool {
                true $(&& (!matches!($crate::score::ScoreLevel::$level, $crate::score::ScoreLevel::Hard)
                    || self.$field >= 0))+
            }

            #[inline]
            fn zero() -> Self {
                $type::ZERO
            }

            #[inline]
            fn min_value() -> Self {
                $type::MIN
            }

            #[inline]
            fn levels_count() -> usize {
                Self::LEVELS.len()
            }

            fn to_level_numbers(&self) -> Vec<i64> {
                vec![$(self.$field),+]
            }

            fn from_level_numbers(levels: &[i64]) -> Self {
                assert_eq!(
                    levels.len(),
                    Self::LEVELS.len(),
                    "{} takes {} levels",
                    stringify!($type),
                    Self::LEVELS.len()
                );
                let mut levels = levels.iter().copied();
                $type { $($field: levels.next().unwrap_or_default()),+ }
            }

            impl_score_scale!($type { $($field),+ } => of);

            fn level_label(index: usize) -> $crate::score::ScoreLevel {
                match Self::LEVELS.get(index) {
                    Some(level) => *level,
                    None => panic!(
                        "{} has {} levels, got index {}",
                        stringify!($type),
                        Self::LEVELS.len(),
                        index
                    ),
                }
            }
        }

        impl_score_ops!($type { $($field),+ } => of);
        impl_score_parse!($type { $($field => $suffix),+ } => of);

        impl std::fmt::Debug for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut tuple = f.debug_tuple(stringify!($type));
                $(tuple.field(&self.$field);)+
                tuple.finish()
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::score::traits::ParseableScore::to_string_repr(self))
            }
        }
    };
}

