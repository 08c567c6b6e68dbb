use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown {kind} '{value}'. Expected one of: {}", .expected.join(", "))]
pub struct LevelParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

/// An enum persisted as a small numeric code.
///
/// `TABLE` is the only place a variant is paired with its code and its CLI label, so
/// the encode and decode paths can never disagree about the mapping.
pub trait Coded: Copy + PartialEq + Sized + 'static {
    const KIND: &'static str;
    const TABLE: &'static [(Self, u8, &'static str)];
    /// Variant used when a stored code is missing or unknown
    const FALLBACK: Self;

    fn code(self) -> u8 {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, code, _)| *code)
            .unwrap_or(0)
    }

    fn label(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, _, label)| *label)
            .unwrap_or("unknown")
    }

    fn from_code(raw: &str) -> Self {
        raw.parse::<u8>()
            .ok()
            .and_then(|code| Self::TABLE.iter().find(|(_, c, _)| *c == code))
            .map(|(variant, _, _)| *variant)
            .unwrap_or(Self::FALLBACK)
    }

    fn from_label(raw: &str) -> Result<Self, LevelParseError> {
        let wanted = raw.trim().to_lowercase().replace('_', "-");
        Self::TABLE
            .iter()
            .find(|(_, _, label)| *label == wanted)
            .map(|(variant, _, _)| *variant)
            .ok_or_else(|| LevelParseError {
                kind: Self::KIND,
                value: raw.to_string(),
                expected: Self::TABLE.iter().map(|(_, _, label)| *label).collect(),
            })
    }
}

/// Implements `FromStr` and `Display` for `Coded` enums through their label column.
macro_rules! label_conversions {
    ($($ty:ty),*) => {$(
        impl std::str::FromStr for $ty {
            type Err = $crate::models::coded::LevelParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::models::coded::Coded>::from_label(s)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(<$ty as $crate::models::coded::Coded>::label(*self))
            }
        }
    )*};
}

pub(crate) use label_conversions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        mood::Mood,
        task::{Difficulty, Priority},
    };

    fn assert_table_is_bijective<T: Coded + std::fmt::Debug>() {
        for (variant, code, label) in T::TABLE {
            assert_eq!(variant.code(), *code);
            assert_eq!(T::from_code(&code.to_string()), *variant);
            assert_eq!(variant.label(), *label);
            assert_eq!(T::from_label(label).unwrap(), *variant);
        }
    }

    #[test]
    fn test_tables_are_bijective() {
        assert_table_is_bijective::<Priority>();
        assert_table_is_bijective::<Difficulty>();
        assert_table_is_bijective::<Mood>();
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        assert_eq!(Priority::from_code("9"), Priority::Medium);
        assert_eq!(Difficulty::from_code(""), Difficulty::Medium);
        assert_eq!(Mood::from_code("abc"), Mood::Neutral);
    }

    #[test]
    fn test_label_parsing_is_lenient_about_case_and_separator() {
        assert_eq!(Mood::from_label("Very_Low").unwrap(), Mood::VeryLow);
        assert_eq!(Priority::from_label(" HIGH ").unwrap(), Priority::High);

        let err = Difficulty::from_label("brutal").unwrap_err();
        assert_eq!(err.kind, "difficulty");
        assert_eq!(err.expected, vec!["easy", "medium", "hard"]);
    }
}
