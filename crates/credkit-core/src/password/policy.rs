//! Strength policy for user-chosen passwords.
//!
//! Length is counted in Unicode scalar values, not bytes. Character
//! classes follow the Unicode general category, so `É` counts as
//! uppercase and `٣` as a number. Format, mark, separator, control and
//! private-use characters belong to no class.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Default minimum length.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Default maximum length.
pub const DEFAULT_MAX_LENGTH: usize = 128;

/// A class of characters a policy can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// Uppercase letter.
    Uppercase,
    /// Lowercase letter.
    Lowercase,
    /// Numeric character.
    Number,
    /// Punctuation (`P*`) or symbol (`S*`).
    Special,
}

impl CharacterClass {
    /// Classify `c` by its general category: `Lu`, `Ll`, `N*`, then `P*`/`S*`.
    #[must_use]
    pub fn of(c: char) -> Option<Self> {
        use GeneralCategory as Gc;
        match get_general_category(c) {
            Gc::UppercaseLetter => Some(Self::Uppercase),
            Gc::LowercaseLetter => Some(Self::Lowercase),
            Gc::DecimalNumber | Gc::LetterNumber | Gc::OtherNumber => Some(Self::Number),
            Gc::ConnectorPunctuation
            | Gc::DashPunctuation
            | Gc::OpenPunctuation
            | Gc::ClosePunctuation
            | Gc::InitialPunctuation
            | Gc::FinalPunctuation
            | Gc::OtherPunctuation
            | Gc::MathSymbol
            | Gc::CurrencySymbol
            | Gc::ModifierSymbol
            | Gc::OtherSymbol => Some(Self::Special),
            _ => None,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uppercase => "uppercase letter",
            Self::Lowercase => "lowercase letter",
            Self::Number => "number",
            Self::Special => "special character",
        })
    }
}

/// Policy violations. Only the first failing stage is reported, but
/// [`PolicyError::MissingClasses`] lists every missing class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Fewer characters than `min`.
    #[error("password must be at least {min} characters long (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// More characters than `max`.
    #[error("password must not exceed {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Required character classes that do not occur.
    #[error("password must contain at least one {}", join_classes(.0))]
    MissingClasses(Vec<CharacterClass>),
}

fn join_classes(classes: &[CharacterClass]) -> String {
    classes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Requirements a password must meet.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// Minimum number of characters.
    pub min_length: usize,
    /// Maximum number of characters.
    pub max_length: usize,
    /// Require at least one uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one lowercase letter.
    pub require_lowercase: bool,
    /// Require at least one number.
    pub require_digit: bool,
    /// Require at least one punctuation or symbol character.
    pub require_special: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PolicyConfig {
    #[must_use]
    pub const fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    #[must_use]
    pub const fn without_uppercase(mut self) -> Self {
        self.require_uppercase = false;
        self
    }

    #[must_use]
    pub const fn without_lowercase(mut self) -> Self {
        self.require_lowercase = false;
        self
    }

    #[must_use]
    pub const fn without_digit(mut self) -> Self {
        self.require_digit = false;
        self
    }

    #[must_use]
    pub const fn without_special(mut self) -> Self {
        self.require_special = false;
        self
    }

    fn required(&self) -> impl Iterator<Item = CharacterClass> {
        [
            (self.require_uppercase, CharacterClass::Uppercase),
            (self.require_lowercase, CharacterClass::Lowercase),
            (self.require_digit, CharacterClass::Number),
            (self.require_special, CharacterClass::Special),
        ]
        .into_iter()
        .filter(|(required, _)| *required)
        .map(|(_, class)| class)
    }
}

/// Check `password` against `config`.
///
/// # Errors
///
/// Returns the first violated rule: length bounds, then character classes.
pub fn check(password: &str, config: &PolicyConfig) -> Result<(), PolicyError> {
    let actual = password.chars().count();
    if actual < config.min_length {
        return Err(PolicyError::TooShort {
            min: config.min_length,
            actual,
        });
    }
    if actual > config.max_length {
        return Err(PolicyError::TooLong {
            max: config.max_length,
            actual,
        });
    }

    let present: Vec<CharacterClass> = password.chars().filter_map(CharacterClass::of).collect();
    let missing: Vec<CharacterClass> = config
        .required()
        .filter(|class| !present.contains(class))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PolicyError::MissingClasses(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_with_defaults() {
        check("Test123!@#", &PolicyConfig::default()).unwrap();
    }

    #[test]
    fn too_short() {
        let err = check("Test1!", &PolicyConfig::default()).unwrap_err();
        assert_eq!(err, PolicyError::TooShort { min: 8, actual: 6 });
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn too_long() {
        let err = check(&"a".repeat(129), &PolicyConfig::default()).unwrap_err();
        assert!(matches!(err, PolicyError::TooLong { max: 128, actual: 129 }));
        assert!(err.to_string().contains("must not exceed 128 characters"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 8 characters, 14 bytes.
        let config = PolicyConfig::default().with_max_length(8);
        let err = check("ÄÖÜäöü1!", &config);
        assert!(err.is_ok(), "{err:?}");
    }

    #[test]
    fn without_uppercase() {
        check("test123!@#", &PolicyConfig::default().without_uppercase()).unwrap();
    }

    #[test]
    fn without_lowercase() {
        check("TEST123!@#", &PolicyConfig::default().without_lowercase()).unwrap();
    }

    #[test]
    fn without_digit() {
        check("TestTest!@#", &PolicyConfig::default().without_digit()).unwrap();
    }

    #[test]
    fn without_special() {
        check("Test1234", &PolicyConfig::default().without_special()).unwrap();
    }

    #[test]
    fn custom_min_length() {
        check("Test1!", &PolicyConfig::default().with_min_length(6)).unwrap();
    }

    #[test]
    fn multiple_relaxations() {
        let config = PolicyConfig::default()
            .with_min_length(4)
            .without_uppercase()
            .without_digit()
            .without_special();
        check("test", &config).unwrap();
    }

    #[test]
    fn reports_every_missing_class() {
        let err = check("lowercaseonly", &PolicyConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PolicyError::MissingClasses(vec![
                CharacterClass::Uppercase,
                CharacterClass::Number,
                CharacterClass::Special,
            ])
        );
        assert_eq!(
            err.to_string(),
            "password must contain at least one uppercase letter, number, special character"
        );
    }

    #[test]
    fn length_checked_before_classes() {
        let err = check("abc", &PolicyConfig::default()).unwrap_err();
        assert!(matches!(err, PolicyError::TooShort { .. }));
    }

    #[test]
    fn classify_unicode() {
        assert_eq!(CharacterClass::of('É'), Some(CharacterClass::Uppercase));
        assert_eq!(CharacterClass::of('ß'), Some(CharacterClass::Lowercase));
        assert_eq!(CharacterClass::of('٣'), Some(CharacterClass::Number));
        assert_eq!(CharacterClass::of('€'), Some(CharacterClass::Special));
        assert_eq!(CharacterClass::of(' '), None);
        assert_eq!(CharacterClass::of('日'), None);
        // Circled letters are symbols (So), not uppercase letters.
        assert_eq!(CharacterClass::of('Ⓐ'), Some(CharacterClass::Special));
        assert_eq!(CharacterClass::of('ǅ'), None);
    }

    #[test]
    fn invisible_characters_are_not_special() {
        for invisible in ['\u{200B}', '\u{301}', '\u{AD}', '\u{E000}'] {
            assert_eq!(CharacterClass::of(invisible), None, "{invisible:?}");
            let err = check(&format!("Password1{invisible}"), &PolicyConfig::default()).unwrap_err();
            assert_eq!(
                err,
                PolicyError::MissingClasses(vec![CharacterClass::Special]),
                "{invisible:?}"
            );
        }
    }

    #[test]
    fn whitespace_is_not_special() {
        let err = check("Test 1234", &PolicyConfig::default()).unwrap_err();
        assert_eq!(err, PolicyError::MissingClasses(vec![CharacterClass::Special]));
    }
}
