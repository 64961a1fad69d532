//! Dialect selection.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cyrillic dialect used to resolve mixed letters.
///
/// Both engines refuse to run while the language is [`Language::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    /// No dialect selected.
    #[default]
    Unset,
    /// Russian alphabet.
    Russian,
    /// Ukrainian alphabet.
    Ukrainian,
}

impl Language {
    /// `true` when a dialect has been selected.
    #[inline]
    pub fn is_set(self) -> bool {
        self != Self::Unset
    }

    /// `true` for [`Language::Ukrainian`].
    #[inline]
    pub fn is_ukrainian(self) -> bool {
        self == Self::Ukrainian
    }

    /// Short tag used by the CLI and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Russian => "ru",
            Self::Ukrainian => "uk",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown language name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLanguageError;

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown language (expected ru, uk or unset)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    /// Accepts ISO tags, English names and the transliterated native names,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, Language); 10] = [
            ("unset", Language::Unset),
            ("none", Language::Unset),
            ("ru", Language::Russian),
            ("russian", Language::Russian),
            ("rysskui", Language::Russian),
            ("uk", Language::Ukrainian),
            ("ua", Language::Ukrainian),
            ("ukrainian", Language::Ukrainian),
            ("ykrajinsqka", Language::Ukrainian),
            ("ukr", Language::Ukrainian),
        ];
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, language)| language)
            .ok_or(ParseLanguageError)
    }
}
