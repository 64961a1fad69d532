//! Declarative session configuration.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::session::Session;
use crate::validate::{CharacterClass, ClassFlag, ValidationPolicy};

/// Starting point for a session's validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PolicyPreset {
    /// Reject everything outside the letter tables (default).
    #[default]
    None,
    /// Drop everything outside the letter tables.
    IgnoreAll,
    /// Pass everything outside the letter tables through.
    AppendAll,
    /// A raw 64-bit policy word.
    Bits(u64),
}

impl PolicyPreset {
    /// Raw policy word of this preset.
    pub fn bits(self) -> u64 {
        match self {
            Self::None => 0,
            Self::IgnoreAll => ValidationPolicy::IGNORE_ALL_BITS,
            Self::AppendAll => ValidationPolicy::APPEND_ALL_BITS,
            Self::Bits(bits) => bits,
        }
    }
}

/// Error returned when parsing an unknown policy preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolicyError;

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown policy (expected none, ignore-all, append-all or a 0x-prefixed word)")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParsePolicyError {}

impl FromStr for PolicyPreset {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let hex: alloc::string::String = hex.chars().filter(|&c| c != '_').collect();
            return u64::from_str_radix(&hex, 16)
                .map(Self::Bits)
                .map_err(|_| ParsePolicyError);
        }
        const NAMES: [(&str, PolicyPreset); 4] = [
            ("none", PolicyPreset::None),
            ("reject", PolicyPreset::None),
            ("ignore-all", PolicyPreset::IgnoreAll),
            ("append-all", PolicyPreset::AppendAll),
        ];
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, preset)| preset)
            .ok_or(ParsePolicyError)
    }
}

/// One per-class adjustment applied on top of the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassOverride {
    /// Class to adjust.
    pub class: CharacterClass,
    /// Flag to give it.
    pub flag: ClassFlag,
}

/// Everything needed to build a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Dialect (default: unset)
    pub language: Language,
    /// Policy preset (default: none)
    pub policy: PolicyPreset,
    /// Per-class overrides, applied in order after the preset
    pub overrides: Vec<ClassOverride>,
}

impl SessionConfig {
    /// Configuration for `language` with the rejecting policy.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Russian with the rejecting policy.
    pub fn russian() -> Self {
        Self::new(Language::Russian)
    }

    /// Ukrainian with the rejecting policy.
    pub fn ukrainian() -> Self {
        Self::new(Language::Ukrainian)
    }

    /// Set the language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the policy preset.
    pub fn with_policy(mut self, policy: PolicyPreset) -> Self {
        self.policy = policy;
        self
    }

    /// Append a per-class override.
    pub fn with_override(mut self, class: CharacterClass, flag: ClassFlag) -> Self {
        self.overrides.push(ClassOverride { class, flag });
        self
    }

    /// Build a session.
    ///
    /// A misconfigured preset word is still installed; the session's
    /// [`last_error`](Session::last_error) reports it.
    pub fn build(&self) -> Session {
        let mut session = Session::new(self.language);
        session.set_policy_bits(self.policy.bits());
        for o in &self.overrides {
            session.set_class(o.class, o.flag);
        }
        session
    }
}
