//! Validation policy for code units outside the letter tables.
//!
//! A [`ValidationPolicy`] is a 64-bit word split into two half-words:
//!
//! | Bits  | Half-word | Meaning when bit `i` is set            |
//! |-------|-----------|----------------------------------------|
//! | 0-31  | Ignore    | drop code units of class `i`           |
//! | 32-63 | Append    | pass code units of class `i` through   |
//!
//! With neither bit set a class is rejected. Both bits set is a
//! misconfiguration; such a class behaves as Ignore.
//!
//! The policy also carries a per-byte projection of the two half-words for
//! ASCII (two 128-bit maps), so the encoder answers "what happens to byte `b`"
//! with one bit test instead of scanning classes. Every mutator updates the
//! projection before returning.
//!
//! ```
//! use cyrtrans::validate::{CharacterClass, ClassAction, ClassFlag, ValidationPolicy};
//!
//! let mut policy = ValidationPolicy::NONE;
//! policy.set(CharacterClass::Space, ClassFlag::Append);
//! policy.set(CharacterClass::Digit, ClassFlag::Ignore);
//!
//! assert_eq!(policy.byte_action(b' '), ClassAction::Append);
//! assert_eq!(policy.byte_action(b'7'), ClassAction::Ignore);
//! assert_eq!(policy.byte_action(b','), ClassAction::Reject);
//! ```

mod class;

pub use class::{CharacterClass, ClassKind, ParseClassError, CLASS_COUNT};

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Requested setting for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClassFlag {
    /// Clear both bits (reject).
    Zeroed,
    /// Drop members of the class.
    Ignore,
    /// Pass members of the class through.
    Append,
}

impl FromStr for ClassFlag {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, ClassFlag); 6] = [
            ("zeroed", ClassFlag::Zeroed),
            ("reject", ClassFlag::Zeroed),
            ("ignore", ClassFlag::Ignore),
            ("drop", ClassFlag::Ignore),
            ("append", ClassFlag::Append),
            ("keep", ClassFlag::Append),
        ];
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, flag)| flag)
            .ok_or(ParseClassError)
    }
}

/// What the encoder does with a code unit of some class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassAction {
    /// Fail the call.
    Reject,
    /// Skip the code unit.
    Ignore,
    /// Emit the code unit's raw form.
    Append,
}

/// Coarse shape of a policy, used by the encoder to skip per-class work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    /// Every class rejected.
    Reject,
    /// Every Ignore bit set, no Append bit.
    IgnoreAll,
    /// Every Append bit set, no Ignore bit.
    AppendAll,
    /// Anything else; consult per-class flags.
    Flags,
}

/// Packed Ignore/Append flags per [`CharacterClass`] plus the derived per-byte
/// maps for ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u64", into = "u64"))]
pub struct ValidationPolicy {
    ignore: u32,
    append: u32,
    ignore_bytes: u128,
    append_bytes: u128,
}

const ASCII_ALL: u128 = u128::MAX;

impl ValidationPolicy {
    /// Reject everything outside the letter tables. The default.
    pub const NONE: Self = Self {
        ignore: 0,
        append: 0,
        ignore_bytes: 0,
        append_bytes: 0,
    };

    /// Drop everything outside the letter tables.
    pub const IGNORE_ALL: Self = Self {
        ignore: u32::MAX,
        append: 0,
        ignore_bytes: ASCII_ALL,
        append_bytes: 0,
    };

    /// Pass everything outside the letter tables through.
    pub const APPEND_ALL: Self = Self {
        ignore: 0,
        append: u32::MAX,
        ignore_bytes: 0,
        append_bytes: ASCII_ALL,
    };

    /// Raw word of [`IGNORE_ALL`](Self::IGNORE_ALL).
    pub const IGNORE_ALL_BITS: u64 = 0x0000_0000_FFFF_FFFF;

    /// Raw word of [`APPEND_ALL`](Self::APPEND_ALL).
    pub const APPEND_ALL_BITS: u64 = 0xFFFF_FFFF_0000_0000;

    /// Install a raw policy word.
    ///
    /// The word is stored as given even if some class has both bits set; check
    /// [`misconfigured`](Self::misconfigured) or use
    /// [`try_from_bits`](Self::try_from_bits).
    pub fn from_bits(bits: u64) -> Self {
        let mut policy = Self {
            ignore: bits as u32,
            append: (bits >> 32) as u32,
            ignore_bytes: 0,
            append_bytes: 0,
        };
        policy.rebuild_bytes();
        let misconfigured = policy.misconfigured();
        if misconfigured != 0 {
            tracing::warn!(
                bits = bits,
                classes = misconfigured,
                "validation policy has classes with both ignore and append set"
            );
        } else {
            tracing::debug!(bits = bits, "validation policy installed");
        }
        policy
    }

    /// Install a raw policy word, refusing misconfigured words.
    pub fn try_from_bits(bits: u64) -> Result<Self, Error> {
        let policy = Self::from_bits(bits);
        match policy.misconfigured() {
            0 => Ok(policy),
            classes => Err(Error::ValidatePolicyMisconfigured { classes }),
        }
    }

    /// The packed 64-bit word.
    #[inline]
    pub fn to_bits(&self) -> u64 {
        ((self.append as u64) << 32) | self.ignore as u64
    }

    /// Ignore half-word.
    #[inline]
    pub fn ignore_word(&self) -> u32 {
        self.ignore
    }

    /// Append half-word.
    #[inline]
    pub fn append_word(&self) -> u32 {
        self.append
    }

    /// Classes with both bits set, as a bitmask over class indices.
    #[inline]
    pub fn misconfigured(&self) -> u32 {
        self.ignore & self.append
    }

    /// `true` if no class has both bits set.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.misconfigured() == 0
    }

    /// Coarse shape of this policy.
    pub fn mode(&self) -> PolicyMode {
        match self.to_bits() {
            0 => PolicyMode::Reject,
            Self::IGNORE_ALL_BITS => PolicyMode::IgnoreAll,
            Self::APPEND_ALL_BITS => PolicyMode::AppendAll,
            _ => PolicyMode::Flags,
        }
    }

    /// Set one class's flag, clearing whatever it had before.
    pub fn set(&mut self, class: CharacterClass, flag: ClassFlag) {
        let bit = class.bit();
        let bytes = class.byte_mask();

        self.ignore &= !bit;
        self.append &= !bit;
        self.ignore_bytes &= !bytes;
        self.append_bytes &= !bytes;

        match flag {
            ClassFlag::Zeroed => {}
            ClassFlag::Ignore => {
                self.ignore |= bit;
                self.ignore_bytes |= bytes;
            }
            ClassFlag::Append => {
                self.append |= bit;
                self.append_bytes |= bytes;
            }
        }
        tracing::debug!(class = class.name(), flag = ?flag, "validation class updated");
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, class: CharacterClass, flag: ClassFlag) -> Self {
        self.set(class, flag);
        self
    }

    /// Current flag of a class. A misconfigured class reads as
    /// [`ClassFlag::Ignore`].
    pub fn flag(&self, class: CharacterClass) -> ClassFlag {
        match self.action(class) {
            ClassAction::Reject => ClassFlag::Zeroed,
            ClassAction::Ignore => ClassFlag::Ignore,
            ClassAction::Append => ClassFlag::Append,
        }
    }

    /// Action for a class, from the packed word.
    #[inline]
    pub fn action(&self, class: CharacterClass) -> ClassAction {
        let bit = class.bit();
        if self.ignore & bit != 0 {
            ClassAction::Ignore
        } else if self.append & bit != 0 {
            ClassAction::Append
        } else {
            ClassAction::Reject
        }
    }

    /// Action for an ASCII byte, from the per-byte maps.
    ///
    /// Bytes 0x80 and above fall into [`CharacterClass::Extended`].
    #[inline]
    pub fn byte_action(&self, byte: u8) -> ClassAction {
        if byte >= 0x80 {
            return self.action(CharacterClass::Extended);
        }
        let bit = 1u128 << byte;
        if self.ignore_bytes & bit != 0 {
            ClassAction::Ignore
        } else if self.append_bytes & bit != 0 {
            ClassAction::Append
        } else {
            ClassAction::Reject
        }
    }

    /// Action for any UTF-16 code unit.
    #[inline]
    pub fn word_action(&self, word: u16) -> ClassAction {
        if word > 0xFF {
            self.action(CharacterClass::Wide)
        } else {
            self.byte_action(word as u8)
        }
    }

    /// Per-byte Ignore map for ASCII (bit `b` = byte `b`).
    #[inline]
    pub fn ignore_bytes(&self) -> u128 {
        self.ignore_bytes
    }

    /// Per-byte Append map for ASCII (bit `b` = byte `b`).
    #[inline]
    pub fn append_bytes(&self) -> u128 {
        self.append_bytes
    }

    fn rebuild_bytes(&mut self) {
        self.ignore_bytes = 0;
        self.append_bytes = 0;
        for class in CharacterClass::ALL {
            let bit = class.bit();
            if self.ignore & bit != 0 {
                self.ignore_bytes |= class.byte_mask();
            }
            if self.append & bit != 0 {
                self.append_bytes |= class.byte_mask();
            }
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<u64> for ValidationPolicy {
    fn from(bits: u64) -> Self {
        Self::from_bits(bits)
    }
}

impl From<ValidationPolicy> for u64 {
    fn from(policy: ValidationPolicy) -> Self {
        policy.to_bits()
    }
}

impl fmt::Debug for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPolicy")
            .field("ignore", &format_args!("{:#010x}", self.ignore))
            .field("append", &format_args!("{:#010x}", self.append))
            .finish()
    }
}
