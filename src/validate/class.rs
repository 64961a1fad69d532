//! Character classes for the validation policy.
//!
//! The policy word has one Ignore bit and one Append bit per class, so there
//! are exactly 32 classes. Every ASCII byte (0x00-0x7F) belongs to exactly one
//! of the first 30 classes. The last two cover everything outside ASCII:
//! [`CharacterClass::Extended`] for code units 0x80-0xFF and
//! [`CharacterClass::Wide`] for code units with a non-zero high byte.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a class selects its member bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// A single byte.
    Symbol,
    /// An opening and closing bracket.
    Pair,
    /// A contiguous byte range.
    Range,
    /// A discontinuous list of printable bytes.
    List,
    /// The C0 control bytes not covered elsewhere, plus DEL.
    Control,
    /// Code units 0x80-0xFF.
    Extended,
    /// Code units 0x100-0xFFFF.
    Wide,
}

/// A group of code units sharing one Ignore/Append decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum CharacterClass {
    /// `A`-`Z`
    UpperLatin = 0,
    /// `a`-`z`
    LowerLatin,
    /// `0`-`9`
    Digit,
    /// 0x20
    Space,
    /// 0x09
    Tab,
    /// 0x0A
    LineFeed,
    /// 0x0D
    CarriageReturn,
    /// `!`
    Exclamation,
    /// `"`
    Quotation,
    /// `#`
    Hash,
    /// `$`
    Dollar,
    /// `'`
    Apostrophe,
    /// `,`
    Comma,
    /// `-`
    Hyphen,
    /// `.`
    Period,
    /// `/`
    Slash,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `?`
    Question,
    /// `@`
    At,
    /// `\`
    Backslash,
    /// `_`
    Underscore,
    /// `` ` ``
    Grave,
    /// `(` `)`
    Parenthesis,
    /// `[` `]`
    SquareBracket,
    /// `{` `}`
    CurlyBrace,
    /// `<` `>`
    AngleBracket,
    /// `+ * = % ^`
    Arithmetic,
    /// `& | ~`
    Logic,
    /// 0x00-0x08, 0x0B, 0x0C, 0x0E-0x1F, 0x7F
    Control,
    /// 0x80-0xFF
    Extended,
    /// 0x100-0xFFFF
    Wide = 31,
}

/// Number of classes (one per bit of a half-word).
pub const CLASS_COUNT: usize = 32;

const fn range(lo: u8, hi: u8) -> u128 {
    let mut mask = 0u128;
    let mut b = lo;
    while b <= hi {
        mask |= 1u128 << b;
        b += 1;
    }
    mask
}

const fn list(bytes: &[u8]) -> u128 {
    let mut mask = 0u128;
    let mut i = 0;
    while i < bytes.len() {
        mask |= 1u128 << bytes[i];
        i += 1;
    }
    mask
}

const fn single(byte: u8) -> u128 {
    1u128 << byte
}

impl CharacterClass {
    /// Every class, in bit order.
    pub const ALL: [CharacterClass; CLASS_COUNT] = [
        Self::UpperLatin,
        Self::LowerLatin,
        Self::Digit,
        Self::Space,
        Self::Tab,
        Self::LineFeed,
        Self::CarriageReturn,
        Self::Exclamation,
        Self::Quotation,
        Self::Hash,
        Self::Dollar,
        Self::Apostrophe,
        Self::Comma,
        Self::Hyphen,
        Self::Period,
        Self::Slash,
        Self::Colon,
        Self::Semicolon,
        Self::Question,
        Self::At,
        Self::Backslash,
        Self::Underscore,
        Self::Grave,
        Self::Parenthesis,
        Self::SquareBracket,
        Self::CurlyBrace,
        Self::AngleBracket,
        Self::Arithmetic,
        Self::Logic,
        Self::Control,
        Self::Extended,
        Self::Wide,
    ];

    /// Bit index of this class within a half-word.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Class at bit index `index`, if in range.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-bit mask of this class within a half-word.
    #[inline]
    pub const fn bit(self) -> u32 {
        1u32 << (self as u32)
    }

    /// How this class selects its members.
    pub const fn kind(self) -> ClassKind {
        match self {
            Self::UpperLatin | Self::LowerLatin | Self::Digit => ClassKind::Range,
            Self::Parenthesis | Self::SquareBracket | Self::CurlyBrace | Self::AngleBracket => {
                ClassKind::Pair
            }
            Self::Arithmetic | Self::Logic => ClassKind::List,
            Self::Control => ClassKind::Control,
            Self::Extended => ClassKind::Extended,
            Self::Wide => ClassKind::Wide,
            _ => ClassKind::Symbol,
        }
    }

    /// ASCII bytes belonging to this class, as a 128-bit map.
    ///
    /// Zero for [`Extended`](Self::Extended) and [`Wide`](Self::Wide), which
    /// have no ASCII members.
    pub const fn byte_mask(self) -> u128 {
        match self {
            Self::UpperLatin => range(b'A', b'Z'),
            Self::LowerLatin => range(b'a', b'z'),
            Self::Digit => range(b'0', b'9'),
            Self::Space => single(b' '),
            Self::Tab => single(b'\t'),
            Self::LineFeed => single(b'\n'),
            Self::CarriageReturn => single(b'\r'),
            Self::Exclamation => single(b'!'),
            Self::Quotation => single(b'"'),
            Self::Hash => single(b'#'),
            Self::Dollar => single(b'$'),
            Self::Apostrophe => single(b'\''),
            Self::Comma => single(b','),
            Self::Hyphen => single(b'-'),
            Self::Period => single(b'.'),
            Self::Slash => single(b'/'),
            Self::Colon => single(b':'),
            Self::Semicolon => single(b';'),
            Self::Question => single(b'?'),
            Self::At => single(b'@'),
            Self::Backslash => single(b'\\'),
            Self::Underscore => single(b'_'),
            Self::Grave => single(b'`'),
            Self::Parenthesis => list(b"()"),
            Self::SquareBracket => list(b"[]"),
            Self::CurlyBrace => list(b"{}"),
            Self::AngleBracket => list(b"<>"),
            Self::Arithmetic => list(b"+*=%^"),
            Self::Logic => list(b"&|~"),
            Self::Control => range(0x00, 0x08) | list(&[0x0B, 0x0C, 0x7F]) | range(0x0E, 0x1F),
            Self::Extended | Self::Wide => 0,
        }
    }

    /// Class of an ASCII byte, or `None` if `byte >= 0x80`.
    #[inline]
    pub fn of_ascii(byte: u8) -> Option<Self> {
        BYTE_CLASS.get(byte as usize).map(|&class| Self::ALL[class as usize])
    }

    /// Class of any UTF-16 code unit.
    #[inline]
    pub fn of_word(word: u16) -> Self {
        if word > 0xFF {
            Self::Wide
        } else if word >= 0x80 {
            Self::Extended
        } else {
            Self::ALL[BYTE_CLASS[word as usize] as usize]
        }
    }

    /// Kebab-case name used in config files and on the command line.
    pub fn name(self) -> &'static str {
        CLASS_NAMES[self.index()]
    }
}

static CLASS_NAMES: [&str; CLASS_COUNT] = [
    "upper-latin",
    "lower-latin",
    "digit",
    "space",
    "tab",
    "line-feed",
    "carriage-return",
    "exclamation",
    "quotation",
    "hash",
    "dollar",
    "apostrophe",
    "comma",
    "hyphen",
    "period",
    "slash",
    "colon",
    "semicolon",
    "question",
    "at",
    "backslash",
    "underscore",
    "grave",
    "parenthesis",
    "square-bracket",
    "curly-brace",
    "angle-bracket",
    "arithmetic",
    "logic",
    "control",
    "extended",
    "wide",
];

/// Class index of each ASCII byte.
static BYTE_CLASS: [u8; 128] = {
    let mut table = [u8::MAX; 128];
    let mut c = 0;
    while c < CLASS_COUNT {
        let mask = CharacterClass::ALL[c].byte_mask();
        let mut byte = 0;
        while byte < 128 {
            if (mask >> byte) & 1 == 1 {
                table[byte] = c as u8;
            }
            byte += 1;
        }
        c += 1;
    }
    table
};

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseClassError;

impl fmt::Display for ParseClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown character class or flag")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseClassError {}

impl FromStr for CharacterClass {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CLASS_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|index| Self::ALL[index])
            .ok_or(ParseClassError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_bit_order() {
        for (i, class) in CharacterClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
            assert_eq!(CharacterClass::from_index(i), Some(*class));
        }
        assert_eq!(CharacterClass::from_index(CLASS_COUNT), None);
    }

    #[test]
    fn test_every_ascii_byte_in_exactly_one_class() {
        for byte in 0u8..128 {
            let owners: Vec<_> = CharacterClass::ALL
                .iter()
                .filter(|c| (c.byte_mask() >> byte) & 1 == 1)
                .collect();
            assert_eq!(owners.len(), 1, "byte=0x{:02X}, owners={:?}", byte, owners);
        }
    }

    #[test]
    fn test_non_ascii_classes_have_no_bytes() {
        assert_eq!(CharacterClass::Extended.byte_mask(), 0);
        assert_eq!(CharacterClass::Wide.byte_mask(), 0);
    }

    #[test]
    fn test_member_counts_follow_kind() {
        for class in CharacterClass::ALL {
            let count = class.byte_mask().count_ones();
            match class.kind() {
                ClassKind::Symbol => assert_eq!(count, 1, "{}", class),
                ClassKind::Pair => assert_eq!(count, 2, "{}", class),
                ClassKind::Range => assert!(count >= 10, "{}", class),
                ClassKind::List => assert!(count >= 3, "{}", class),
                ClassKind::Control => assert_eq!(count, 30),
                ClassKind::Extended | ClassKind::Wide => assert_eq!(count, 0),
            }
        }
    }

    #[test]
    fn test_of_word() {
        assert_eq!(CharacterClass::of_word(b'A' as u16), CharacterClass::UpperLatin);
        assert_eq!(CharacterClass::of_word(b'{' as u16), CharacterClass::CurlyBrace);
        assert_eq!(CharacterClass::of_word(0x7F), CharacterClass::Control);
        assert_eq!(CharacterClass::of_word(0x0A), CharacterClass::LineFeed);
        assert_eq!(CharacterClass::of_word(0xE9), CharacterClass::Extended);
        assert_eq!(CharacterClass::of_word(0x0416), CharacterClass::Wide);
    }

    #[test]
    fn test_of_ascii() {
        assert_eq!(CharacterClass::of_ascii(b'0'), Some(CharacterClass::Digit));
        assert_eq!(CharacterClass::of_ascii(0x7F), Some(CharacterClass::Control));
        assert_eq!(CharacterClass::of_ascii(0x80), None);
        assert_eq!(CharacterClass::of_ascii(0xFF), None);
    }

    #[test]
    fn test_names_parse_back() {
        for class in CharacterClass::ALL {
            assert_eq!(class.name().parse::<CharacterClass>(), Ok(class));
        }
        assert_eq!("Square-Bracket".parse::<CharacterClass>(), Ok(CharacterClass::SquareBracket));
        assert_eq!("emoji".parse::<CharacterClass>(), Err(ParseClassError));
    }
}
