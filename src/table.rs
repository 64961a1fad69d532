//! Static transliteration tables.
//!
//! Cyrillic tables are written as string literals and expanded into UTF-16
//! arrays at compile time, so every table is a plain `[u16; N]` in the binary.
//!
//! Encoding uses two tables:
//! - the *plain* table: the 58 letters shared by both dialects, sorted by code
//!   unit for binary search;
//! - the *mixed* table: 16 letters whose spelling depends on the dialect. Each
//!   has a short form (row 0) and an explicit `jx`/`JX` form (row 1).
//!
//! Decoding uses the inverse: a default table for single Latin letters and
//! eight escape rows selected by escape kind and dialect.

/// Expand a UTF-8 literal of BMP characters into UTF-16 code units.
///
/// Panics at compile time if the literal does not hold exactly `N` characters.
const fn utf16<const N: usize>(s: &str) -> [u16; N] {
    let bytes = s.as_bytes();
    let mut out = [0u16; N];
    let mut i = 0;
    let mut n = 0;
    while i < bytes.len() {
        let b = bytes[i] as u32;
        let (cp, len) = if b < 0x80 {
            (b, 1)
        } else if b < 0xE0 {
            (((b & 0x1F) << 6) | (bytes[i + 1] as u32 & 0x3F), 2)
        } else {
            (
                ((b & 0x0F) << 12) | ((bytes[i + 1] as u32 & 0x3F) << 6) | (bytes[i + 2] as u32 & 0x3F),
                3,
            )
        };
        assert!(n < N, "table literal longer than declared");
        out[n] = cp as u16;
        n += 1;
        i += len;
    }
    assert!(n == N, "table literal shorter than declared");
    out
}

// =============================================================================
// Encode tables
// =============================================================================

/// Number of plain letters (29 per case).
pub const PLAIN_LEN: usize = 58;

/// Letters shared by both dialects, sorted ascending.
pub static PLAIN_LETTERS: [u16; PLAIN_LEN] =
    utf16("АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЬЮЯабвгдежзийклмнопрстуфхцчшщьюя");

/// ASCII spelling of each entry of [`PLAIN_LETTERS`].
#[rustfmt::skip]
pub static PLAIN_TRANS: [&str; PLAIN_LEN] = [
    // А    Б    В    Г    Д    Е    Ж     З
    "A", "B", "V", "G", "D", "E", "JZ", "Z",
    // И    Й    К    Л    М    Н    О    П
    "U", "I", "K", "L", "M", "N", "O", "P",
    // Р    С    Т    У    Ф    Х    Ц    Ч
    "R", "S", "T", "Y", "F", "H", "C", "JC",
    // Ш    Щ     Ь    Ю     Я
    "W", "JW", "Q", "JY", "JA",
    // а    б    в    г    д    е    ж     з
    "a", "b", "v", "g", "d", "e", "jz", "z",
    // и    й    к    л    м    н    о    п
    "u", "i", "k", "l", "m", "n", "o", "p",
    // р    с    т    у    ф    х    ц    ч
    "r", "s", "t", "y", "f", "h", "c", "jc",
    // ш    щ     ь    ю     я
    "w", "jw", "q", "jy", "ja",
];

/// Number of dialect-dependent letters.
pub const MIXED_LEN: usize = 16;

/// Letters whose spelling depends on the dialect.
pub static MIXED_LETTERS: [u16; MIXED_LEN] = utf16("ЁЄІЇЪЫЭъыэёєіїҐґ");

/// Row 0: short escape. Row 1: explicit `jx` escape.
#[rustfmt::skip]
pub static MIXED_TRANS: [[&str; MIXED_LEN]; 2] = [
    //  Ё     Є     І     Ї     Ъ     Ы     Э     ъ     ы     э     ё     є     і     ї     Ґ     ґ
    ["JI", "JE", "JU", "JI", "JQ", "JU", "JE", "jq", "ju", "je", "ji", "je", "ju", "ji", "JQ", "jq"],
    ["JXV", "JXE", "JXI", "JXY", "JXQ", "JXU", "JXZ", "jxq", "jxu", "jxz", "jxv", "jxe", "jxi", "jxy", "JXG", "jxg"],
];

/// Bit `i` set: letter `i` uses the short form under Ukrainian and the long
/// form under Russian. Clear: the other way round.
pub const MIXED_FLAGS: u16 = 0b1111_1000_0000_1110;

// =============================================================================
// Decode tables
// =============================================================================

/// Latin letters accepted outside an escape, sorted ascending.
pub static DEFAULT_LATIN: [u8; 48] = *b"ABCDEFGHIKLMNOPQRSTUVWYZabcdefghiklmnopqrstuvwyz";

/// Cyrillic letter for each entry of [`DEFAULT_LATIN`].
pub static DEFAULT_CYRILLIC: [u16; 48] =
    utf16("АБЦДЕФГХЙКЛМНОПЬРСТИВШУЗабцдефгхйклмнопьрстившуз");

/// Discriminator alphabets, indexed by escape table:
/// 0 = `j?`, 1 = `J?`, 2 = `jx?`, 3 = `JX?`.
pub static DISCRIMINATORS: [&[u8]; 4] = [b"zcwyaeiuq", b"ZCWYAEIUQ", b"quzveiyg", b"VEIYQUZG"];

const RU_SHORT_LOWER: [u16; 9] = utf16("жчщюяэёыъ");
const RU_SHORT_UPPER: [u16; 9] = utf16("ЖЧЩЮЯЭЁЫЪ");
const UK_SHORT_LOWER: [u16; 9] = utf16("жчщюяєїіґ");
const UK_SHORT_UPPER: [u16; 9] = utf16("ЖЧЩЮЯЄЇІҐ");
const EXTENDED_LOWER: [u16; 8] = utf16("ъыэёєіїґ");
const EXTENDED_UPPER: [u16; 8] = utf16("ЁЄІЇЪЫЭҐ");

/// Escape rows: index `table + (ukrainian ? 4 : 0)`.
pub static ESCAPE_ROWS: [&[u16]; 8] = [
    &RU_SHORT_LOWER,
    &RU_SHORT_UPPER,
    &EXTENDED_LOWER,
    &EXTENDED_UPPER,
    &UK_SHORT_LOWER,
    &UK_SHORT_UPPER,
    &EXTENDED_LOWER,
    &EXTENDED_UPPER,
];

// =============================================================================
// Lookups
// =============================================================================

/// Spelling of a plain letter.
#[inline]
pub fn plain(word: u16) -> Option<&'static str> {
    PLAIN_LETTERS
        .binary_search(&word)
        .ok()
        .map(|index| PLAIN_TRANS[index])
}

/// Spelling of a mixed letter under the given dialect.
#[inline]
pub fn mixed(word: u16, ukrainian: bool) -> Option<&'static str> {
    let col = MIXED_LETTERS.iter().position(|&letter| letter == word)?;
    let flag = (MIXED_FLAGS >> col) & 1 == 1;
    let row = (flag != ukrainian) as usize;
    Some(MIXED_TRANS[row][col])
}

/// Cyrillic letter for a Latin byte outside an escape.
#[inline]
pub fn default_letter(byte: u8) -> Option<u16> {
    DEFAULT_LATIN
        .binary_search(&byte)
        .ok()
        .map(|index| DEFAULT_CYRILLIC[index])
}

/// Cyrillic letter for the discriminator `byte` of escape `table` (0..4).
#[inline]
pub fn escape_letter(table: usize, byte: u8, ukrainian: bool) -> Option<u16> {
    let pos = DISCRIMINATORS[table].iter().position(|&b| b == byte)?;
    let row = table + if ukrainian { 4 } else { 0 };
    Some(ESCAPE_ROWS[row][pos])
}
