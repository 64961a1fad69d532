//! Cyrillic text generators for benchmarking and testing.
//!
//! Output is UTF-8 and never splits a character, so it can be fed straight to
//! `cyrtrans encode`.

use cyrtrans::Language;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pattern types for Cyrillic text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Words separated by spaces, with sentence punctuation and line breaks
    Prose,
    /// Letters only, one long run per line (valid under the rejecting policy)
    Letters,
    /// Prose mixed with Latin words, digits and emoji (exercises the policy)
    Mixed,
}

const RUSSIAN_ALPHABET: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯабвгдеёжзийклмнопрстуфхцчшщъыьэюя";
const UKRAINIAN_ALPHABET: &str = "АБВГҐДЕЄЖЗИІЇЙКЛМНОПРСТУФХЦЧШЩЬЮЯабвгґдеєжзиіїйклмнопрстуфхцчшщьюя";

const RUSSIAN_WORDS: &[&str] = &[
    "съешь", "же", "ещё", "этих", "мягких", "французских", "булок", "да", "выпей", "чаю",
    "широкая", "электрификация", "южных", "губерний", "даст", "мощный", "толчок",
    "подъёму", "сельского", "хозяйства", "объявление", "щука", "ёж", "юла",
];

const UKRAINIAN_WORDS: &[&str] = &[
    "чуєш", "їх", "доцю", "га", "кумедна", "ж", "ти", "прощайся", "без", "ґольфів",
    "жебракують", "філософи", "при", "ґанку", "церкви", "гадяцькій", "ще", "п'ють",
    "щоденно", "їжак", "ґудзик", "Київ", "подвір'я", "євшан",
];

const LATIN_WORDS: &[&str] = &["OK", "http", "Linux", "API", "v2", "README", "utf-8"];

const EMOJI: &[&str] = &["😀", "🚀", "✓", "☺", "→", "№"];

/// Generate Cyrillic text of approximately `target_size` bytes.
pub fn generate_cyrillic(
    target_size: usize,
    pattern: Pattern,
    language: Language,
    seed: Option<u64>,
) -> Vec<u8> {
    let mut rng = seed.map(ChaCha8Rng::seed_from_u64);
    let mut text = match pattern {
        Pattern::Prose => generate_prose(target_size, language, &mut rng, false),
        Pattern::Letters => generate_letters(target_size, language, &mut rng),
        Pattern::Mixed => generate_prose(target_size, language, &mut rng, true),
    };
    truncate_at_char_boundary(&mut text, target_size);
    text.into_bytes()
}

/// Pick an index in `0..len`; falls back to a rotating index without a seed.
fn pick(rng: &mut Option<ChaCha8Rng>, len: usize, fallback: usize) -> usize {
    rng.as_mut()
        .map(|r| r.gen_range(0..len))
        .unwrap_or(fallback % len)
}

fn words_for(language: Language) -> &'static [&'static str] {
    if language.is_ukrainian() {
        UKRAINIAN_WORDS
    } else {
        RUSSIAN_WORDS
    }
}

/// Words with spaces, capitalised sentences and lines of at most 80 chars.
fn generate_prose(
    target_size: usize,
    language: Language,
    rng: &mut Option<ChaCha8Rng>,
    mixed: bool,
) -> String {
    let words = words_for(language);
    let mut result = String::with_capacity(target_size + 16);
    let mut line_len = 0;
    let mut sentence_len = 0;
    let mut n = 0;

    while result.len() < target_size {
        n += 1;
        let roll = pick(rng, 20, n * 7);
        let word: String = if mixed && roll == 0 {
            LATIN_WORDS[pick(rng, LATIN_WORDS.len(), n)].to_string()
        } else if mixed && roll == 1 {
            EMOJI[pick(rng, EMOJI.len(), n)].to_string()
        } else if mixed && roll == 2 {
            pick(rng, 2026, n * 31).to_string()
        } else {
            let word = words[pick(rng, words.len(), n)];
            if sentence_len == 0 {
                capitalize(word)
            } else {
                word.to_string()
            }
        };

        let word_chars = word.chars().count();
        if line_len > 0 && line_len + word_chars + 1 > 80 {
            result.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(&word);
        line_len += word_chars;
        sentence_len += 1;

        if sentence_len >= 4 + pick(rng, 8, n) {
            let end = if mixed {
                [".", "!", "?", ",", ";"][pick(rng, 5, n)]
            } else {
                "."
            };
            result.push_str(end);
            line_len += 1;
            sentence_len = 0;
        }
    }
    result
}

/// Runs of letters, one run per line.
fn generate_letters(
    target_size: usize,
    language: Language,
    rng: &mut Option<ChaCha8Rng>,
) -> String {
    let alphabet: Vec<char> = if language.is_ukrainian() {
        UKRAINIAN_ALPHABET.chars().collect()
    } else {
        RUSSIAN_ALPHABET.chars().collect()
    };
    let mut result = String::with_capacity(target_size + 4);
    let mut line_len = 0;
    let mut n = 0;

    while result.len() < target_size {
        n += 1;
        if line_len == 64 {
            result.push('\n');
            line_len = 0;
        }
        result.push(alphabet[pick(rng, alphabet.len(), n)]);
        line_len += 1;
    }
    result
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut `text` to at most `max` bytes without splitting a character.
fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
