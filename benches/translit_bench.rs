//! Benchmarks for Cyrillic ↔ ASCII transliteration.
//!
//! ## Inputs
//!
//! - **Letters**: random letters from both alphabets (every unit hits a table)
//! - **Prose**: letters separated by spaces and punctuation, encoded under a
//!   per-class policy (exercises the per-byte policy maps)
//!
//! ## Sizes
//!
//! 1K, 16K, 256K and 1M code units.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cyrtrans::table::{MIXED_LETTERS, PLAIN_LETTERS};
use cyrtrans::{
    decode_raw, encode_raw, CharacterClass, ClassFlag, Language, Session, ValidationPolicy,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 4] = [1024, 16 * 1024, 256 * 1024, 1024 * 1024];

/// Random letters from both tables.
fn generate_letters(units: usize, seed: u64) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let alphabet: Vec<u16> = PLAIN_LETTERS.iter().chain(MIXED_LETTERS.iter()).copied().collect();
    (0..units)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Words of 2-9 letters separated by a space or punctuation.
fn generate_prose(units: usize, seed: u64) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let separators = [b' ', b' ', b' ', b',', b'.', b'\n'];
    let mut text = Vec::with_capacity(units);
    while text.len() < units {
        let len = rng.gen_range(2..10);
        for _ in 0..len {
            text.push(PLAIN_LETTERS[rng.gen_range(0..PLAIN_LETTERS.len())]);
        }
        text.push(separators[rng.gen_range(0..separators.len())] as u16);
    }
    text.truncate(units);
    text
}

fn format_size(units: usize) -> String {
    if units >= 1024 * 1024 {
        format!("{}M", units / (1024 * 1024))
    } else {
        format!("{}K", units / 1024)
    }
}

fn prose_policy() -> ValidationPolicy {
    ValidationPolicy::NONE
        .with(CharacterClass::Space, ClassFlag::Append)
        .with(CharacterClass::LineFeed, ClassFlag::Append)
        .with(CharacterClass::Comma, ClassFlag::Ignore)
        .with(CharacterClass::Period, ClassFlag::Ignore)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for language in [Language::Russian, Language::Ukrainian] {
        for units in SIZES {
            let data = generate_letters(units, 1);
            let id = format!("{}/letters/{}", language, format_size(units));

            group.throughput(Throughput::Elements(units as u64));
            group.bench_with_input(BenchmarkId::from_parameter(id), &data, |b, data| {
                let mut out = Vec::new();
                b.iter(|| {
                    encode_raw(language, &ValidationPolicy::NONE, &mut out, black_box(data))
                });
            });
        }
    }

    let policy = prose_policy();
    for units in SIZES {
        let data = generate_prose(units, 2);
        let id = format!("ru/prose/{}", format_size(units));

        group.throughput(Throughput::Elements(units as u64));
        group.bench_with_input(BenchmarkId::from_parameter(id), &data, |b, data| {
            let mut out = Vec::new();
            b.iter(|| encode_raw(Language::Russian, &policy, &mut out, black_box(data)));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for language in [Language::Russian, Language::Ukrainian] {
        let session = Session::new(language);
        for units in SIZES {
            let letters = generate_letters(units, 3);
            let mut data = Vec::new();
            encode_raw(language, session.policy(), &mut data, &letters)
                .expect("letters always encode");
            let id = format!("{}/letters/{}", language, format_size(units));

            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(id), &data, |b, data| {
                let mut out = Vec::new();
                b.iter(|| decode_raw(language, &mut out, black_box(data)));
            });
        }
    }

    group.finish();
}

fn bench_session_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_round_trip");
    let mut session = Session::new(Language::Ukrainian);
    let data = generate_letters(16 * 1024, 4);

    group.throughput(Throughput::Elements(data.len() as u64));
    group.bench_function("uk/letters/16K", |b| {
        b.iter(|| {
            let encoded = session.encode(black_box(&data));
            session.decode(&encoded)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_session_round_trip);
criterion_main!(benches);
