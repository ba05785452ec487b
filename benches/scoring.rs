use criterion::{black_box, criterion_group, criterion_main, Criterion};
use guessing::matching::{DictionaryAttrs, Match, Pattern};
use guessing::scoring::most_guessable_match_sequence_with_reference_year;

fn bench_no_matches(c: &mut Criterion) {
    c.bench_function("bruteforce cover, 16 chars", |b| {
        b.iter(|| {
            most_guessable_match_sequence_with_reference_year(
                black_box("Tr0ub4dour&3xxxx"),
                black_box(&[]),
                false,
                2024,
            )
            .unwrap()
        })
    });
}

fn bench_with_dictionary_match(c: &mut Criterion) {
    let attrs = DictionaryAttrs {
        rank: 17,
        ..Default::default()
    };
    let m = Match::new(0, 7, "corvette".to_string(), Pattern::Dictionary(attrs));
    c.bench_function("one dictionary match plus bruteforce fill", |b| {
        b.iter(|| {
            most_guessable_match_sequence_with_reference_year(
                black_box("corvette1987"),
                black_box(&[m.clone()]),
                false,
                2024,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_no_matches, bench_with_dictionary_match);
criterion_main!(benches);
