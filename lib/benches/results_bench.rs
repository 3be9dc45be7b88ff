#![feature(test)]

extern crate test;

use wordle_entropy::*;
use test::Bencher;

#[bench]
fn bench_get_feedback(b: &mut Bencher) {
    let guess: Word = "sassy".parse().unwrap();
    let secret: Word = "mesas".parse().unwrap();

    b.iter(|| get_feedback(&guess, &secret));
}

#[bench]
fn bench_feedback_pattern_index(b: &mut Bencher) {
    let patterns: Vec<FeedbackPattern> = FeedbackPattern::all().collect();

    b.iter(|| {
        patterns
            .iter()
            .map(|pattern| pattern.index() as u32)
            .sum::<u32>()
    });
}
