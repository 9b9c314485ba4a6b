use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;
const MAX_WORD_LEN: usize = 12;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Lowercase ASCII word of 1 to `MAX_WORD_LEN` letters.
pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(1..=MAX_WORD_LEN);
    (0..len)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}

pub fn random_words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count).map(|_| random_word(rng)).collect()
}

/// `count` words drawn from a fixed pool of `vocabulary` distinct words, like tokens of real text.
pub fn vocabulary_words<R: Rng + ?Sized>(rng: &mut R, count: usize, vocabulary: usize) -> Vec<String> {
    let pool = random_words(rng, vocabulary.max(1));
    (0..count)
        .map(|_| pool[rng.random_range(0..pool.len())].clone())
        .collect()
}

/// Sorted words with about 1% of positions swapped at random.
pub fn nearly_sorted_words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    let mut words = random_words(rng, count);
    words.sort_unstable();
    if count > 1 {
        let swaps = (count / 100).max(1);
        for _ in 0..swaps {
            let a = rng.random_range(0..count);
            let b = rng.random_range(0..count);
            words.swap(a, b);
        }
    }
    words
}

pub fn shuffled<T, R: Rng + ?Sized>(mut data: Vec<T>, rng: &mut R) -> Vec<T> {
    data.shuffle(rng);
    data
}
