//! Synthetic datasets for the pipeline benchmarks.
//!
//! Items draw their feature text from a fixed word pool and about one in
//! ten carries a keyword folder, so the labelled share resembles a real
//! photo library. The wide variant also gives every item a unique token and
//! labels about half of them, which pushes the ridge fit onto the iterative
//! solver.

use prefscore_core::{Item, RatingTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic dataset generation.
pub const BENCHMARK_SEED: u64 = 42;

/// Words used to build feature text.
const WORDS: [&str; 16] = [
    "sunset", "beach", "portrait", "mountain", "lake", "city", "night", "snow", "forest",
    "street", "cat", "dog", "flower", "bridge", "river", "market",
];

/// Words per item, inclusive bounds.
const TEXT_LENGTH: (usize, usize) = (3, 9);

/// Share of items given a keyword folder by [`generate_items`].
const LABELLED_SHARE: f64 = 0.1;

/// Share of items given a keyword folder by [`generate_wide_items`].
const WIDE_LABELLED_SHARE: f64 = 0.5;

/// Generate `count` items, roughly a tenth of them keyword-labelled.
#[must_use]
pub fn generate_items(count: usize, seed: u64) -> Vec<Item> {
    generate(count, seed, LABELLED_SHARE, false)
}

/// Generate `count` items with one unique token each, about half labelled.
///
/// The vocabulary grows with the dataset, so both dimensions of the ridge
/// system scale together.
#[must_use]
pub fn generate_wide_items(count: usize, seed: u64) -> Vec<Item> {
    generate(count, seed, WIDE_LABELLED_SHARE, true)
}

fn generate(count: usize, seed: u64, labelled_share: f64, unique_token: bool) -> Vec<Item> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let table = RatingTable::default();
    let keywords: Vec<&str> = table.iter().map(|rule| rule.keyword()).collect();

    (0..count)
        .map(|index| {
            let length = rng.gen_range(TEXT_LENGTH.0..=TEXT_LENGTH.1);
            let mut words = (0..length)
                .filter_map(|_| WORDS.get(rng.gen_range(0..WORDS.len())).copied())
                .map(str::to_owned)
                .collect::<Vec<_>>();
            if unique_token {
                words.push(format!("shot{index}"));
            }
            let text = words.join(" ");
            let folder = if rng.gen_bool(labelled_share) {
                keywords
                    .get(rng.gen_range(0..keywords.len()))
                    .copied()
                    .unwrap_or("inbox")
            } else {
                "inbox"
            };
            Item::new(format!("library/{folder}/{index:06}.png"), text)
        })
        .collect()
}
