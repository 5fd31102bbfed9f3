//! Synthetic password populations
//!
//! Generates leak-like data: a handful of popular base passwords and many
//! one-typo variants of them, mixed with unrelated random strings, with
//! Zipf-distributed counts.

use crate::core::Population;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE_WORDS: &[&str] = &[
    "password", "iloveyou", "princess", "sunshine", "football", "baseball", "superman",
    "trustno1", "whatever", "starwars", "charlie1", "michelle", "liverpool", "chocolate",
    "butterfly", "qwerty123", "letmein1", "master12",
];

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Count given to the most frequent generated password
const ZIPF_SCALE: u64 = 100_000;

/// Generate `n` weighted passwords deterministically from `seed`
///
/// Repeated strings are merged, so the population may hold fewer than `n` targets.
///
/// # Examples
/// ```
/// use typo_cover::dataset::synthetic;
///
/// let a = synthetic(100, 42);
/// let b = synthetic(100, 42);
/// assert_eq!(a.total_frequency(), b.total_frequency());
/// assert!(a.len() <= 100);
/// ```
#[must_use]
pub fn synthetic(n: usize, seed: u64) -> Population {
    let mut rng = StdRng::seed_from_u64(seed);

    Population::new((0..n).map(|rank| {
        let text = if rng.random_bool(0.25) {
            random_word(&mut rng)
        } else {
            let base = BASE_WORDS[rng.random_range(0..BASE_WORDS.len())];
            mutate(base, &mut rng)
        };
        let frequency = (ZIPF_SCALE / (rank as u64 + 1)).max(1);
        (text, frequency)
    }))
}

fn pick(set: &[u8], rng: &mut StdRng) -> char {
    char::from(set[rng.random_range(0..set.len())])
}

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.random_range(6..=10);
    (0..len).map(|_| pick(LETTERS, rng)).collect()
}

/// Apply at most one typo-style edit
fn mutate(base: &str, rng: &mut StdRng) -> String {
    let mut chars: Vec<char> = base.chars().collect();
    let at = rng.random_range(0..chars.len());

    match rng.random_range(0..6) {
        0 => {}
        1 => chars[0] = chars[0].to_ascii_uppercase(),
        2 => chars.push(pick(DIGITS, rng)),
        3 => chars[at] = pick(LETTERS, rng),
        4 => {
            chars.remove(at);
        }
        _ => chars.insert(at, pick(LETTERS, rng)),
    }
    chars.into_iter().collect()
}
