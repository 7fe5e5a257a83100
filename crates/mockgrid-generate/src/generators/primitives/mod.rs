use rand::Rng;
use rand::seq::IndexedRandom;

use mockgrid_core::{Bounds, RandomSpec};

/// Why a pair of bounds cannot be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    Missing,
    Inverted,
}

/// Validate inclusive bounds before any sampling happens.
pub fn checked_bounds(bounds: &Bounds) -> Result<(i64, i64), BoundsError> {
    let (Some(min), Some(max)) = (bounds.min, bounds.max) else {
        return Err(BoundsError::Missing);
    };
    if min > max {
        return Err(BoundsError::Inverted);
    }
    Ok((min, max))
}

const MAX_PREALLOCATED_CHARS: usize = 4096;

/// Uniform integer in `[min, max]`. Callers validate `min <= max`.
pub fn sample_number<R: Rng + ?Sized>(min: i64, max: i64, rng: &mut R) -> i64 {
    rng.random_range(min..=max)
}

/// `length` characters drawn independently from `characters`, or `None` when
/// either is missing.
pub fn random_string<R: Rng + ?Sized>(spec: &RandomSpec, rng: &mut R) -> Option<String> {
    let length = spec.length?;
    let alphabet: Vec<char> = spec.characters.as_deref()?.chars().collect();
    // capacity grows with the draws; `length` itself is unbounded
    let mut value = String::with_capacity(length.min(MAX_PREALLOCATED_CHARS));
    for _ in 0..length {
        value.push(*alphabet.choose(rng)?);
    }
    Some(value)
}

/// `word_count` lexicon words joined by spaces and closed with a period.
/// Counts below one give an empty string.
pub fn lorem_ipsum<R: Rng + ?Sized>(word_count: i64, rng: &mut R) -> String {
    if word_count < 1 {
        return String::new();
    }
    let mut value = String::new();
    for idx in 0..word_count {
        if idx > 0 {
            value.push(' ');
        }
        let word = LOREM_WORDS[rng.random_range(0..LOREM_WORDS.len())];
        value.push_str(word);
    }
    value.push('.');
    value
}

pub const LOREM_WORDS: &[&str] = &[
    "Lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "Ut",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "ut",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
    "Duis",
    "aute",
    "irure",
    "dolor",
    "in",
    "reprehenderit",
    "in",
    "voluptate",
    "velit",
    "esse",
    "cillum",
    "dolore",
    "eu",
    "fugiat",
    "nulla",
    "pariatur",
    "Excepteur",
    "sint",
    "occaecat",
    "cupidatat",
    "non",
    "proident",
    "sunt",
    "in",
    "culpa",
    "qui",
    "officia",
    "deserunt",
    "mollit",
    "anim",
    "id",
    "est",
    "laborum",
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn bounds_are_checked_before_sampling() {
        assert_eq!(checked_bounds(&Bounds::new(1, 3)), Ok((1, 3)));
        assert_eq!(checked_bounds(&Bounds::new(5, 5)), Ok((5, 5)));
        assert_eq!(
            checked_bounds(&Bounds::new(4, 3)),
            Err(BoundsError::Inverted)
        );
        assert_eq!(
            checked_bounds(&Bounds {
                min: Some(1),
                max: None
            }),
            Err(BoundsError::Missing)
        );
    }

    #[test]
    fn lorem_counts_words_and_ends_with_period() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let text = lorem_ipsum(5, &mut rng);
        assert!(text.ends_with('.'));
        let words: Vec<&str> = text.trim_end_matches('.').split(' ').collect();
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|word| LOREM_WORDS.contains(word)));
    }

    #[test]
    fn long_random_strings_grow_past_the_preallocation() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let length = MAX_PREALLOCATED_CHARS * 3 + 1;
        let value = random_string(&RandomSpec::new(length, "ab"), &mut rng).expect("string");
        assert_eq!(value.chars().count(), length);
        assert!(value.chars().all(|c| c == 'a' || c == 'b'));

        let unusable = RandomSpec::new(usize::MAX, "");
        assert_eq!(random_string(&unusable, &mut rng), None);
    }

    #[test]
    fn lorem_below_one_word_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(lorem_ipsum(0, &mut rng), "");
        assert_eq!(lorem_ipsum(-3, &mut rng), "");
    }

    #[test]
    fn random_string_uses_multibyte_alphabet_per_character() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let value = random_string(&RandomSpec::new(6, "äöü"), &mut rng).expect("value");
        assert_eq!(value.chars().count(), 6);
        assert!(value.chars().all(|c| "äöü".contains(c)));
    }

    #[test]
    fn random_string_requires_length_and_characters() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(random_string(&RandomSpec::new(0, "ab"), &mut rng), None);
        assert_eq!(random_string(&RandomSpec::new(3, ""), &mut rng), None);
    }
}
