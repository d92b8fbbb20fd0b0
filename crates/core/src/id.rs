//! Client-side review identifiers.
//!
//! The remote store assigns game ids but knows nothing about reviews, which
//! live inline on their game record. Review ids are therefore minted here as
//! `<unix millis>-<random base36>`. Uniqueness is scoped to one client session.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 13;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates review ids from a timestamp and a random suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewIdGenerator;

impl ReviewIdGenerator {
    /// Mint a new id.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        format!("{}-{}", Utc::now().timestamp_millis(), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_have_timestamp_and_suffix() {
        let id = ReviewIdGenerator.generate();
        let (millis, suffix) = id.split_once('-').expect("expected separator");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
    }

    #[test]
    fn rapid_generation_does_not_collide() {
        let generator = ReviewIdGenerator;
        let ids: HashSet<String> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
