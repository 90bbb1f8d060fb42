//! Random astronomy facts for the info panel

use rand::Rng;
use serde::Deserialize;

/// Bundled fact list
const BUNDLED_FACTS: &str = include_str!("../assets/facts.json");

#[derive(Debug, Deserialize)]
struct FactFile {
    facts: Vec<String>,
}

/// A deck of facts that never deals the same one twice in a row
#[derive(Debug, Clone, Default)]
pub struct FactDeck {
    facts: Vec<String>,
    last: Option<usize>,
}

impl FactDeck {
    /// Parse a deck from `{"facts": [...]}` JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: FactFile = serde_json::from_str(json)?;
        Ok(Self {
            facts: file.facts,
            last: None,
        })
    }

    /// The deck shipped with the app
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_FACTS)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Pick a random fact, avoiding the previous pick when possible
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<&str> {
        if self.facts.is_empty() {
            return None;
        }

        let mut idx = rng.random_range(0..self.facts.len());
        if self.facts.len() > 1 && Some(idx) == self.last {
            idx = (idx + 1) % self.facts.len();
        }
        self.last = Some(idx);
        self.facts.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bundled_deck_parses() {
        let deck = FactDeck::bundled().unwrap();
        assert!(deck.len() > 5);
    }

    #[test]
    fn test_never_repeats_back_to_back() {
        let mut deck = FactDeck::from_json(r#"{"facts": ["a", "b"]}"#).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut prev = deck.draw(&mut rng).unwrap().to_string();
        for _ in 0..100 {
            let cur = deck.draw(&mut rng).unwrap().to_string();
            assert_ne!(cur, prev);
            prev = cur;
        }
    }

    #[test]
    fn test_single_and_empty_decks() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut one = FactDeck::from_json(r#"{"facts": ["only"]}"#).unwrap();
        assert_eq!(one.draw(&mut rng), Some("only"));
        assert_eq!(one.draw(&mut rng), Some("only"));

        let mut empty = FactDeck::from_json(r#"{"facts": []}"#).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.draw(&mut rng), None);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(FactDeck::from_json("{\"fact\": 3}").is_err());
    }
}
