//! Shared domain models mirrored from the remote `Games` collection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A game record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Store-assigned identifier.
    pub id: String,
    /// User supplied title; not unique.
    pub name: String,
    /// Reviews in the order they were added.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Game {
    /// Append a review to the end of the list.
    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Remove the first review with the given id, returning it when present.
    pub fn remove_review(&mut self, review_id: &str) -> Option<Review> {
        let index = self
            .reviews
            .iter()
            .position(|review| review.id == review_id)?;
        Some(self.reviews.remove(index))
    }
}

/// Payload submitted when creating a game; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    /// Title for the new game.
    pub name: String,
    /// Always empty on creation.
    pub reviews: Vec<Review>,
}

impl NewGame {
    /// A game with the given name and no reviews.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reviews: Vec::new(),
        }
    }

    /// Attach the store-assigned id.
    pub fn into_game(self, id: impl Into<String>) -> Game {
        Game {
            id: id.into(),
            name: self.name,
            reviews: self.reviews,
        }
    }
}

/// A single review attached to exactly one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Client-generated identifier, see [`crate::id::ReviewIdGenerator`].
    pub id: String,
    /// Reviewer name as entered.
    pub name: String,
    /// Score as entered.
    pub score: Score,
}

impl Review {
    /// Build a review from its parts.
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: impl Into<Score>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: score.into(),
        }
    }
}

/// Review score. Entered as free text and stored unvalidated; the store may
/// hand it back as either a JSON string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Free text, the form the client submits.
    Text(String),
    /// Numeric form some stores normalise to.
    Number(serde_json::Number),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Text(text) => f.write_str(text),
            Score::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<String> for Score {
    fn from(value: String) -> Self {
        Score::Text(value)
    }
}

impl From<&str> for Score {
    fn from(value: &str) -> Self {
        Score::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn decodes_store_records() -> Result<()> {
        let raw = json!([
            {
                "createdAt": 1697598543,
                "name": "Chess",
                "id": "1",
                "reviews": [
                    { "id": "1697-abc", "name": "Great", "score": "9" },
                    { "id": "1698-def", "name": "Okay", "score": 6 }
                ]
            },
            { "name": "Go", "id": "2" }
        ]);

        let games: Vec<Game> = serde_json::from_value(raw)?;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].reviews[0].score, Score::from("9"));
        assert_eq!(games[0].reviews[1].score.to_string(), "6");
        assert!(matches!(games[0].reviews[1].score, Score::Number(_)));
        assert!(games[1].reviews.is_empty());
        Ok(())
    }

    #[test]
    fn new_game_serializes_without_id() -> Result<()> {
        let value = serde_json::to_value(NewGame::new("Chess"))?;
        assert_eq!(value, json!({ "name": "Chess", "reviews": [] }));
        Ok(())
    }

    #[test]
    fn free_text_scores_are_kept_verbatim() {
        let score = Score::from(" ten out of ten ");
        assert_eq!(score.to_string(), " ten out of ten ");
        assert_eq!(score, Score::Text(" ten out of ten ".to_string()));
    }

    #[test]
    fn remove_review_takes_exactly_one_entry() {
        let mut game = NewGame::new("Chess").into_game("g1");
        game.push_review(Review::new("a", "First", "7"));
        game.push_review(Review::new("b", "Second", "8"));
        game.push_review(Review::new("c", "Third", "9"));

        let removed = game.remove_review("b").map(|review| review.name);
        assert_eq!(removed.as_deref(), Some("Second"));
        let ids: Vec<_> = game.reviews.iter().map(|review| review.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(game.remove_review("b").is_none());
    }
}
