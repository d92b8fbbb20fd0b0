//! View-model snapshots handed to whatever draws the game list.

use crate::models::{Game, Review};

/// Full, ordered content of the game list as it should be displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameListView {
    /// Cards, most recently created game first.
    pub cards: Vec<GameCard>,
}

impl GameListView {
    /// Build the view from games in store order.
    ///
    /// The store lists games oldest first; cards are shown newest first.
    pub fn from_games(games: &[Game]) -> Self {
        Self {
            cards: games.iter().rev().map(GameCard::from_game).collect(),
        }
    }

    /// Card for the given game id.
    pub fn card(&self, game_id: &str) -> Option<&GameCard> {
        self.cards.iter().find(|card| card.id == game_id)
    }

    /// Position of the card for `game_id`.
    pub fn position(&self, game_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == game_id)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when there are no games.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// One game as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCard {
    /// Game id, used to route actions back to the controller.
    pub id: String,
    /// Game name.
    pub title: String,
    /// Reviews in the order they were added.
    pub reviews: Vec<ReviewLine>,
}

impl GameCard {
    fn from_game(game: &Game) -> Self {
        Self {
            id: game.id.clone(),
            title: game.name.clone(),
            reviews: game.reviews.iter().map(ReviewLine::from_review).collect(),
        }
    }
}

/// One review row inside a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    /// Review id.
    pub id: String,
    /// Reviewer name.
    pub name: String,
    /// Score rendered as text.
    pub score: String,
}

impl ReviewLine {
    fn from_review(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            name: review.name.clone(),
            score: review.score.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewGame;

    #[test]
    fn newest_game_is_shown_first() {
        let games: Vec<Game> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(idx, name)| NewGame::new(*name).into_game(format!("g{}", idx + 1)))
            .collect();

        let view = GameListView::from_games(&games);
        let titles: Vec<_> = view.cards.iter().map(|card| card.title.as_str()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
        assert_eq!(view.position("g1"), Some(2));
    }

    #[test]
    fn reviews_keep_insertion_order() {
        let mut game = NewGame::new("Chess").into_game("g1");
        game.push_review(Review::new("r1", "Great", "9"));
        game.push_review(Review::new("r2", "Meh", "4"));

        let view = GameListView::from_games(&[game]);
        let card = view.card("g1").expect("card missing");
        let lines: Vec<_> = card
            .reviews
            .iter()
            .map(|line| (line.name.as_str(), line.score.as_str()))
            .collect();
        assert_eq!(lines, [("Great", "9"), ("Meh", "4")]);
    }
}
