//! In-process games store with the same contract as the REST collection.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use tracing::debug;

use super::GameStore;
use crate::{
    error::ServiceError,
    models::{Game, NewGame},
};

/// Process-local games collection.
///
/// Assigns ids `g1`, `g2`, ... and lists games in creation order, matching
/// what the hosted collection does. Clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    games: Vec<Game>,
    next_id: u64,
    requests: usize,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with existing records, kept in the given order.
    ///
    /// New ids continue after the highest seeded `g<N>` id.
    pub fn with_games(games: Vec<Game>) -> Self {
        let next_id = games
            .iter()
            .filter_map(|game| game.id.strip_prefix('g')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                games,
                next_id,
                requests: 0,
            })),
        }
    }

    /// Copy of everything currently stored.
    pub fn games(&self) -> Vec<Game> {
        self.inner.lock().games.clone()
    }

    /// Number of operations served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.inner.lock().requests
    }
}

impl Inner {
    fn position(&self, id: &str) -> Result<usize, ServiceError> {
        self.games
            .iter()
            .position(|game| game.id == id)
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Game>, ServiceError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        Ok(inner.games.clone())
    }

    async fn get_one(&self, id: &str) -> Result<Game, ServiceError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        let index = inner.position(id)?;
        Ok(inner.games[index].clone())
    }

    async fn create(&self, game: &NewGame) -> Result<Game, ServiceError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        inner.next_id += 1;
        let record = game.clone().into_game(format!("g{}", inner.next_id));
        debug!(id = %record.id, name = %record.name, "Memory store created game");
        inner.games.push(record.clone());
        Ok(record)
    }

    async fn update(&self, game: &Game) -> Result<Game, ServiceError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        let index = inner.position(&game.id)?;

        let mut seen = HashSet::new();
        if let Some(duplicate) = game
            .reviews
            .iter()
            .find(|review| !seen.insert(review.id.as_str()))
        {
            return Err(ServiceError::Validation {
                status: StatusCode::BAD_REQUEST,
                body: format!("duplicate review id {}", duplicate.id),
            });
        }

        inner.games[index] = game.clone();
        Ok(game.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        let index = inner.position(id)?;
        inner.games.remove(index);
        debug!(id, "Memory store deleted game");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Review;
    use anyhow::Result;

    #[tokio::test]
    async fn assigns_sequential_ids_in_creation_order() -> Result<()> {
        let store = MemoryStore::new();
        let chess = store.create(&NewGame::new("Chess")).await?;
        let go = store.create(&NewGame::new("Go")).await?;
        assert_eq!(chess.id, "g1");
        assert_eq!(go.id, "g2");

        let names: Vec<_> = store
            .list_all()
            .await?
            .into_iter()
            .map(|game| game.name)
            .collect();
        assert_eq!(names, ["Chess", "Go"]);
        assert_eq!(store.get_one("g2").await?.name, "Go");
        Ok(())
    }

    #[tokio::test]
    async fn seeded_store_never_reuses_ids() -> Result<()> {
        let store = MemoryStore::with_games(vec![
            NewGame::new("Seed").into_game("g2"),
            NewGame::new("Imported").into_game("legacy-7"),
        ]);

        let first = store.create(&NewGame::new("New")).await?;
        let second = store.create(&NewGame::new("Newer")).await?;
        assert_eq!(first.id, "g3");
        assert_eq!(second.id, "g4");

        let ids: Vec<_> = store.games().into_iter().map(|game| game.id).collect();
        assert_eq!(ids, ["g2", "legacy-7", "g3", "g4"]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryStore::new();
        assert!(store.get_one("g1").await.is_err_and(|err| err.is_not_found()));
        assert!(store.delete("g1").await.is_err_and(|err| err.is_not_found()));
        let ghost = NewGame::new("Ghost").into_game("g1");
        assert!(store.update(&ghost).await.is_err_and(|err| err.is_not_found()));
        assert_eq!(store.request_count(), 3);
    }

    #[tokio::test]
    async fn update_replaces_the_whole_record() -> Result<()> {
        let store = MemoryStore::new();
        let mut game = store.create(&NewGame::new("Chess")).await?;
        game.push_review(Review::new("r1", "Great", "9"));
        game.name = "Chess 960".to_string();

        store.update(&game).await?;
        assert_eq!(store.games(), vec![game]);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_duplicate_review_ids() -> Result<()> {
        let store = MemoryStore::new();
        let mut game = store.create(&NewGame::new("Chess")).await?;
        game.push_review(Review::new("r1", "Great", "9"));
        game.push_review(Review::new("r1", "Again", "3"));

        let err = store.update(&game).await.expect_err("expected rejection");
        assert!(matches!(err, ServiceError::Validation { .. }));
        assert!(store.games()[0].reviews.is_empty());
        Ok(())
    }
}
