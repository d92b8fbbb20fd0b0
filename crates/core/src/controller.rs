//! Mutation, refresh and render sequencing.
//!
//! Every action follows the same chain: mutate the store, re-fetch the whole
//! collection, rebuild the snapshot and view from scratch. A failure at any
//! step, the refresh included, leaves the previous snapshot as it was.
//!
//! Chains are not coordinated with each other. Two actions racing on the same
//! game both complete, and whichever refresh finishes last determines the
//! snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    error::{ControllerError, LookupError},
    id::ReviewIdGenerator,
    models::{Game, NewGame, Review},
    service::GameStore,
    view::GameListView,
};

/// Inputs the UI forwards to the controller.
#[async_trait]
pub trait GameActions: Send + Sync {
    /// Create a game with no reviews.
    async fn on_create_game(&self, name: &str) -> Result<GameListView, ControllerError>;

    /// Delete a game together with its reviews.
    async fn on_delete_game(&self, game_id: &str) -> Result<GameListView, ControllerError>;

    /// Append a review to a game.
    async fn on_add_review(
        &self,
        game_id: &str,
        name: &str,
        score: &str,
    ) -> Result<GameListView, ControllerError>;

    /// Remove one review from a game.
    async fn on_delete_review(
        &self,
        game_id: &str,
        review_id: &str,
    ) -> Result<GameListView, ControllerError>;
}

/// Last rendered state: games in store order plus the view derived from them.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    games: Vec<Game>,
    view: GameListView,
    generation: u64,
}

impl Snapshot {
    /// Games in the order the store returned them.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Game by id.
    pub fn game(&self, game_id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id == game_id)
    }

    /// View built from [`Snapshot::games`].
    pub fn view(&self) -> &GameListView {
        &self.view
    }

    /// Number of renders so far; zero before the first load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Orchestrates store mutations and full re-renders.
///
/// Cloning is cheap; clones share the store and the snapshot.
pub struct GameController<S: ?Sized = dyn GameStore> {
    store: Arc<S>,
    ids: ReviewIdGenerator,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl<S: ?Sized> Clone for GameController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: self.ids,
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<S: GameStore> GameController<S> {
    /// Controller over an owned store, starting with an empty snapshot.
    pub fn new(store: S) -> Self {
        Self::from_store(Arc::new(store))
    }
}

impl<S: GameStore + ?Sized> GameController<S> {
    /// Controller over a shared store, starting with an empty snapshot.
    pub fn from_store(store: Arc<S>) -> Self {
        Self {
            store,
            ids: ReviewIdGenerator,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.read().clone()
    }

    /// Copy of the current view.
    pub fn view(&self) -> GameListView {
        self.snapshot.read().view.clone()
    }

    /// Fetch and render the collection without mutating anything.
    pub async fn load(&self) -> Result<GameListView, ControllerError> {
        self.refresh().await
    }

    /// Create a game named `name` with no reviews.
    pub async fn create_game(&self, name: &str) -> Result<GameListView, ControllerError> {
        let created = self.store.create(&NewGame::new(name)).await?;
        info!(id = %created.id, name = %created.name, "Created game");
        self.refresh().await
    }

    /// Delete a game and its reviews.
    pub async fn delete_game(&self, game_id: &str) -> Result<GameListView, ControllerError> {
        info!(game_id, "Deleting game");
        self.store.delete(game_id).await?;
        self.refresh().await
    }

    /// Append a review to a game in the current snapshot and persist the
    /// whole game record.
    pub async fn add_review(
        &self,
        game_id: &str,
        review_name: &str,
        review_score: &str,
    ) -> Result<GameListView, ControllerError> {
        let mut game = self.lookup_game(game_id)?;
        let review = Review::new(self.ids.generate(), review_name, review_score);
        info!(game_id, review_id = %review.id, "Adding review");
        game.push_review(review);

        self.store.update(&game).await?;
        self.refresh().await
    }

    /// Remove one review from a game in the current snapshot and persist the
    /// whole game record.
    pub async fn delete_review(
        &self,
        game_id: &str,
        review_id: &str,
    ) -> Result<GameListView, ControllerError> {
        let mut game = self.lookup_game(game_id)?;
        if game.remove_review(review_id).is_none() {
            return Err(LookupError::ReviewNotFound {
                game_id: game_id.to_string(),
                review_id: review_id.to_string(),
            }
            .into());
        }
        info!(game_id, review_id, "Deleting review");

        self.store.update(&game).await?;
        self.refresh().await
    }

    /// Replace the snapshot with `games` and rebuild the whole view.
    pub fn render(&self, games: Vec<Game>) -> GameListView {
        let view = GameListView::from_games(&games);
        let mut snapshot = self.snapshot.write();
        snapshot.games = games;
        snapshot.view = view.clone();
        snapshot.generation += 1;
        debug!(
            games = snapshot.games.len(),
            generation = snapshot.generation,
            "Rendered game list"
        );
        view
    }

    async fn refresh(&self) -> Result<GameListView, ControllerError> {
        let games = self.store.list_all().await.map_err(|err| {
            warn!(%err, "Refresh failed; keeping previous list");
            err
        })?;
        Ok(self.render(games))
    }

    fn lookup_game(&self, game_id: &str) -> Result<Game, LookupError> {
        self.snapshot
            .read()
            .game(game_id)
            .cloned()
            .ok_or_else(|| LookupError::GameNotFound {
                game_id: game_id.to_string(),
            })
    }
}

#[async_trait]
impl<S: GameStore + ?Sized + 'static> GameActions for GameController<S> {
    async fn on_create_game(&self, name: &str) -> Result<GameListView, ControllerError> {
        self.create_game(name).await
    }

    async fn on_delete_game(&self, game_id: &str) -> Result<GameListView, ControllerError> {
        self.delete_game(game_id).await
    }

    async fn on_add_review(
        &self,
        game_id: &str,
        name: &str,
        score: &str,
    ) -> Result<GameListView, ControllerError> {
        self.add_review(game_id, name, score).await
    }

    async fn on_delete_review(
        &self,
        game_id: &str,
        review_id: &str,
    ) -> Result<GameListView, ControllerError> {
        self.delete_review(game_id, review_id).await
    }
}
