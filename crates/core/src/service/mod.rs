//! Access to the remote games collection.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::{
    error::ServiceError,
    models::{Game, NewGame},
};

pub use http::GameService;
pub use memory::MemoryStore;

/// CRUD operations on the games collection.
///
/// Reviews are not a resource of their own: they travel inline on their game
/// and are persisted by replacing the whole game record through [`update`].
/// Implementations never retry and never swallow errors.
///
/// [`update`]: GameStore::update
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Every game with its reviews, in store order.
    async fn list_all(&self) -> Result<Vec<Game>, ServiceError>;

    /// A single game.
    async fn get_one(&self, id: &str) -> Result<Game, ServiceError>;

    /// Persist a new game and return the record with its assigned id.
    async fn create(&self, game: &NewGame) -> Result<Game, ServiceError>;

    /// Replace the stored record for `game.id` wholesale.
    async fn update(&self, game: &Game) -> Result<Game, ServiceError>;

    /// Remove a game and its reviews.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
