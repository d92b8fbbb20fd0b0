#![warn(clippy::all, missing_docs)]

//! Core logic for the game-reviews client.
//!
//! This crate hosts the domain models, the games collection client,
//! configuration handling, and the controller that keeps the displayed
//! list in step with the remote store. Frontends drive it through
//! [`GameActions`] and draw the [`GameListView`] it returns.

pub mod config;
pub mod controller;
pub mod error;
pub mod id;
pub mod models;
pub mod service;
pub mod view;

pub use crate::config::{AppConfig, Backend};
pub use controller::{GameActions, GameController, Snapshot};
pub use error::{ControllerError, LookupError, ServiceError};
pub use models::{Game, NewGame, Review, Score};
pub use service::{GameService, GameStore, MemoryStore};
pub use view::{GameCard, GameListView, ReviewLine};
