//! Error types for store access and controller actions.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures reported by a [`crate::service::GameStore`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The store answered with a non-success status it did not explain further.
    #[error("server error {status}: {body}")]
    Server {
        /// Status returned by the store.
        status: StatusCode,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// The addressed record, or the collection itself, does not exist.
    #[error("{id} not found")]
    NotFound {
        /// Id the request addressed; the collection name for requests on the
        /// collection endpoint.
        id: String,
    },

    /// The store rejected the payload.
    #[error("store rejected payload ({status}): {body}")]
    Validation {
        /// Status returned by the store.
        status: StatusCode,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A success response carried a body that is not a game record.
    #[error("failed to decode store response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialised.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ServiceError {
    /// Map a non-success status to the matching error.
    ///
    /// `id` is the record the request addressed; collection requests pass the
    /// collection name instead.
    pub fn from_status(status: StatusCode, id: &str, body: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => ServiceError::NotFound { id: id.to_string() },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ServiceError::Validation { status, body }
            }
            _ => ServiceError::Server { status, body },
        }
    }

    /// Whether the store reported the record as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

/// Local precondition failures: the snapshot lacks a referenced id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No game with this id in the current snapshot.
    #[error("game {game_id} is not in the current list")]
    GameNotFound {
        /// Requested game.
        game_id: String,
    },
    /// The game exists but has no review with this id.
    #[error("review {review_id} is not attached to game {game_id}")]
    ReviewNotFound {
        /// Owning game.
        game_id: String,
        /// Requested review.
        review_id: String,
    },
}

/// Errors surfaced by [`crate::controller::GameController`] actions.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Local lookup failed before any remote call.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The mutation or the refresh failed remotely.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ControllerError {
    /// True when the store reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ControllerError::Service(err) if err.is_not_found())
    }
}
