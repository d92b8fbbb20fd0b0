//! HTTP client for the REST games collection.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::GameStore;
use crate::{
    config::AppConfig,
    error::ServiceError,
    models::{Game, NewGame},
};

/// REST client for a single games collection.
///
/// | op     | method | path                 |
/// |--------|--------|----------------------|
/// | list   | GET    | `{collection}`       |
/// | get    | GET    | `{collection}/{id}`  |
/// | create | POST   | `{collection}`       |
/// | update | PUT    | `{collection}/{id}`  |
/// | delete | DELETE | `{collection}/{id}`  |
#[derive(Clone)]
pub struct GameService {
    collection_url: String,
    collection: String,
    http_client: Client,
}

impl GameService {
    /// Build a client for the collection described by `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Build a client reusing an existing `reqwest` client.
    pub fn with_client(config: &AppConfig, http_client: Client) -> Self {
        Self {
            collection_url: config.collection_url(),
            collection: config.collection.clone(),
            http_client,
        }
    }

    /// URL of the collection endpoint.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "Sending store request");
        self.http_client.request(method, url)
    }

    fn with_json<T: Serialize>(
        builder: RequestBuilder,
        body: &T,
    ) -> Result<RequestBuilder, ServiceError> {
        let payload = serde_json::to_vec(body).map_err(ServiceError::Encode)?;
        Ok(builder.header(CONTENT_TYPE, "application/json").body(payload))
    }

    /// Send the request and turn non-success statuses into errors.
    ///
    /// `target` names what the request addressed, used for `NotFound`: the
    /// record id, or the collection name for collection requests.
    async fn send(&self, builder: RequestBuilder, target: &str) -> Result<Response, ServiceError> {
        let response = builder.send().await.map_err(ServiceError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(%status, target, %err, "Failed to read error body");
                String::new()
            }
        };
        debug!(%status, target, "Store request failed");
        Err(ServiceError::from_status(status, target, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let text = response.text().await.map_err(ServiceError::Network)?;
        serde_json::from_str(&text).map_err(ServiceError::Decode)
    }
}

#[async_trait]
impl GameStore for GameService {
    async fn list_all(&self) -> Result<Vec<Game>, ServiceError> {
        let builder = self.request(Method::GET, &self.collection_url);
        let response = self.send(builder, &self.collection).await?;
        Self::decode(response).await
    }

    async fn get_one(&self, id: &str) -> Result<Game, ServiceError> {
        let builder = self.request(Method::GET, &self.record_url(id));
        let response = self.send(builder, id).await?;
        Self::decode(response).await
    }

    async fn create(&self, game: &NewGame) -> Result<Game, ServiceError> {
        let builder = Self::with_json(self.request(Method::POST, &self.collection_url), game)?;
        let response = self.send(builder, &self.collection).await?;
        Self::decode(response).await
    }

    async fn update(&self, game: &Game) -> Result<Game, ServiceError> {
        let builder = Self::with_json(self.request(Method::PUT, &self.record_url(&game.id)), game)?;
        let response = self.send(builder, &game.id).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let builder = self.request(Method::DELETE, &self.record_url(id));
        self.send(builder, id).await?;
        Ok(())
    }
}
