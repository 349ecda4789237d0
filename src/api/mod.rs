pub mod client;
pub mod models;

pub use client::ApiClient;

use async_trait::async_trait;
use thiserror::Error;

use models::{Incident, NewsItem};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The slice of the HSE GO REST contract the client consumes. The view-model
/// talks to the backend through this trait so tests can script responses
/// without a socket.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/news`.
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, ApiError>;

    /// `GET /api/incidents`.
    async fn fetch_incidents(&self) -> Result<Vec<Incident>, ApiError>;

    /// `POST /api/chatbot`. Returns the `bot_reply` field as the server sent
    /// it, or `None` when the response carried no such field.
    async fn send_chat_message(&self, message: &str) -> Result<Option<String>, ApiError>;

    /// `POST /api/incidents`. Any 2xx counts as success; the body is unused.
    async fn create_incident(&self, description: &str, location: &str) -> Result<(), ApiError>;
}
