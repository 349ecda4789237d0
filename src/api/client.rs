use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::api::models::{Incident, NewsItem};
use crate::api::{ApiError, Backend};

/// Thin reqwest wrapper around the four backend endpoints.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// `base_url` should already carry a scheme; a trailing slash is tolerated.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_body(&self, path: &str) -> Result<String, ApiError> {
        let endpoint = self.endpoint(path);
        debug!("GET {endpoint}");
        let resp = self.http.get(&endpoint).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<String, ApiError> {
        let endpoint = self.endpoint(path);
        debug!("POST {endpoint}");
        let resp = self.http.post(&endpoint).json(payload).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Pull the `news` array out of the feed payload. A missing or unusable field
/// is an empty feed, not an error.
fn news_from_payload(payload: &Value) -> Vec<NewsItem> {
    payload
        .get("news")
        .map(|v| serde_json::from_value(v.clone()).unwrap_or_default())
        .unwrap_or_default()
}

/// Pull `bot_reply` out of the chatbot payload, if the server sent one.
fn bot_reply_from_payload(payload: &Value) -> Option<String> {
    payload
        .get("bot_reply")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl Backend for ApiClient {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, ApiError> {
        let body = self.get_body("/api/news").await?;
        let payload: Value = serde_json::from_str(&body)?;
        let items = news_from_payload(&payload);
        debug!("news fetched: {} items", items.len());
        Ok(items)
    }

    async fn fetch_incidents(&self) -> Result<Vec<Incident>, ApiError> {
        let body = self.get_body("/api/incidents").await?;
        let incidents: Vec<Incident> = serde_json::from_str(&body)?;
        debug!("incidents fetched: {} records", incidents.len());
        Ok(incidents)
    }

    async fn send_chat_message(&self, message: &str) -> Result<Option<String>, ApiError> {
        let body = self
            .post_json("/api/chatbot", &serde_json::json!({ "message": message }))
            .await?;
        let payload: Value = serde_json::from_str(&body)?;
        Ok(bot_reply_from_payload(&payload))
    }

    async fn create_incident(&self, description: &str, location: &str) -> Result<(), ApiError> {
        self.post_json(
            "/api/incidents",
            &serde_json::json!({
                "description": description,
                "location": location,
            }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = ApiClient::new("https://hse.example.com/");
        assert_eq!(client.base_url(), "https://hse.example.com");
        assert_eq!(client.endpoint("/api/news"), "https://hse.example.com/api/news");
    }

    #[test]
    fn news_payload_with_items() {
        let payload: Value = serde_json::from_str(
            r#"{ "news": [ { "title": "t", "summary": "s", "link": "https://l" } ] }"#,
        )
        .unwrap();
        let items = news_from_payload(&payload);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "t");
        assert_eq!(items[0].summary, "s");
        assert_eq!(items[0].link, "https://l");
    }

    #[test]
    fn missing_news_field_means_empty_feed() {
        let payload: Value = serde_json::from_str(r#"{ "status": "ok" }"#).unwrap();
        assert!(news_from_payload(&payload).is_empty());
    }

    #[test]
    fn unusable_news_field_means_empty_feed() {
        let payload: Value = serde_json::from_str(r#"{ "news": "nope" }"#).unwrap();
        assert!(news_from_payload(&payload).is_empty());
    }

    #[test]
    fn news_items_tolerate_missing_fields() {
        let payload: Value =
            serde_json::from_str(r#"{ "news": [ { "title": "only a title" } ] }"#).unwrap();
        let items = news_from_payload(&payload);
        assert_eq!(items[0].title, "only a title");
        assert_eq!(items[0].summary, "");
        assert_eq!(items[0].link, "");
    }

    #[test]
    fn bot_reply_extraction() {
        let with: Value = serde_json::from_str(r#"{ "bot_reply": "hello" }"#).unwrap();
        assert_eq!(bot_reply_from_payload(&with).as_deref(), Some("hello"));

        let without: Value = serde_json::from_str(r#"{ "status": "ok" }"#).unwrap();
        assert_eq!(bot_reply_from_payload(&without), None);

        let empty: Value = serde_json::from_str(r#"{ "bot_reply": "" }"#).unwrap();
        assert_eq!(bot_reply_from_payload(&empty).as_deref(), Some(""));
    }

    #[test]
    fn incident_rows_tolerate_missing_fields() {
        let incidents: Vec<Incident> =
            serde_json::from_str(r#"[ { "id": 7, "description": "spill" } ]"#).unwrap();
        assert_eq!(incidents[0].id, 7);
        assert_eq!(incidents[0].description, "spill");
        assert_eq!(incidents[0].location, "");
        assert_eq!(incidents[0].created_at, "");
    }
}
