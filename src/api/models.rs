use serde::{Deserialize, Serialize};

/// One entry of the backend news feed. The feed is read-only and replaced
/// wholesale on every fetch; fields missing from the payload come back empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
}

/// An incident report as the backend returns it. The client only ever sends
/// description and location; id and created_at are assigned server-side.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Incident {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_at: String,
}

/// The most recent chatbot exchange. No history is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub message: String,
    pub reply: String,
}
