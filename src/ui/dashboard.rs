use std::sync::Mutex;

use log::{debug, error};

use crate::api::models::{ChatExchange, Incident, NewsItem};
use crate::api::Backend;

pub const NEWS_FETCH_FAILED: &str = "Failed to fetch news.";
pub const INCIDENT_FETCH_FAILED: &str = "Failed to fetch incidents.";
pub const CHAT_REPLY_FAILED: &str = "Failed to get a response from the chatbot.";
pub const INCIDENT_SUBMIT_FAILED: &str = "Failed to submit the incident.";

/// Shown in place of a chatbot reply the server never sent (or sent empty).
pub const NO_RESPONSE: &str = "No response";

const OP_COUNT: usize = 4;

/// The four logical operations the dashboard runs. Each carries its own
/// status so overlapping flows cannot clobber each other's feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    News,
    Incidents,
    Chat,
    Report,
}

impl OpKind {
    pub const ALL: [OpKind; OP_COUNT] = [
        OpKind::News,
        OpKind::Incidents,
        OpKind::Chat,
        OpKind::Report,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OpKind::News => "news",
            OpKind::Incidents => "incidents",
            OpKind::Chat => "chat",
            OpKind::Report => "incident report",
        }
    }

    fn index(self) -> usize {
        match self {
            OpKind::News => 0,
            OpKind::Incidents => 1,
            OpKind::Chat => 2,
            OpKind::Report => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpStatus {
    #[default]
    Idle,
    Busy,
    Failed(&'static str),
}

/// A submission refused client-side before any network traffic. Carries the
/// prompt text the frontend shows the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyMessage,
    IncompleteReport,
}

impl Rejection {
    pub fn prompt(self) -> &'static str {
        match self {
            Rejection::EmptyMessage => "Please enter a message.",
            Rejection::IncompleteReport => "Please fill out both description and location.",
        }
    }
}

/// A point-in-time copy of the view state, handed to the render layer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub news: Vec<NewsItem>,
    pub incidents: Vec<Incident>,
    pub chat: Option<ChatExchange>,
    pub description_draft: String,
    pub location_draft: String,
    statuses: [OpStatus; OP_COUNT],
}

impl Snapshot {
    pub fn status(&self, op: OpKind) -> OpStatus {
        self.statuses[op.index()]
    }
}

#[derive(Default)]
struct ViewState {
    news: Vec<NewsItem>,
    incidents: Vec<Incident>,
    chat: Option<ChatExchange>,
    description_draft: String,
    location_draft: String,
    statuses: [OpStatus; OP_COUNT],
    // Monotonic per-operation request tickets; a completion whose ticket is
    // no longer the newest of its kind is dropped instead of committed.
    tickets: [u64; OP_COUNT],
    closed: bool,
}

/// The client view-model. Holds the three panels' data and drives the four
/// backend flows; operations take `&self` and may overlap freely. Remote
/// failures never propagate out of an operation: they collapse into that
/// operation's status, with the raw error going to the log.
pub struct Dashboard<B> {
    backend: B,
    state: Mutex<ViewState>,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Reload the news feed. On failure the previously loaded feed stays.
    pub async fn load_news(&self) {
        let ticket = self.begin(OpKind::News);
        match self.backend.fetch_news().await {
            Ok(items) => self.commit(OpKind::News, ticket, |s| s.news = items),
            Err(e) => {
                error!("error fetching news: {e}");
                self.fail(OpKind::News, ticket, NEWS_FETCH_FAILED);
            }
        }
    }

    /// Reload the incident list. On failure the previous list stays.
    pub async fn load_incidents(&self) {
        let ticket = self.begin(OpKind::Incidents);
        match self.backend.fetch_incidents().await {
            Ok(incidents) => self.commit(OpKind::Incidents, ticket, |s| s.incidents = incidents),
            Err(e) => {
                error!("error fetching incidents: {e}");
                self.fail(OpKind::Incidents, ticket, INCIDENT_FETCH_FAILED);
            }
        }
    }

    /// Send one chatbot message. Blank messages (after trimming) are refused
    /// before any network call; the message itself is sent untrimmed.
    pub async fn send_chat(&self, message: &str) -> Result<(), Rejection> {
        if message.trim().is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        let ticket = self.begin(OpKind::Chat);
        match self.backend.send_chat_message(message).await {
            Ok(reply) => {
                let reply = match reply {
                    Some(r) if !r.is_empty() => r,
                    _ => NO_RESPONSE.to_string(),
                };
                let exchange = ChatExchange {
                    message: message.to_string(),
                    reply,
                };
                self.commit(OpKind::Chat, ticket, |s| s.chat = Some(exchange));
            }
            Err(e) => {
                error!("error interacting with chatbot: {e}");
                self.fail(OpKind::Chat, ticket, CHAT_REPLY_FAILED);
            }
        }
        Ok(())
    }

    /// Submit the drafted incident report. Requires both drafts non-blank.
    /// On success the incident list is re-fetched wholesale (no local merge)
    /// and the drafts are cleared; on failure at either the create or the
    /// follow-up fetch, the drafts stay so the user can retry.
    pub async fn submit_incident(&self) -> Result<(), Rejection> {
        let (description, location) = {
            let s = self.state.lock().unwrap();
            (s.description_draft.clone(), s.location_draft.clone())
        };
        if description.trim().is_empty() || location.trim().is_empty() {
            return Err(Rejection::IncompleteReport);
        }
        let ticket = self.begin(OpKind::Report);
        let refreshed = match self.backend.create_incident(&description, &location).await {
            Ok(()) => self.backend.fetch_incidents().await,
            Err(e) => Err(e),
        };
        match refreshed {
            Ok(incidents) => self.commit(OpKind::Report, ticket, |s| {
                s.incidents = incidents;
                s.description_draft.clear();
                s.location_draft.clear();
            }),
            Err(e) => {
                error!("error submitting incident: {e}");
                self.fail(OpKind::Report, ticket, INCIDENT_SUBMIT_FAILED);
            }
        }
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn edit_description(&self, text: &str) {
        self.state.lock().unwrap().description_draft = text.to_string();
    }

    pub fn edit_location(&self, text: &str) {
        self.state.lock().unwrap().location_draft = text.to_string();
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = self.state.lock().unwrap();
        Snapshot {
            news: s.news.clone(),
            incidents: s.incidents.clone(),
            chat: s.chat.clone(),
            description_draft: s.description_draft.clone(),
            location_draft: s.location_draft.clone(),
            statuses: s.statuses,
        }
    }

    /// Mark the view torn down. Requests still in flight run to completion
    /// but their results are dropped at the commit gate.
    pub fn close(&self) {
        self.state.lock().unwrap().closed = true;
    }

    fn begin(&self, op: OpKind) -> u64 {
        let mut s = self.state.lock().unwrap();
        s.tickets[op.index()] += 1;
        s.statuses[op.index()] = OpStatus::Busy;
        s.tickets[op.index()]
    }

    fn commit(&self, op: OpKind, ticket: u64, apply: impl FnOnce(&mut ViewState)) {
        let mut s = self.state.lock().unwrap();
        if superseded(&s, op, ticket) {
            return;
        }
        apply(&mut s);
        s.statuses[op.index()] = OpStatus::Idle;
    }

    fn fail(&self, op: OpKind, ticket: u64, message: &'static str) {
        let mut s = self.state.lock().unwrap();
        if superseded(&s, op, ticket) {
            return;
        }
        s.statuses[op.index()] = OpStatus::Failed(message);
    }
}

fn superseded(s: &ViewState, op: OpKind, ticket: u64) -> bool {
    if s.closed || s.tickets[op.index()] != ticket {
        debug!("dropping superseded {} completion (ticket {ticket})", op.label());
        return true;
    }
    false
}
