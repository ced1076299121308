use std::collections::VecDeque;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Bearer token the mock accepts.
pub const API_KEY: &str = "SG.mock-key";

const DEFAULT_LIMIT: usize = 10;
/// Oldest queries are dropped once this many are held.
pub const MAX_RECORDED_QUERIES: usize = 256;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub msg_id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub status: String,
    pub opens_count: u32,
    pub clicks_count: u32,
    pub last_event_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub event_name: String,
    pub processed: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageDetails {
    #[serde(flatten)]
    pub message: Message,
    pub categories: Vec<String>,
    pub events: Vec<Event>,
}

#[derive(Serialize, Deserialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ContactList {
    pub result: Vec<Contact>,
    pub contact_count: u64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct ContactSearch {
    pub query: String,
}

/// In-memory data set plus the most recent filter strings received.
#[derive(Default)]
pub struct Store {
    pub messages: Vec<MessageDetails>,
    pub contacts: Vec<Contact>,
    queries: VecDeque<String>,
}

impl Store {
    fn record(&mut self, query: String) {
        if self.queries.len() == MAX_RECORDED_QUERIES {
            self.queries.pop_front();
        }
        self.queries.push_back(query);
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn seeded() -> Self {
        let store = Store {
            messages: seed_messages(),
            contacts: seed_contacts(),
            queries: VecDeque::new(),
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Last `MAX_RECORDED_QUERIES` filter strings, URL-decoded, in arrival order.
    pub async fn received_queries(&self) -> Vec<String> {
        self.store.read().await.queries.iter().cloned().collect()
    }
}

pub fn app() -> Router {
    app_with_state(AppState::seeded())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/v3/messages", get(search_messages))
        .route("/v3/messages/{msg_id}", get(get_message))
        .route("/v3/marketing/contacts/search", post(search_contacts))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::seeded()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    info!("mock server listening on {}", listener.local_addr()?);
    axum::serve(listener, app_with_state(state)).await
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {API_KEY}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn search_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<MessageList>, StatusCode> {
    authorize(&headers)?;
    let query = params.query.ok_or(StatusCode::BAD_REQUEST)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > 1000 {
        return Err(StatusCode::BAD_REQUEST);
    }
    debug!(%query, limit, "message search");

    let mut store = state.store.write().await;
    store.record(query);
    let messages = store
        .messages
        .iter()
        .take(limit)
        .map(|details| details.message.clone())
        .collect();
    Ok(Json(MessageList { messages }))
}

async fn get_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(msg_id): Path<String>,
) -> Result<Json<MessageDetails>, StatusCode> {
    authorize(&headers)?;
    let store = state.store.read().await;
    store
        .messages
        .iter()
        .find(|details| details.message.msg_id == msg_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn search_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ContactSearch>,
) -> Result<Json<ContactList>, StatusCode> {
    authorize(&headers)?;
    if input.query.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    debug!(query = %input.query, "contact search");

    let mut store = state.store.write().await;
    store.record(input.query);
    let result = store.contacts.clone();
    Ok(Json(ContactList {
        contact_count: result.len() as u64,
        result,
    }))
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn seed_messages() -> Vec<MessageDetails> {
    let sent = 1_714_564_800; // 2024-05-01T12:00:00Z
    vec![
        MessageDetails {
            message: Message {
                msg_id: "msg-delivered-1".to_string(),
                from_email: "news@example.com".to_string(),
                to_email: "ann@example.com".to_string(),
                subject: "May newsletter".to_string(),
                status: "delivered".to_string(),
                opens_count: 3,
                clicks_count: 1,
                last_event_time: at(sent + 3600),
            },
            categories: vec!["newsletter".to_string()],
            events: vec![
                Event {
                    event_name: "processed".to_string(),
                    processed: at(sent),
                },
                Event {
                    event_name: "delivered".to_string(),
                    processed: at(sent + 5),
                },
                Event {
                    event_name: "open".to_string(),
                    processed: at(sent + 3600),
                },
            ],
        },
        MessageDetails {
            message: Message {
                msg_id: "msg-bounced-2".to_string(),
                from_email: "news@example.com".to_string(),
                to_email: "bob@invalid.example".to_string(),
                subject: "May newsletter".to_string(),
                status: "not_delivered".to_string(),
                opens_count: 0,
                clicks_count: 0,
                last_event_time: at(sent + 10),
            },
            categories: vec!["newsletter".to_string()],
            events: vec![
                Event {
                    event_name: "processed".to_string(),
                    processed: at(sent),
                },
                Event {
                    event_name: "bounced".to_string(),
                    processed: at(sent + 10),
                },
            ],
        },
        MessageDetails {
            message: Message {
                msg_id: "msg-processing-3".to_string(),
                from_email: "billing@example.com".to_string(),
                to_email: "cid@example.com".to_string(),
                subject: "Your invoice".to_string(),
                status: "processed".to_string(),
                opens_count: 0,
                clicks_count: 0,
                last_event_time: at(sent + 20),
            },
            categories: Vec::new(),
            events: vec![Event {
                event_name: "processed".to_string(),
                processed: at(sent + 20),
            }],
        },
    ]
}

fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: Uuid::new_v4(),
            email: "ann@example.com".to_string(),
            first_name: Some("Ann".to_string()),
            last_name: Some("Lee".to_string()),
        },
        Contact {
            id: Uuid::new_v4(),
            email: "cid@example.com".to_string(),
            first_name: None,
            last_name: None,
        },
    ]
}
