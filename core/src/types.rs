//! DTOs for the email-activity and contact search endpoints.
//!
//! # Design
//! These types mirror the provider's JSON but are defined independently of
//! the mock server; the integration tests catch schema drift. Optional
//! fields default so that sparse responses still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use uuid::Uuid;

use crate::search::Value;

/// Delivery state of a message as reported by email activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageStatus {
    Processed,
    Delivered,
    NotDelivered,
}

/// Statuses are provider keywords and go into a filter unquoted.
impl From<MessageStatus> for Value {
    fn from(status: MessageStatus) -> Self {
        Value::trusted_keyword(status.as_ref())
    }
}

/// One row of an email-activity search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessageActivity {
    pub msg_id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub status: MessageStatus,
    #[serde(default)]
    pub opens_count: u32,
    #[serde(default)]
    pub clicks_count: u32,
    pub last_event_time: DateTime<Utc>,
}

/// Envelope of `GET /v3/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSearchResponse {
    pub messages: Vec<EmailMessageActivity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    Processed,
    Delivered,
    Deferred,
    Dropped,
    Bounced,
    Open,
    Click,
    SpamReport,
    Unsubscribe,
    GroupUnsubscribe,
    GroupResubscribe,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub event_name: EventName,
    pub processed: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mx_server: Option<String>,
}

/// Full record of `GET /v3/messages/{msg_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetails {
    pub msg_id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originating_ip: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub events: Vec<MessageEvent>,
}

/// Body of `POST /v3/marketing/contacts/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub list_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSearchResult {
    pub result: Vec<Contact>,
    pub contact_count: u64,
}
