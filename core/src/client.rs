//! Stateless request builder and response parser for the search endpoints.
//!
//! # Design
//! `MailClient` holds only the base URL and the API key and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that renders the filter and produces an `HttpRequest`, and a
//! `parse_*` method that consumes an `HttpResponse`. The caller executes the
//! HTTP round-trip in between.

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::search::{ContactsFilterField, EmailActivitiesFilterField, Predicate};
use crate::types::{
    ContactSearchRequest, ContactSearchResult, EmailMessageActivity, MessageDetails,
    MessageSearchResponse,
};

/// Largest page the email-activity search accepts.
pub const MAX_SEARCH_LIMIT: u32 = 1000;

/// Synchronous, stateless client for the provider's search API.
#[derive(Debug, Clone)]
pub struct MailClient {
    base_url: String,
    api_key: String,
}

impl MailClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /v3/messages?limit=N&query=...` with the rendered filter
    /// URL-encoded into `query`.
    pub fn build_search_messages(
        &self,
        filter: &Predicate<EmailActivitiesFilterField>,
        limit: u32,
    ) -> Result<HttpRequest, ApiError> {
        if limit == 0 || limit > MAX_SEARCH_LIMIT {
            return Err(ApiError::InvalidArgument(format!(
                "limit must be between 1 and {MAX_SEARCH_LIMIT}, got {limit}"
            )));
        }
        let query = filter.render()?;
        debug!("searching email activity: {query}");
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}/v3/messages?limit={limit}&query={}",
                self.base_url,
                urlencoding::encode(&query)
            ),
            headers: self.headers(),
            body: None,
        })
    }

    pub fn build_get_message(&self, msg_id: &str) -> Result<HttpRequest, ApiError> {
        if msg_id.trim().is_empty() {
            return Err(ApiError::InvalidArgument("message id is empty".to_string()));
        }
        debug!("fetching message {msg_id}");
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/v3/messages/{}", self.base_url, urlencoding::encode(msg_id)),
            headers: self.headers(),
            body: None,
        })
    }

    /// `POST /v3/marketing/contacts/search` with the rendered filter as the
    /// JSON `query` field, not URL-encoded.
    pub fn build_search_contacts(
        &self,
        filter: &Predicate<ContactsFilterField>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = ContactSearchRequest {
            query: filter.render()?,
        };
        debug!("searching contacts: {}", payload.query);
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = self.headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/v3/marketing/contacts/search", self.base_url),
            headers,
            body: Some(body),
        })
    }

    pub fn parse_search_messages(&self, response: HttpResponse) -> Result<Vec<EmailMessageActivity>, ApiError> {
        check_status(&response, 200)?;
        let envelope: MessageSearchResponse = decode(&response)?;
        Ok(envelope.messages)
    }

    pub fn parse_get_message(&self, response: HttpResponse) -> Result<MessageDetails, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_search_contacts(&self, response: HttpResponse) -> Result<ContactSearchResult, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("accept".to_string(), "application/json".to_string()),
        ]
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    warn!("unexpected HTTP status {} (expected {expected})", response.status);
    match response.status {
        401 | 403 => Err(ApiError::Unauthorized {
            status: response.status,
        }),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
