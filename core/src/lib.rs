//! Typed search filters and a synchronous client core for the email
//! provider's search API.
//!
//! # Overview
//! The [`search`] module builds filter expressions (criteria, unique-arg
//! criteria and AND/OR groups) that render into the provider's query
//! grammar. [`MailClient`] places a rendered filter into an `HttpRequest`
//! and parses the matching `HttpResponse`, without touching the network
//! (host-does-IO pattern).
//!
//! # Design
//! - Field enums are per search domain, so a filter for one endpoint cannot
//!   be sent to another.
//! - Operand counts are validated when a criterion is built; the only
//!   render-time failure is an empty group.
//! - `MailClient` is stateless, it holds only the base URL and API key.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod search;
pub mod types;

pub use client::{MailClient, MAX_SEARCH_LIMIT};
pub use config::ClientConfig;
pub use error::{ApiError, FilterError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Contact, ContactSearchRequest, ContactSearchResult, EmailMessageActivity, EventName,
    MessageDetails, MessageEvent, MessageSearchResponse, MessageStatus,
};
