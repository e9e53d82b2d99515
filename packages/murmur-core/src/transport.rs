//! Query and subscription collaborator boundary.
//!
//! The core consumes a paged message query and a push channel of
//! newly-created messages. Concrete transports (GraphQL over HTTP,
//! WebSocket, in-process test doubles) live on the host side; this module
//! defines the trait and the wire shape of live payloads.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Message, Page};

/// Errors from the page-fetch collaborator.
///
/// Retry/backoff is the transport's responsibility; the core surfaces these
/// to the presentation layer and leaves the pagination affordance retryable.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying transport failed (connection, timeout, server error).
    #[error("page fetch failed: {0}")]
    Transport(String),

    /// The response arrived but could not be decoded into a [`Page`].
    #[error("page decode failed: {0}")]
    Decode(String),
}

/// Convenient Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Paged message query collaborator.
///
/// The initial call passes `cursor = None`; subsequent calls pass the
/// `end_cursor` of the previously merged page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one page of up to `limit` messages starting after `cursor`.
    async fn fetch_page(&self, cursor: Option<String>, limit: usize) -> FetchResult<Page>;
}

/// Envelope shape of a live "message created" push payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveEnvelope {
    message_created: MessageCreated,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    message: Message,
}

/// Decodes one raw subscription payload into a [`Message`].
///
/// The subscription channel delivers JSON text; a payload that does not
/// match the expected envelope is a decode error, which the coordinator
/// drops with a diagnostic rather than crashing ingestion.
pub fn decode_live_payload(body: &str) -> FetchResult<Message> {
    serde_json::from_str::<LiveEnvelope>(body)
        .map(|envelope| envelope.message_created.message)
        .map_err(|e| FetchError::Decode(e.to_string()))
}
