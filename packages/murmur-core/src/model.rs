//! Core data types for the message feed.
//!
//! These are the wire-facing shapes shared with the query and subscription
//! collaborators: [`Message`], the paginated [`Page`] envelope, and the
//! process-wide [`AutoplayConfig`].

use serde::{Deserialize, Serialize};

/// A single voice message in the feed.
///
/// Identity is carried by `id`, which is opaque, globally unique, and stable
/// across pagination and live delivery. Two deliveries of the same `id` are
/// the same message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Opaque, globally unique message identifier.
    pub id: String,
    /// Identifier of the authoring user.
    pub user_id: String,
    /// Author-asserted send time, Unix milliseconds.
    pub created_at: u64,
    /// URI of the raw audio resource for this message.
    pub audio_ref: String,
}

/// One fetched page of messages.
///
/// `edges` are kept in the exact order the query returned them; the merge
/// appends, it never re-sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Messages in query-defined order.
    pub edges: Vec<Message>,
    /// Continuation token for the next fetch, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
    /// Whether more pages exist past `end_cursor`.
    pub has_next_page: bool,
}

/// Which side of the anchor timestamp qualifies for autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayDirection {
    /// Autoplay disabled.
    #[default]
    None,
    /// Play the first message created strictly before the anchor.
    Existing,
    /// Play the first message created strictly after the anchor.
    Incoming,
}

/// Process-wide autoplay configuration.
///
/// Externally supplied and externally mutable; every change must be pushed
/// to the coordinator via `set_autoplay` so the decision is re-evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoplayConfig {
    /// Scan direction relative to `anchor_timestamp`.
    pub direction: AutoplayDirection,
    /// Boundary moment for the comparison, Unix milliseconds.
    pub anchor_timestamp: u64,
    /// Intended playback bound in milliseconds, passed through to the
    /// player. The decision logic ignores it.
    pub duration_ms: u64,
}
