//! Event system for real-time host communication.
//!
//! This module provides:
//! - [`EventEmitter`] trait for domain services to emit events
//! - [`BroadcastEventBridge`] for fan-out to presentation subscribers
//! - Event types for the feed and playback domains
//!
//! The presentation layer renders reactively from these events instead of
//! polling coordinator state.

mod bridge;
mod emitter;

pub use bridge::BroadcastEventBridge;
pub use emitter::{EventEmitter, LoggingEventEmitter, NoopEventEmitter};

use serde::Serialize;

use crate::services::playback_controller::PlaybackState;

/// Events broadcast to presentation subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum BroadcastEvent {
    /// Events about the message sequence and autoplay decisions.
    Feed(FeedEvent),

    /// Events about an individual message's playback lifecycle.
    Playback(PlaybackEvent),
}

/// Events related to feed structure changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedEvent {
    /// A fetched page was merged into the store.
    PageMerged {
        /// Number of messages actually appended (after deduplication).
        appended: usize,
        /// Whether more pages exist.
        #[serde(rename = "hasNextPage")]
        has_next_page: bool,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// A live-pushed message was added at the head of the feed.
    MessageReceived {
        /// Id of the newly ingested message.
        #[serde(rename = "messageId")]
        message_id: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The coordinator selected a message for automatic playback.
    AutoplayTriggered {
        /// Id of the selected message.
        #[serde(rename = "messageId")]
        message_id: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

/// Events related to per-message playback.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// A controller transitioned to a new state.
    StateChanged {
        /// Id of the message the controller belongs to.
        #[serde(rename = "messageId")]
        message_id: String,
        /// The state entered.
        state: PlaybackState,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// Playback position advanced.
    PositionChanged {
        /// Id of the message the controller belongs to.
        #[serde(rename = "messageId")]
        message_id: String,
        /// Current position in milliseconds.
        #[serde(rename = "positionMs")]
        position_ms: u64,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The audio resource failed to fetch or decode.
    LoadFailed {
        /// Id of the message the controller belongs to.
        #[serde(rename = "messageId")]
        message_id: String,
        /// Human-readable failure description.
        error: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

impl From<FeedEvent> for BroadcastEvent {
    fn from(event: FeedEvent) -> Self {
        BroadcastEvent::Feed(event)
    }
}

impl From<PlaybackEvent> for BroadcastEvent {
    fn from(event: PlaybackEvent) -> Self {
        BroadcastEvent::Playback(event)
    }
}
