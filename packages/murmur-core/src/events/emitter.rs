//! Event emitter abstraction for decoupling services from transport.
//!
//! Services depend on the [`EventEmitter`] trait rather than concrete
//! broadcast channels, enabling testing and alternative transport
//! implementations.

use super::{FeedEvent, PlaybackEvent};

/// Trait for emitting domain events without knowledge of transport.
///
/// The coordinator and playback controllers use this trait to emit events,
/// decoupling them from how events reach the presentation layer
/// (broadcast channel, desktop frontend bridge, test doubles).
pub trait EventEmitter: Send + Sync {
    /// Emits a feed structure event.
    fn emit_feed(&self, event: FeedEvent);

    /// Emits a per-message playback event.
    fn emit_playback(&self, event: PlaybackEvent);
}

/// No-op emitter for headless embedding or testing.
///
/// Events are silently discarded.
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit_feed(&self, _event: FeedEvent) {
        // No-op
    }

    fn emit_playback(&self, _event: PlaybackEvent) {
        // No-op
    }
}

/// Logging emitter for debugging and development.
///
/// Logs all events at debug level.
pub struct LoggingEventEmitter;

impl EventEmitter for LoggingEventEmitter {
    fn emit_feed(&self, event: FeedEvent) {
        tracing::debug!(?event, "feed_event");
    }

    fn emit_playback(&self, event: PlaybackEvent) {
        tracing::debug!(?event, "playback_event");
    }
}
