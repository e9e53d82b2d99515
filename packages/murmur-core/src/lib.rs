//! Murmur Core - voice message feed engine.
//!
//! This crate provides the core functionality for a voice-message feed: a
//! paginated message stream merged with live pushed messages, an
//! exactly-once autoplay decision, and per-message playback lifecycle
//! management. It is designed to be embedded by a host shell (desktop app
//! or headless service) that supplies the transport and audio backends.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`runtime`]: Task spawning abstraction for async runtime independence
//! - [`events`]: Event system for real-time client communication
//! - [`model`]: Feed data model (messages, pages, autoplay configuration)
//! - [`state`]: Engine configuration
//! - [`transport`]: Page-fetch boundary and live payload decoding
//! - [`audio`]: Audio resource boundary for playback backends
//! - [`services`]: Feed coordination, message store, and playback control
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! The crate defines several traits to decouple core logic from
//! platform-specific implementations:
//!
//! - [`TaskSpawner`](runtime::TaskSpawner): Spawning background tasks
//! - [`EventEmitter`](events::EventEmitter): Emitting domain events
//! - [`PageFetcher`](transport::PageFetcher): Fetching message pages
//! - [`AudioResource`](audio::AudioResource): Driving a playback backend
//!
//! Hosts provide `PageFetcher` and `AudioResource` implementations; the
//! remaining traits have default implementations suitable for headless use.

#![warn(clippy::all)]

pub mod audio;
pub mod bootstrap;
pub mod error;
pub mod events;
pub mod model;
pub mod runtime;
pub mod services;
pub mod state;
pub mod transport;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export commonly used types at the crate root
pub use audio::{AudioResource, AudioResourceEvent};
pub use bootstrap::{bootstrap_services, BootstrappedServices};
pub use error::{ErrorCode, MurmurError, MurmurResult};
pub use events::{
    BroadcastEvent, BroadcastEventBridge, EventEmitter, FeedEvent, LoggingEventEmitter,
    NoopEventEmitter, PlaybackEvent,
};
pub use model::{AutoplayConfig, AutoplayDirection, Message, Page};
pub use runtime::{TaskSpawner, TokioSpawner};
pub use state::Config;
pub use utils::now_millis;

// Re-export service types
pub use services::{FeedCoordinator, MergeError, MessageStore, PlaybackController, PlaybackState};

// Re-export transport types
pub use transport::{decode_live_payload, FetchError, FetchResult, PageFetcher};
