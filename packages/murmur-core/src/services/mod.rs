//! Application services layer.
//!
//! This module contains the business logic services that orchestrate
//! between the host-facing surface and the collaborator boundaries
//! (transport/, audio).

pub mod autoplay;
pub mod feed_coordinator;
pub mod message_store;
pub mod playback_controller;

pub use feed_coordinator::FeedCoordinator;
pub use message_store::{MergeError, MessageStore};
pub use playback_controller::{PlaybackController, PlaybackError, PlaybackState};
