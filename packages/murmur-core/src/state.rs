//! Core configuration types.
//!
//! [`Config`] holds the tunables shared between the coordinator and the
//! event transport. Platform hosts construct one at startup and hand it to
//! `bootstrap_services`.

use serde::{Deserialize, Serialize};

/// Configuration for the Murmur feed engine.
///
/// All fields have sensible defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Number of messages requested per page fetch.
    pub page_limit: usize,

    /// Capacity of the event broadcast channel.
    pub event_channel_capacity: usize,

    /// Whether at most one message may be playing at a time.
    ///
    /// When enabled, the coordinator stops any currently playing controller
    /// before dispatching an autoplay `play` to another one.
    pub exclusive_playback: bool,
}

impl Config {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.page_limit == 0 {
            return Err("page_limit must be >= 1".to_string());
        }
        if self.event_channel_capacity == 0 {
            return Err(
                "event_channel_capacity must be >= 1 (broadcast::channel panics on 0)".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_limit: 20,
            event_channel_capacity: 100,
            exclusive_playback: true,
        }
    }
}
