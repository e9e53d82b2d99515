//! Autoplay decision logic.
//!
//! A pure function of the current ordered message sequence and the autoplay
//! configuration. No hidden state, no memoization - the same inputs always
//! produce the same answer, and the coordinator re-runs it from scratch
//! after every store or config mutation. Exactly-once dispatch is the
//! coordinator's job, not this module's.

use crate::model::{AutoplayConfig, AutoplayDirection, Message};

/// Computes which single message, if any, qualifies for automatic playback.
///
/// Scans `messages` head to tail:
/// - `Existing`: first message created strictly before the anchor.
/// - `Incoming`: first message created strictly after the anchor.
/// - `None`: never selects anything.
///
/// "First" is first by stream position, not by timestamp magnitude; a
/// message created exactly at the anchor never qualifies in either
/// direction.
#[must_use]
pub fn decide(messages: &[Message], config: &AutoplayConfig) -> Option<String> {
    let anchor = config.anchor_timestamp;
    match config.direction {
        AutoplayDirection::None => None,
        AutoplayDirection::Existing => messages
            .iter()
            .find(|m| m.created_at < anchor)
            .map(|m| m.id.clone()),
        AutoplayDirection::Incoming => messages
            .iter()
            .find(|m| m.created_at > anchor)
            .map(|m| m.id.clone()),
    }
}
