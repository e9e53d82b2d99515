//! Centralized error types for the Murmur core library.
//!
//! Per-module error enums (`MergeError`, `FetchError`, `PlaybackError`)
//! stay close to the code that produces them; this module provides the
//! app-wide [`MurmurError`] aggregate with machine-readable codes for
//! host-facing surfaces.

use serde::Serialize;
use thiserror::Error;

use crate::services::message_store::MergeError;
use crate::services::playback_controller::PlaybackError;
use crate::transport::FetchError;

/// Trait for error types that provide machine-readable error codes.
///
/// Implement this trait to provide consistent error codes across different
/// error conversion paths.
pub trait ErrorCode {
    /// Returns a machine-readable error code for host-facing responses.
    fn code(&self) -> &'static str;
}

impl ErrorCode for MergeError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingCursor => "page_missing_cursor",
        }
    }
}

impl ErrorCode for FetchError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch_transport_failed",
            Self::Decode(_) => "fetch_decode_failed",
        }
    }
}

impl ErrorCode for PlaybackError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "invalid_playback_transition",
        }
    }
}

/// Application-wide error type for the Murmur feed engine.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum MurmurError {
    /// A fetched page could not be merged into the store.
    #[error("Merge failed: {0}")]
    Merge(String),

    /// The page-fetch collaborator failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// A playback command was rejected.
    #[error("Playback error: {0}")]
    Playback(String),

    /// Referenced message id does not exist in the store.
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// Caller supplied an invalid request or configuration.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MurmurError {
    /// Returns a machine-readable error code for host-facing responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge_failed",
            Self::Fetch(_) => "fetch_failed",
            Self::Playback(_) => "playback_error",
            Self::MessageNotFound(_) => "message_not_found",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Convenient Result alias for application-wide operations.
pub type MurmurResult<T> = Result<T, MurmurError>;

impl From<MergeError> for MurmurError {
    fn from(err: MergeError) -> Self {
        Self::Merge(err.to_string())
    }
}

impl From<FetchError> for MurmurError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<PlaybackError> for MurmurError {
    fn from(err: PlaybackError) -> Self {
        Self::Playback(err.to_string())
    }
}
