//! Audio resource collaborator boundary.
//!
//! The core never decodes or renders audio itself. Each message's playback
//! controller drives an [`AudioResource`] - typically backed by a waveform
//! visualization library on the host side - through transport commands, and
//! the host feeds the resource's lifecycle notifications back to the
//! controller as [`AudioResourceEvent`]s.

/// Transport commands understood by an audio resource.
///
/// Implementations wrap a concrete player/visualizer instance. All commands
/// are fire-and-forget: outcomes come back asynchronously as
/// [`AudioResourceEvent`]s delivered to the owning controller.
pub trait AudioResource: Send + Sync {
    /// Begins fetching and decoding the audio at `uri`.
    ///
    /// Completion is signalled by a [`AudioResourceEvent::Ready`] or
    /// [`AudioResourceEvent::Error`] event.
    fn load(&self, uri: &str);

    /// Starts or resumes playback from the current position.
    fn play(&self);

    /// Pauses playback, keeping the current position.
    fn pause(&self);

    /// Stops playback and rewinds to position zero.
    fn stop(&self);

    /// Seeks to an absolute position in milliseconds.
    fn seek_to(&self, position_ms: u64);

    /// Releases the underlying player and detaches all of its listeners.
    ///
    /// Called exactly once during controller teardown, on every exit path.
    /// After `release` the resource must not emit further events.
    fn release(&self);
}

/// Lifecycle notifications emitted by an [`AudioResource`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioResourceEvent {
    /// Fetch and decode finished; the resource can be played.
    Ready {
        /// Total decoded duration in milliseconds.
        duration_ms: u64,
    },
    /// Playback actually started on the underlying player.
    Playing,
    /// Playback actually paused on the underlying player.
    Paused,
    /// Periodic playback position report. Only emitted while playing.
    Position {
        /// Current position in milliseconds.
        position_ms: u64,
    },
    /// Fetch or decode failed. Terminal until an explicit reload.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}
