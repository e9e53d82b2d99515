//! Per-message playback lifecycle service.
//!
//! Responsibilities:
//! - Drive one [`AudioResource`] through load/play/pause/stop commands
//! - Model the playback lifecycle as an explicit tagged state machine
//! - Reconcile the resource's asynchronous lifecycle events with that state
//! - Guarantee resource release and listener detachment on teardown
//!
//! One controller exists per rendered message, created lazily on first
//! render and shut down when the message's view is torn down.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::audio::{AudioResource, AudioResourceEvent};
use crate::events::{EventEmitter, PlaybackEvent};
use crate::utils::now_millis;

/// Playback lifecycle states.
///
/// `Error` is terminal until an explicit `load()`; every other state is
/// reachable again through the normal transport commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No load has been requested yet.
    #[default]
    Unloaded,
    /// The resource is fetching and decoding.
    Loading,
    /// Decoded and ready to play from the current position.
    Ready,
    /// Actively playing; the resource emits position updates.
    Playing,
    /// Paused at the current position.
    Paused,
    /// Stopped with position reset to zero; ready to be played again.
    Stopped,
    /// Fetch or decode failed; requires an explicit reload.
    Error,
}

/// Errors from playback commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The command is not valid in the controller's current state.
    #[error("cannot {operation} from {from:?}")]
    InvalidTransition {
        /// The rejected command.
        operation: &'static str,
        /// State the controller was in.
        from: PlaybackState,
    },
}

/// Convenient Result alias for playback commands.
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Mutable controller state, guarded by one mutex.
#[derive(Debug, Default)]
struct ControllerInner {
    state: PlaybackState,
    position_ms: u64,
    duration_ms: Option<u64>,
    /// Autoplay requested before the resource was ready.
    pending_play: bool,
    /// Stop playback once the reported position reaches this bound.
    /// Set only by autoplay dispatch; manual play clears it.
    autoplay_bound_ms: Option<u64>,
    released: bool,
}

/// Drives playback of a single message through its audio resource.
pub struct PlaybackController {
    message_id: String,
    /// Unique id binding this controller to its waveform view container.
    instance_id: String,
    audio_ref: String,
    resource: Arc<dyn AudioResource>,
    inner: Mutex<ControllerInner>,
    emitter: Arc<dyn EventEmitter>,
    /// Cancelled on teardown; late resource events are ignored once set.
    cancel_token: CancellationToken,
}

impl PlaybackController {
    /// Creates a controller for one message.
    ///
    /// # Arguments
    /// * `message_id` - Id of the message this controller plays
    /// * `audio_ref` - URI handed to the resource on `load()`
    /// * `resource` - The audio/waveform collaborator, exclusively owned
    /// * `emitter` - Event emitter for playback events
    /// * `cancel_token` - Scoped token, typically a child of the coordinator's
    pub fn new(
        message_id: String,
        audio_ref: String,
        resource: Arc<dyn AudioResource>,
        emitter: Arc<dyn EventEmitter>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            message_id,
            instance_id: format!("player--{}", Uuid::new_v4()),
            audio_ref,
            resource,
            inner: Mutex::new(ControllerInner::default()),
            emitter,
            cancel_token,
        }
    }

    /// Id of the message this controller belongs to.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Unique instance id for binding a waveform view container.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.inner.lock().state
    }

    /// Current playback position in milliseconds.
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        self.inner.lock().position_ms
    }

    /// Decoded duration in milliseconds, known once `Ready`.
    #[must_use]
    pub fn duration_ms(&self) -> Option<u64> {
        self.inner.lock().duration_ms
    }

    fn set_state(&self, inner: &mut ControllerInner, state: PlaybackState) {
        if inner.state == state {
            return;
        }
        log::debug!(
            "[PlaybackController] {} {:?} -> {:?}",
            self.message_id,
            inner.state,
            state
        );
        inner.state = state;
        self.emitter.emit_playback(PlaybackEvent::StateChanged {
            message_id: self.message_id.clone(),
            state,
            timestamp: now_millis(),
        });
    }

    /// Begins the asynchronous fetch and decode of the audio resource.
    ///
    /// Valid from `Unloaded`, and from `Error` as the explicit retry path.
    /// A no-op in every other state (already loading or loaded).
    pub fn load(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            PlaybackState::Unloaded | PlaybackState::Error => {
                self.set_state(&mut inner, PlaybackState::Loading);
                self.resource.load(&self.audio_ref);
            }
            _ => {
                log::debug!(
                    "[PlaybackController] load ignored for {} in {:?}",
                    self.message_id,
                    inner.state
                );
            }
        }
    }

    /// Starts or resumes playback.
    ///
    /// Valid from `Ready`, `Paused`, or `Stopped` (which restarts from
    /// position zero). Anything else is a usage error: the caller must
    /// `load()` first.
    pub fn play(&self) -> PlaybackResult<()> {
        let mut inner = self.inner.lock();
        inner.autoplay_bound_ms = None;
        self.start_playback(&mut inner, "play")
    }

    fn start_playback(
        &self,
        inner: &mut ControllerInner,
        operation: &'static str,
    ) -> PlaybackResult<()> {
        match inner.state {
            PlaybackState::Ready | PlaybackState::Paused => {
                self.resource.play();
                self.set_state(inner, PlaybackState::Playing);
                Ok(())
            }
            PlaybackState::Stopped => {
                inner.position_ms = 0;
                self.resource.play();
                self.set_state(inner, PlaybackState::Playing);
                Ok(())
            }
            from => Err(PlaybackError::InvalidTransition { operation, from }),
        }
    }

    /// Pauses playback, keeping the current position.
    pub fn pause(&self) -> PlaybackResult<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            PlaybackState::Playing => {
                self.resource.pause();
                self.set_state(&mut inner, PlaybackState::Paused);
                Ok(())
            }
            from => Err(PlaybackError::InvalidTransition {
                operation: "pause",
                from,
            }),
        }
    }

    /// Stops playback and resets the position to zero.
    pub fn stop(&self) -> PlaybackResult<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            PlaybackState::Playing | PlaybackState::Paused => {
                self.halt_playback(&mut inner);
                Ok(())
            }
            from => Err(PlaybackError::InvalidTransition {
                operation: "stop",
                from,
            }),
        }
    }

    fn halt_playback(&self, inner: &mut ControllerInner) {
        self.resource.stop();
        inner.position_ms = 0;
        inner.autoplay_bound_ms = None;
        self.set_state(inner, PlaybackState::Stopped);
    }

    /// Plays if not currently playing, pauses otherwise.
    pub fn toggle_playback(&self) -> PlaybackResult<()> {
        if self.state() == PlaybackState::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Autoplay entry point used by the coordinator.
    ///
    /// Unlike [`play`](Self::play) this is lenient about readiness: an
    /// unloaded resource is loaded first and playback starts on the `ready`
    /// event, mirroring a player that is mounted and told to play in the
    /// same feed update. `bound_ms` limits how far autoplay runs; manual
    /// transport commands clear it.
    pub fn request_autoplay(&self, bound_ms: Option<u64>) {
        let mut inner = self.inner.lock();
        inner.autoplay_bound_ms = bound_ms.filter(|&ms| ms > 0);
        match inner.state {
            PlaybackState::Unloaded => {
                inner.pending_play = true;
                self.set_state(&mut inner, PlaybackState::Loading);
                self.resource.load(&self.audio_ref);
            }
            PlaybackState::Loading => {
                inner.pending_play = true;
            }
            PlaybackState::Ready | PlaybackState::Paused | PlaybackState::Stopped => {
                // Infallible here: start_playback only rejects states we
                // have already excluded.
                let _ = self.start_playback(&mut inner, "autoplay");
            }
            PlaybackState::Playing => {}
            PlaybackState::Error => {
                log::debug!(
                    "[PlaybackController] Autoplay skipped for {} (load previously failed)",
                    self.message_id
                );
            }
        }
    }

    /// Applies one lifecycle event from the audio resource.
    ///
    /// Events arriving after teardown began are ignored; a cancelled load
    /// must not surface a late `ready` or `error`.
    pub fn handle_resource_event(&self, event: AudioResourceEvent) {
        if self.cancel_token.is_cancelled() {
            log::trace!(
                "[PlaybackController] Dropping resource event for {} after teardown",
                self.message_id
            );
            return;
        }

        let mut inner = self.inner.lock();
        match event {
            AudioResourceEvent::Ready { duration_ms } => {
                if inner.state == PlaybackState::Loading {
                    inner.duration_ms = Some(duration_ms);
                    self.set_state(&mut inner, PlaybackState::Ready);
                    if inner.pending_play {
                        inner.pending_play = false;
                        let _ = self.start_playback(&mut inner, "autoplay");
                    }
                }
            }
            AudioResourceEvent::Error { message } => {
                if inner.state == PlaybackState::Loading {
                    inner.pending_play = false;
                    self.set_state(&mut inner, PlaybackState::Error);
                    log::warn!(
                        "[PlaybackController] Load failed for {}: {}",
                        self.message_id,
                        message
                    );
                    self.emitter.emit_playback(PlaybackEvent::LoadFailed {
                        message_id: self.message_id.clone(),
                        error: message,
                        timestamp: now_millis(),
                    });
                }
            }
            AudioResourceEvent::Playing => {
                // Reconcile with a player that started on its own schedule.
                if matches!(
                    inner.state,
                    PlaybackState::Ready | PlaybackState::Paused | PlaybackState::Stopped
                ) {
                    self.set_state(&mut inner, PlaybackState::Playing);
                }
            }
            AudioResourceEvent::Paused => {
                if inner.state == PlaybackState::Playing {
                    self.set_state(&mut inner, PlaybackState::Paused);
                }
            }
            AudioResourceEvent::Position { position_ms } => {
                if inner.state == PlaybackState::Playing {
                    inner.position_ms = position_ms;
                    self.emitter.emit_playback(PlaybackEvent::PositionChanged {
                        message_id: self.message_id.clone(),
                        position_ms,
                        timestamp: now_millis(),
                    });
                    if let Some(bound) = inner.autoplay_bound_ms {
                        if position_ms >= bound {
                            log::debug!(
                                "[PlaybackController] Autoplay bound reached for {} ({} ms)",
                                self.message_id,
                                bound
                            );
                            self.halt_playback(&mut inner);
                        }
                    }
                }
            }
        }
    }

    /// Tears the controller down: cancels any in-flight load and releases
    /// the audio resource.
    ///
    /// Idempotent. Also runs from `Drop`, so release happens on every exit
    /// path.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        let mut inner = self.inner.lock();
        if inner.released {
            return;
        }
        inner.released = true;
        inner.pending_play = false;
        self.resource.release();
        log::debug!(
            "[PlaybackController] Released resource for {}",
            self.message_id
        );
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// Manual impl: `resource` and `emitter` are trait objects.
impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PlaybackController")
            .field("message_id", &self.message_id)
            .field("instance_id", &self.instance_id)
            .field("state", &inner.state)
            .field("position_ms", &inner.position_ms)
            .finish()
    }
}
