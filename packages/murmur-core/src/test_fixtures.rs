//! Shared test doubles for service tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::audio::AudioResource;
use crate::events::{EventEmitter, FeedEvent, PlaybackEvent};
use crate::model::{Message, Page};
use crate::transport::{FetchError, FetchResult, PageFetcher};

/// Builds a message with a deterministic user and audio ref.
pub(crate) fn message(id: &str, created_at: u64) -> Message {
    Message {
        id: id.to_string(),
        user_id: format!("user-{}", id),
        created_at,
        audio_ref: format!("https://cdn.example/uploads/{}.ogg", id),
    }
}

/// Audio resource that records every command it receives.
pub(crate) struct RecordingAudioResource {
    commands: Mutex<Vec<String>>,
    pub released: AtomicBool,
    pub release_count: AtomicUsize,
}

impl RecordingAudioResource {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            released: AtomicBool::new(false),
            release_count: AtomicUsize::new(0),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }
}

impl AudioResource for RecordingAudioResource {
    fn load(&self, uri: &str) {
        self.commands.lock().push(format!("load {}", uri));
    }

    fn play(&self) {
        self.commands.lock().push("play".to_string());
    }

    fn pause(&self) {
        self.commands.lock().push("pause".to_string());
    }

    fn stop(&self) {
        self.commands.lock().push("stop".to_string());
    }

    fn seek_to(&self, position_ms: u64) {
        self.commands.lock().push(format!("seek {}", position_ms));
    }

    fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
        self.release_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Emitter that counts events and records the interesting ones.
pub(crate) struct CountingEmitter {
    pub feed_count: AtomicUsize,
    pub playback_count: AtomicUsize,
    autoplayed: Mutex<Vec<String>>,
    load_failures: Mutex<Vec<String>>,
}

impl CountingEmitter {
    pub fn new() -> Self {
        Self {
            feed_count: AtomicUsize::new(0),
            playback_count: AtomicUsize::new(0),
            autoplayed: Mutex::new(Vec::new()),
            load_failures: Mutex::new(Vec::new()),
        }
    }

    /// Message ids autoplay was dispatched for, in order.
    pub fn autoplayed(&self) -> Vec<String> {
        self.autoplayed.lock().clone()
    }

    /// Message ids whose load failed, in order.
    pub fn load_failures(&self) -> Vec<String> {
        self.load_failures.lock().clone()
    }
}

impl EventEmitter for CountingEmitter {
    fn emit_feed(&self, event: FeedEvent) {
        self.feed_count.fetch_add(1, Ordering::SeqCst);
        if let FeedEvent::AutoplayTriggered { message_id, .. } = event {
            self.autoplayed.lock().push(message_id);
        }
    }

    fn emit_playback(&self, event: PlaybackEvent) {
        self.playback_count.fetch_add(1, Ordering::SeqCst);
        if let PlaybackEvent::LoadFailed { message_id, .. } = event {
            self.load_failures.lock().push(message_id);
        }
    }
}

/// Page fetcher that serves a pre-scripted sequence of pages.
///
/// Ignores the cursor argument; each call pops the next page. Once the
/// script runs out it serves empty terminal pages.
pub(crate) struct StaticPageFetcher {
    pages: Mutex<VecDeque<Page>>,
    fail_next: AtomicBool,
}

impl StaticPageFetcher {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Makes the next fetch fail with a transport error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch_page(&self, _cursor: Option<String>, _limit: usize) -> FetchResult<Page> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(FetchError::Transport("scripted failure".to_string()));
        }
        Ok(self.pages.lock().pop_front().unwrap_or(Page {
            edges: vec![],
            end_cursor: None,
            has_next_page: false,
        }))
    }
}
