//! Feed orchestration service.
//!
//! Responsibilities:
//! - Fetch pages and merge them into the message store
//! - Ingest live-pushed messages from the subscription channel
//! - Re-run the autoplay decision after every store or config mutation
//! - Dispatch at most one `play` per newly selected message (exactly-once)
//! - Own the per-message playback controller registry
//!
//! The store is private to this service; every mutation goes through it and
//! is followed synchronously by an autoplay evaluation, before control
//! returns to the event that caused the mutation.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::audio::AudioResource;
use crate::error::{MurmurError, MurmurResult};
use crate::events::{EventEmitter, FeedEvent};
use crate::model::{AutoplayConfig, Message};
use crate::runtime::{TaskSpawner, TokioSpawner};
use crate::services::autoplay;
use crate::services::message_store::MessageStore;
use crate::services::playback_controller::{PlaybackController, PlaybackState};
use crate::state::Config;
use crate::transport::{decode_live_payload, PageFetcher};
use crate::utils::now_millis;

/// Orchestrates the message stream and its playback controllers.
pub struct FeedCoordinator {
    /// Paged query collaborator.
    fetcher: Arc<dyn PageFetcher>,
    /// The ordered message collection; owned exclusively by this service.
    store: RwLock<MessageStore>,
    /// Current autoplay configuration.
    autoplay: RwLock<AutoplayConfig>,
    /// Guard for exactly-once autoplay dispatch. A decision equal to this
    /// id is never re-dispatched; a `None` decision leaves it unchanged.
    last_autoplayed: Mutex<Option<String>>,
    /// Autoplay target whose controller was not mounted yet.
    pending_autoplay: Mutex<Option<String>>,
    /// Mounted playback controllers, one per rendered message.
    controllers: DashMap<String, Arc<PlaybackController>>,
    /// Event emitter for feed lifecycle events.
    emitter: Arc<dyn EventEmitter>,
    /// Cancelled on teardown; stops the subscription pump.
    cancel_token: CancellationToken,
    config: Config,
}

impl FeedCoordinator {
    /// Creates a new coordinator with an empty store.
    ///
    /// # Arguments
    /// * `fetcher` - Paged query collaborator
    /// * `autoplay` - Initial autoplay configuration
    /// * `emitter` - Event emitter for feed and playback events
    /// * `config` - Engine configuration (page size, exclusivity)
    /// * `cancel_token` - Token cancelled when the feed view closes
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        autoplay: AutoplayConfig,
        emitter: Arc<dyn EventEmitter>,
        config: Config,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            store: RwLock::new(MessageStore::new()),
            autoplay: RwLock::new(autoplay),
            last_autoplayed: Mutex::new(None),
            pending_autoplay: Mutex::new(None),
            controllers: DashMap::new(),
            emitter,
            cancel_token,
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Feed view
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot of the current message sequence, head to tail.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.store.read().messages().to_vec()
    }

    /// Whether a "load more" fetch can yield further history.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.store.read().has_next_page()
    }

    /// The current continuation cursor.
    #[must_use]
    pub fn end_cursor(&self) -> Option<String> {
        self.store.read().end_cursor().map(str::to_string)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetches one page past the current cursor and merges it.
    ///
    /// Returns the number of messages appended. A merge failure leaves the
    /// store untouched, so the operation is retryable as-is.
    pub async fn request_more(&self) -> MurmurResult<usize> {
        let cursor = self.end_cursor();
        let page = self
            .fetcher
            .fetch_page(cursor, self.config.page_limit)
            .await?;

        let (appended, has_next_page) = {
            let mut store = self.store.write();
            let appended = store.merge_page(page)?;
            (appended, store.has_next_page())
        };

        log::info!(
            "[FeedCoordinator] Merged page: {} appended, has_next_page={}",
            appended,
            has_next_page
        );
        self.emitter.emit_feed(FeedEvent::PageMerged {
            appended,
            has_next_page,
            timestamp: now_millis(),
        });

        self.evaluate_autoplay();
        Ok(appended)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live ingestion
    // ─────────────────────────────────────────────────────────────────────────

    /// Ingests one live-pushed message at the head of the feed.
    ///
    /// Duplicate deliveries are dropped silently and trigger no
    /// re-evaluation (the store did not change).
    pub fn ingest_live(&self, message: Message) {
        let message_id = message.id.clone();
        let inserted = self.store.write().ingest(message);
        if !inserted {
            return;
        }

        self.emitter.emit_feed(FeedEvent::MessageReceived {
            message_id,
            timestamp: now_millis(),
        });
        self.evaluate_autoplay();
    }

    /// Handles one raw subscription payload.
    ///
    /// Malformed payloads are dropped with a diagnostic; they must not
    /// break ingestion of subsequent items.
    pub fn handle_live_payload(&self, payload: &str) {
        match decode_live_payload(payload) {
            Ok(message) => self.ingest_live(message),
            Err(e) => {
                log::warn!("[FeedCoordinator] Dropping malformed live payload: {}", e);
            }
        }
    }

    /// Attaches the live subscription channel.
    ///
    /// Spawns a pump task that forwards each payload into
    /// [`handle_live_payload`](Self::handle_live_payload) until the stream
    /// ends or the coordinator is shut down. Reconnection is the transport
    /// layer's responsibility; a closed stream is not restarted here.
    pub fn attach_subscription<S>(self: &Arc<Self>, updates: S, spawner: &TokioSpawner)
    where
        S: Stream<Item = String> + Send + Unpin + 'static,
    {
        let coordinator = Arc::clone(self);
        let cancel = self.cancel_token.clone();
        spawner.spawn(async move {
            let mut updates = updates;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        log::debug!("[FeedCoordinator] Subscription pump cancelled");
                        break;
                    }
                    item = updates.next() => match item {
                        Some(payload) => coordinator.handle_live_payload(&payload),
                        None => {
                            log::info!("[FeedCoordinator] Live subscription closed");
                            break;
                        }
                    }
                }
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Autoplay
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the autoplay configuration and re-evaluates the decision.
    pub fn set_autoplay(&self, config: AutoplayConfig) {
        *self.autoplay.write() = config;
        self.evaluate_autoplay();
    }

    /// The current autoplay configuration.
    #[must_use]
    pub fn autoplay(&self) -> AutoplayConfig {
        self.autoplay.read().clone()
    }

    /// Re-runs the autoplay decision against the current store and config.
    ///
    /// Runs synchronously inside every mutation path. Dispatches a play
    /// command only when the decision names a message that differs from the
    /// last dispatched one; a `None` decision leaves the guard unchanged so
    /// list churn cannot replay an already-played candidate.
    fn evaluate_autoplay(&self) {
        let decision = {
            let store = self.store.read();
            let config = self.autoplay.read();
            autoplay::decide(store.messages(), &config)
        };

        let Some(message_id) = decision else {
            return;
        };

        {
            let mut last = self.last_autoplayed.lock();
            if last.as_deref() == Some(message_id.as_str()) {
                return;
            }
            *last = Some(message_id.clone());
        }

        log::info!("[FeedCoordinator] Autoplay selected {}", message_id);
        self.emitter.emit_feed(FeedEvent::AutoplayTriggered {
            message_id: message_id.clone(),
            timestamp: now_millis(),
        });

        let target = self
            .controllers
            .get(&message_id)
            .map(|entry| Arc::clone(entry.value()));
        match target {
            Some(controller) => {
                // Each decision supersedes any still-parked target, or a
                // stale mount would replay (and, when exclusive, stop) the
                // message this decision selected.
                *self.pending_autoplay.lock() = None;
                self.dispatch_play(&controller);
            }
            None => {
                // Player not rendered yet; dispatch happens on mount.
                *self.pending_autoplay.lock() = Some(message_id);
            }
        }
    }

    /// Stops competing playback (when exclusive) and starts the target.
    fn dispatch_play(&self, target: &Arc<PlaybackController>) {
        if self.config.exclusive_playback {
            for entry in self.controllers.iter() {
                let other = entry.value();
                if other.message_id() != target.message_id()
                    && other.state() == PlaybackState::Playing
                {
                    if let Err(e) = other.stop() {
                        log::warn!(
                            "[FeedCoordinator] Failed to stop {} before autoplay: {}",
                            other.message_id(),
                            e
                        );
                    }
                }
            }
        }
        let bound_ms = self.autoplay.read().duration_ms;
        target.request_autoplay(Some(bound_ms));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playback controller registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates (or returns) the playback controller for a rendered message.
    ///
    /// Controllers are created lazily on first render. If an autoplay
    /// decision already targets this message, the pending play is
    /// dispatched now.
    ///
    /// # Errors
    ///
    /// Returns [`MurmurError::MessageNotFound`] if the id is not in the
    /// store.
    pub fn mount_player(
        &self,
        message_id: &str,
        resource: Arc<dyn AudioResource>,
    ) -> MurmurResult<Arc<PlaybackController>> {
        let audio_ref = self
            .store
            .read()
            .get(message_id)
            .map(|m| m.audio_ref.clone())
            .ok_or_else(|| MurmurError::MessageNotFound(message_id.to_string()))?;

        let controller = self
            .controllers
            .entry(message_id.to_string())
            .or_insert_with(|| {
                Arc::new(PlaybackController::new(
                    message_id.to_string(),
                    audio_ref,
                    resource,
                    Arc::clone(&self.emitter),
                    self.cancel_token.child_token(),
                ))
            })
            .clone();

        let pending = {
            let mut pending = self.pending_autoplay.lock();
            if pending.as_deref() == Some(message_id) {
                pending.take()
            } else {
                None
            }
        };
        if pending.is_some() {
            self.dispatch_play(&controller);
        }

        Ok(controller)
    }

    /// Returns the mounted controller for a message, if any.
    #[must_use]
    pub fn controller(&self, message_id: &str) -> Option<Arc<PlaybackController>> {
        self.controllers
            .get(message_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Tears down the controller for a message whose view was removed.
    ///
    /// Cancels any in-flight load and releases the audio resource.
    pub fn unmount_player(&self, message_id: &str) {
        {
            let mut pending = self.pending_autoplay.lock();
            if pending.as_deref() == Some(message_id) {
                *pending = None;
            }
        }
        if let Some((_, controller)) = self.controllers.remove(message_id) {
            controller.shutdown();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Teardown
    // ─────────────────────────────────────────────────────────────────────────

    /// Shuts the coordinator down: stops the subscription pump and tears
    /// down every mounted controller.
    ///
    /// Returns the number of controllers shut down.
    pub fn shutdown(&self) -> usize {
        self.cancel_token.cancel();

        let ids: Vec<String> = self
            .controllers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for id in &ids {
            if let Some((_, controller)) = self.controllers.remove(id) {
                controller.shutdown();
            }
        }

        log::info!(
            "[FeedCoordinator] Shutdown complete, {} controller(s) released",
            ids.len()
        );
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use crate::audio::AudioResourceEvent;
    use crate::model::{AutoplayDirection, Page};
    use crate::test_fixtures::{
        message, CountingEmitter, RecordingAudioResource, StaticPageFetcher,
    };

    fn autoplay_config(direction: AutoplayDirection, anchor: u64) -> AutoplayConfig {
        AutoplayConfig {
            direction,
            anchor_timestamp: anchor,
            duration_ms: 0,
        }
    }

    fn coordinator_with_pages(
        pages: Vec<Page>,
        autoplay: AutoplayConfig,
    ) -> (Arc<FeedCoordinator>, Arc<CountingEmitter>) {
        let emitter = Arc::new(CountingEmitter::new());
        let coordinator = Arc::new(FeedCoordinator::new(
            Arc::new(StaticPageFetcher::new(pages)),
            autoplay,
            emitter.clone(),
            Config::default(),
            CancellationToken::new(),
        ));
        (coordinator, emitter)
    }

    fn page(edges: Vec<Message>, end_cursor: Option<&str>, has_next_page: bool) -> Page {
        Page {
            edges,
            end_cursor: end_cursor.map(str::to_string),
            has_next_page,
        }
    }

    #[tokio::test]
    async fn request_more_merges_and_reports() {
        let (coordinator, emitter) = coordinator_with_pages(
            vec![
                page(vec![message("a", 3_000), message("b", 2_000)], Some("c1"), true),
                page(vec![message("c", 1_000)], Some("c2"), false),
            ],
            autoplay_config(AutoplayDirection::None, 0),
        );

        assert_eq!(coordinator.request_more().await.unwrap(), 2);
        assert!(coordinator.has_next_page());
        assert_eq!(coordinator.end_cursor().as_deref(), Some("c1"));

        assert_eq!(coordinator.request_more().await.unwrap(), 1);
        assert!(!coordinator.has_next_page());

        let ids: Vec<String> = coordinator
            .messages()
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(emitter.feed_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn autoplay_dispatched_exactly_once_across_mutations() {
        // Feed is newest-first; anchor sits just past m2 so the decider
        // keeps answering m2 on every evaluation.
        let (coordinator, emitter) = coordinator_with_pages(
            vec![
                page(
                    vec![message("m3", 3_000), message("m2", 2_000)],
                    Some("c1"),
                    true,
                ),
                page(vec![message("m1", 1_000)], Some("c2"), false),
            ],
            autoplay_config(AutoplayDirection::Existing, 2_001),
        );

        coordinator.request_more().await.unwrap();
        assert_eq!(emitter.autoplayed(), vec!["m2"]);

        // Unrelated mutation, decision still m2: no second dispatch.
        coordinator.request_more().await.unwrap();
        assert_eq!(emitter.autoplayed(), vec!["m2"]);
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_and_leaves_pagination_retryable() {
        let fetcher = Arc::new(StaticPageFetcher::new(vec![page(
            vec![message("a", 1_000)],
            Some("c1"),
            false,
        )]));
        let coordinator = Arc::new(FeedCoordinator::new(
            fetcher.clone(),
            autoplay_config(AutoplayDirection::None, 0),
            Arc::new(CountingEmitter::new()),
            Config::default(),
            CancellationToken::new(),
        ));

        fetcher.fail_next();
        let err = coordinator.request_more().await.unwrap_err();
        assert!(matches!(err, MurmurError::Fetch(_)));
        assert!(coordinator.messages().is_empty());
        assert_eq!(coordinator.end_cursor(), None);

        // Same call again, no cursor drift: the retry lands the page.
        assert_eq!(coordinator.request_more().await.unwrap(), 1);
        assert_eq!(coordinator.end_cursor().as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn autoplay_none_decision_keeps_guard_unchanged() {
        let (coordinator, emitter) = coordinator_with_pages(
            vec![page(vec![message("m2", 2_000)], None, false)],
            autoplay_config(AutoplayDirection::Existing, 2_001),
        );

        coordinator.request_more().await.unwrap();
        assert_eq!(emitter.autoplayed(), vec!["m2"]);

        // Direction none: decision becomes None, guard untouched.
        coordinator.set_autoplay(autoplay_config(AutoplayDirection::None, 2_001));
        // Back to the original config: decision is m2 again, but the guard
        // still remembers it, so nothing replays.
        coordinator.set_autoplay(autoplay_config(AutoplayDirection::Existing, 2_001));
        assert_eq!(emitter.autoplayed(), vec!["m2"]);
    }

    #[tokio::test]
    async fn live_ingest_triggers_incoming_autoplay() {
        let (coordinator, emitter) = coordinator_with_pages(
            vec![],
            autoplay_config(AutoplayDirection::Incoming, 5_000),
        );

        coordinator.ingest_live(message("old", 4_000));
        assert!(emitter.autoplayed().is_empty());

        coordinator.ingest_live(message("fresh", 6_000));
        assert_eq!(emitter.autoplayed(), vec!["fresh"]);

        // Duplicate delivery: no store change, no re-evaluation.
        coordinator.ingest_live(message("fresh", 6_000));
        assert_eq!(emitter.autoplayed(), vec!["fresh"]);
        assert_eq!(coordinator.messages().len(), 2);
    }

    #[tokio::test]
    async fn pending_autoplay_dispatches_on_mount() {
        let (coordinator, emitter) = coordinator_with_pages(
            vec![],
            autoplay_config(AutoplayDirection::Incoming, 1_000),
        );

        coordinator.ingest_live(message("m9", 2_000));
        assert_eq!(emitter.autoplayed(), vec!["m9"]);

        let resource = Arc::new(RecordingAudioResource::new());
        let controller = coordinator.mount_player("m9", resource.clone()).unwrap();
        assert_eq!(controller.state(), PlaybackState::Loading);

        controller.handle_resource_event(AudioResourceEvent::Ready {
            duration_ms: 3_000,
        });
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[tokio::test]
    async fn superseded_pending_autoplay_does_not_fire_on_mount() {
        let (coordinator, emitter) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));
        coordinator.ingest_live(message("m1", 2_000));
        coordinator.ingest_live(message("m2", 3_000));

        let mounted = coordinator
            .mount_player("m2", Arc::new(RecordingAudioResource::new()))
            .unwrap();

        // m1 is selected while unmounted: parked for its mount.
        coordinator.set_autoplay(autoplay_config(AutoplayDirection::Existing, 2_500));
        assert_eq!(emitter.autoplayed(), vec!["m1"]);

        // The decision moves to the already-mounted m2, superseding m1.
        coordinator.set_autoplay(autoplay_config(AutoplayDirection::Incoming, 2_500));
        mounted.handle_resource_event(AudioResourceEvent::Ready { duration_ms: 10 });
        assert_eq!(mounted.state(), PlaybackState::Playing);

        // Mounting m1 now must not replay the superseded target, and must
        // not stop the message the current decision selected.
        let late = coordinator
            .mount_player("m1", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        assert_eq!(late.state(), PlaybackState::Unloaded);
        assert_eq!(mounted.state(), PlaybackState::Playing);
    }

    #[tokio::test]
    async fn unmount_discards_parked_autoplay_target() {
        let (coordinator, emitter) = coordinator_with_pages(
            vec![],
            autoplay_config(AutoplayDirection::Incoming, 1_000),
        );
        coordinator.ingest_live(message("m1", 2_000));
        assert_eq!(emitter.autoplayed(), vec!["m1"]);

        // View removed before its player ever mounted.
        coordinator.unmount_player("m1");

        let controller = coordinator
            .mount_player("m1", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        assert_eq!(controller.state(), PlaybackState::Unloaded);
    }

    #[tokio::test]
    async fn exclusive_playback_stops_competing_controller() {
        let (coordinator, _) = coordinator_with_pages(
            vec![],
            autoplay_config(AutoplayDirection::Incoming, 1_000),
        );

        coordinator.ingest_live(message("first", 2_000));
        let first = coordinator
            .mount_player("first", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        first.handle_resource_event(AudioResourceEvent::Ready { duration_ms: 10 });
        assert_eq!(first.state(), PlaybackState::Playing);

        // A newer arrival becomes the head and wins the incoming scan.
        coordinator.ingest_live(message("second", 3_000));
        let second = coordinator
            .mount_player("second", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        second.handle_resource_event(AudioResourceEvent::Ready { duration_ms: 10 });

        assert_eq!(second.state(), PlaybackState::Playing);
        assert_eq!(first.state(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn mount_player_rejects_unknown_message() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));

        let err = coordinator
            .mount_player("ghost", Arc::new(RecordingAudioResource::new()))
            .unwrap_err();
        assert!(matches!(err, MurmurError::MessageNotFound(_)));
    }

    #[tokio::test]
    async fn mount_player_is_idempotent_per_message() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));
        coordinator.ingest_live(message("m1", 1_000));

        let a = coordinator
            .mount_player("m1", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        let b = coordinator
            .mount_player("m1", Arc::new(RecordingAudioResource::new()))
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn malformed_live_payload_is_dropped() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));

        coordinator.handle_live_payload("not json");
        assert!(coordinator.messages().is_empty());

        // A good payload afterwards still lands.
        coordinator.handle_live_payload(
            r#"{"messageCreated":{"message":{
                "id":"ok","userId":"u1","createdAt":1000,
                "audioRef":"https://cdn.example/ok.ogg"}}}"#,
        );
        assert_eq!(coordinator.messages().len(), 1);
    }

    #[tokio::test]
    async fn subscription_pump_feeds_the_store_and_stops_on_shutdown() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));
        let (tx, rx) = tokio::sync::mpsc::channel::<String>(8);
        let spawner = TokioSpawner::current();

        coordinator.attach_subscription(
            tokio_stream::wrappers::ReceiverStream::new(rx),
            &spawner,
        );

        tx.send(
            r#"{"messageCreated":{"message":{
                "id":"live1","userId":"u1","createdAt":1000,
                "audioRef":"https://cdn.example/live1.ogg"}}}"#
                .to_string(),
        )
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(coordinator.messages().len(), 1);

        coordinator.shutdown();
        tx.send("{}".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        // Pump is gone; nothing else was ingested.
        assert_eq!(coordinator.messages().len(), 1);
    }

    #[tokio::test]
    async fn shutdown_releases_mounted_controllers() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));
        coordinator.ingest_live(message("m1", 1_000));

        let resource = Arc::new(RecordingAudioResource::new());
        coordinator.mount_player("m1", resource.clone()).unwrap();

        assert_eq!(coordinator.shutdown(), 1);
        assert!(resource.released.load(Ordering::SeqCst));
        assert!(coordinator.controller("m1").is_none());
    }

    #[tokio::test]
    async fn unmount_releases_only_that_controller() {
        let (coordinator, _) =
            coordinator_with_pages(vec![], autoplay_config(AutoplayDirection::None, 0));
        coordinator.ingest_live(message("m1", 1_000));
        coordinator.ingest_live(message("m2", 2_000));

        let r1 = Arc::new(RecordingAudioResource::new());
        let r2 = Arc::new(RecordingAudioResource::new());
        coordinator.mount_player("m1", r1.clone()).unwrap();
        coordinator.mount_player("m2", r2.clone()).unwrap();

        coordinator.unmount_player("m1");
        assert!(r1.released.load(Ordering::SeqCst));
        assert!(!r2.released.load(Ordering::SeqCst));
        assert!(coordinator.controller("m2").is_some());
    }
}
