//! Application bootstrap and dependency wiring.
//!
//! This module contains the composition root - the single place where the
//! coordinator and its event transport are instantiated and wired
//! together. Hosts call [`bootstrap_services`] once per feed view and hold
//! the returned container for its lifetime.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::error::{MurmurError, MurmurResult};
use crate::events::{BroadcastEvent, BroadcastEventBridge, EventEmitter};
use crate::model::AutoplayConfig;
use crate::runtime::TokioSpawner;
use crate::services::FeedCoordinator;
use crate::state::Config;
use crate::transport::PageFetcher;

/// Container for all bootstrapped services.
#[derive(Clone)]
pub struct BootstrappedServices {
    /// Orchestrates the message stream and playback controllers.
    pub coordinator: Arc<FeedCoordinator>,
    /// Event bridge for emitting events to subscribers and optional
    /// external consumers.
    pub event_bridge: Arc<BroadcastEventBridge>,
    /// Broadcast channel sender for real-time events.
    pub broadcast_tx: broadcast::Sender<BroadcastEvent>,
    /// Task spawner for background operations.
    pub spawner: TokioSpawner,
    /// Cancellation token for graceful teardown.
    pub cancel_token: CancellationToken,
}

impl BootstrappedServices {
    /// Initiates graceful teardown of all services.
    ///
    /// Cancels background tasks and releases every mounted audio resource.
    pub fn shutdown(&self) {
        log::info!("[Bootstrap] Beginning graceful shutdown...");
        self.cancel_token.cancel();
        let released = self.coordinator.shutdown();
        log::info!("[Bootstrap] Shutdown complete ({} player(s))", released);
    }
}

/// Bootstraps the feed engine with its dependencies.
///
/// Wiring order matters - the broadcast bridge exists before the
/// coordinator so every coordinator event has a transport from the first
/// mutation on.
///
/// # Arguments
/// * `fetcher` - Paged query collaborator supplied by the host
/// * `autoplay` - Initial autoplay configuration
/// * `config` - Engine configuration
///
/// # Errors
///
/// Returns [`MurmurError::InvalidRequest`] if the configuration fails
/// validation.
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime context (the spawner needs
/// a runtime handle).
pub fn bootstrap_services(
    fetcher: Arc<dyn PageFetcher>,
    autoplay: AutoplayConfig,
    config: &Config,
) -> MurmurResult<BootstrappedServices> {
    config.validate().map_err(MurmurError::InvalidRequest)?;

    let spawner = TokioSpawner::current();

    let (broadcast_tx, _) = broadcast::channel::<BroadcastEvent>(config.event_channel_capacity);
    let event_bridge = Arc::new(BroadcastEventBridge::with_sender(broadcast_tx.clone()));

    let cancel_token = CancellationToken::new();

    let coordinator = Arc::new(FeedCoordinator::new(
        fetcher,
        autoplay,
        Arc::clone(&event_bridge) as Arc<dyn EventEmitter>,
        config.clone(),
        cancel_token.child_token(),
    ));

    Ok(BootstrappedServices {
        coordinator,
        event_bridge,
        broadcast_tx,
        spawner,
        cancel_token,
    })
}
