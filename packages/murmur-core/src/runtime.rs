//! Task spawning abstraction for runtime independence.
//!
//! The coordinator needs to run its live-subscription pump as a background
//! task, but the crate is embedded both in a desktop shell with its own
//! runtime and in a standalone Tokio server. [`TaskSpawner`] keeps the core
//! from depending on either directly.

use std::future::Future;

/// Abstraction for spawning background tasks.
///
/// Implementations should ensure tasks keep running even if the spawner
/// itself is dropped; cancellation is handled separately via the
/// coordinator's `CancellationToken`.
pub trait TaskSpawner: Send + Sync {
    /// Spawns a future as a background task.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Tokio-based spawner for standalone server and general use.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
}

impl TokioSpawner {
    /// Creates a new `TokioSpawner` with the given runtime handle.
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Creates a new `TokioSpawner` using the current runtime's handle.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    #[must_use]
    pub fn current() -> Self {
        Self {
            handle: tokio::runtime::Handle::current(),
        }
    }
}

impl TaskSpawner for TokioSpawner {
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(future);
    }
}
