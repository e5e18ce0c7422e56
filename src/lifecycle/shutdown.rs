//! Shutdown coordination and the serve/drain state machine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, watch};

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` sees the shutdown signal (or its sender is gone).
pub async fn wait_for(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}

/// Where the process is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Starting,
    Serving,
    Draining,
    Stopped,
}

/// Source of the drain deadline timer.
pub trait DrainClock: Send + Sync {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

/// Real timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl DrainClock for TokioClock {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("in-flight requests did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Drives a server through `Serving → Draining → Stopped`.
#[derive(Clone)]
pub struct Lifecycle {
    phase: Arc<watch::Sender<LifecyclePhase>>,
    shutdown: Shutdown,
    drain_timeout: Duration,
    clock: Arc<dyn DrainClock>,
}

impl Lifecycle {
    pub fn new(drain_timeout: Duration) -> Self {
        Self::with_clock(drain_timeout, Arc::new(TokioClock))
    }

    pub fn with_clock(drain_timeout: Duration, clock: Arc<dyn DrainClock>) -> Self {
        let (phase, _) = watch::channel(LifecyclePhase::Starting);
        Self {
            phase: Arc::new(phase),
            shutdown: Shutdown::new(),
            drain_timeout,
            clock,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<LifecyclePhase> {
        self.phase.subscribe()
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn drain_timeout(&self) -> Duration {
        self.drain_timeout
    }

    fn enter(&self, phase: LifecyclePhase) {
        self.phase.send_replace(phase);
        tracing::debug!(phase = ?phase, "Lifecycle phase");
    }

    /// Run `server` until `signal` fires, then drain it within the deadline.
    ///
    /// `server` must stop accepting and finish in-flight work once
    /// [`Shutdown`] is triggered. If it has not completed when the deadline
    /// passes, it is dropped and `DeadlineExceeded` is returned.
    pub async fn drive<S, F>(&self, server: S, signal: F) -> Result<(), ShutdownError>
    where
        S: Future<Output = std::io::Result<()>>,
        F: Future<Output = ()>,
    {
        tokio::pin!(server);
        tokio::pin!(signal);

        self.enter(LifecyclePhase::Serving);
        tokio::select! {
            result = &mut server => {
                self.enter(LifecyclePhase::Stopped);
                return result.map_err(ShutdownError::from);
            }
            _ = &mut signal => {}
        }

        self.enter(LifecyclePhase::Draining);
        tracing::info!(deadline = ?self.drain_timeout, "Draining in-flight requests");
        self.shutdown.trigger();

        let deadline = self.clock.sleep(self.drain_timeout);
        let result = tokio::select! {
            result = &mut server => result.map_err(ShutdownError::from),
            _ = deadline => Err(ShutdownError::DeadlineExceeded(self.drain_timeout)),
        };

        self.enter(LifecyclePhase::Stopped);
        result
    }
}
