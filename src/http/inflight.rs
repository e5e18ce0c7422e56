//! In-flight request tracking.
//!
//! # Responsibilities
//! - Count requests currently inside the handler stack
//! - Assign each request a sequence number for log correlation
//! - Report what is still running when draining starts

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global counter for request sequence numbers.
/// Relaxed ordering is enough: only uniqueness matters.
static REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-local request sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn next() -> Self {
        Self(REQUEST_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Tracks requests that have started but not yet produced a response.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicU64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request. The returned guard decrements on drop,
    /// including when the handler future is dropped mid-flight.
    pub fn track(&self) -> InFlightGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            active: Arc::clone(&self.active),
            seq: RequestSeq::next(),
        }
    }

    pub fn active(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }
}

/// Guard for one in-flight request.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicU64>,
    seq: RequestSeq,
}

impl InFlightGuard {
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
