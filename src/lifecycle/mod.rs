//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load words → Parse templates → Start watcher → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests (bounded) → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! Phases: `Starting → Serving → Draining → Stopped`. A drain that outlives
//! its deadline is an error and the process exits non-zero.

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{DrainClock, Lifecycle, LifecyclePhase, Shutdown, ShutdownError, TokioClock};
pub use signals::shutdown_signal;
pub use startup::{start, Running, StartupError};
