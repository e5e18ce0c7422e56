//! Template subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     set.rs parses index.html, main.css, main.js → TemplateSet (fatal on error)
//!     → store.rs publishes it
//!
//! on change:
//!     watcher.rs (notify) → event channel
//!     → TemplateReloader (single task, one event at a time)
//!     → TemplateSet::load → atomic swap in TemplateStore
//!     (parse failure keeps the previous set)
//! ```

pub mod set;
pub mod store;
pub mod watcher;

pub use set::{TemplateError, TemplateSet, INDEX, SCRIPT, STYLESHEET, TEMPLATE_FILES};
pub use store::TemplateStore;
pub use watcher::{spawn_template_watch, TemplateEvent, TemplateReloader, TemplateWatcher, WatchHandle};
