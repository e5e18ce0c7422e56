//! The currently active template set.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::templates::set::{TemplateError, TemplateSet};

/// Shared handle to the active [`TemplateSet`].
///
/// Readers take an `Arc` snapshot and keep it for the whole request, so a
/// concurrent swap never changes what they render. Writers publish a complete
/// new set with a single pointer swap.
#[derive(Clone)]
pub struct TemplateStore {
    current: Arc<ArcSwap<TemplateSet>>,
}

impl TemplateStore {
    pub fn new(initial: TemplateSet) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Snapshot of the active set.
    pub fn current(&self) -> Arc<TemplateSet> {
        self.current.load_full()
    }

    /// Publish `set` as the active set.
    pub fn replace(&self, set: TemplateSet) {
        self.current.store(Arc::new(set));
    }

    /// Re-parse `dir` and publish the result.
    ///
    /// On failure the previous set stays active and the error is returned.
    pub fn reload_from(&self, dir: &Path) -> Result<(), TemplateError> {
        let set = TemplateSet::load(dir)?;
        self.replace(set);
        Ok(())
    }
}
