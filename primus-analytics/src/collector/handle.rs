//! Late-bound collector slot

use std::fmt;
use std::sync::{Arc, RwLock};

use super::payload::Hit;

/// Something that accepts analytics hits
///
/// Calls are fire-and-forget: nothing is returned and the tracker never
/// waits on the collector. Closures taking a [`Hit`] implement this trait.
pub trait Collector: Send + Sync {
    fn call(&self, hit: Hit<'_>);
}

impl<F> Collector for F
where
    F: Fn(Hit<'_>) + Send + Sync,
{
    fn call(&self, hit: Hit<'_>) {
        self(hit)
    }
}

/// Shared, possibly empty reference to the host collector
///
/// Clones share the same slot, so a collector installed through any clone is
/// seen by every tracker holding the handle.
#[derive(Clone, Default)]
pub struct CollectorHandle {
    slot: Arc<RwLock<Option<Arc<dyn Collector>>>>,
}

impl CollectorHandle {
    /// Create an empty handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle with a collector already installed
    pub fn with<C: Collector + 'static>(collector: C) -> Self {
        let handle = Self::new();
        handle.install(collector);
        handle
    }

    /// Install or replace the collector
    pub fn install<C: Collector + 'static>(&self, collector: C) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(Arc::new(collector));
    }

    /// Remove the collector, turning every later call into a no-op
    pub fn clear(&self) {
        let mut slot = match self.slot.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = None;
    }

    /// Check whether a collector is currently installed
    pub fn is_available(&self) -> bool {
        self.current().is_some()
    }

    /// Resolve the collector for a single call
    ///
    /// The lock is released before the collector runs.
    pub fn current(&self) -> Option<Arc<dyn Collector>> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

impl fmt::Debug for CollectorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorHandle")
            .field("available", &self.is_available())
            .finish()
    }
}
