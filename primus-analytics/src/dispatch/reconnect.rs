//! Reconnect burst de-duplication
//!
//! Primus has no "reconnect started" event, only "reconnect scheduled", which
//! fires before every attempt. The first one after a successful open marks
//! the start of a burst. Later ones in the same burst are skipped until the
//! connection opens again.

use std::cell::Cell;

use crate::tracker::Verdict;

/// Per-client reconnect state
#[derive(Debug, Default)]
pub struct ReconnectGuard {
    in_flight: Cell<bool>,
}

impl ReconnectGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection opened, the next scheduled reconnect starts a new burst
    pub fn opened(&self) {
        self.in_flight.set(false);
    }

    /// A reconnect attempt was scheduled
    ///
    /// Only the first call of a burst records.
    pub fn scheduled(&self) -> Verdict {
        if self.in_flight.replace(true) {
            Verdict::Skip
        } else {
            Verdict::Record(None)
        }
    }

    /// Whether a reconnect burst is in progress
    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }
}
