//! # Autosave
//!
//! Trailing-edge debounce over edit-buffer changes. Every edit that leaves the
//! buffers diverged from the committed note (re)arms a deadline one quiescence
//! window ahead; an edit that brings them back in line cancels it. When the
//! owner polls past the deadline the controller fires once and disarms.
//!
//! There is no maximum wait: uninterrupted typing keeps pushing the deadline
//! out. The controller has no clock of its own. Callers pass `Instant`s in,
//! which keeps it single-threaded and deterministic under test.
//!
//! Each arm hands out an [`AutosaveToken`]. Re-arming or cancelling makes older
//! tokens stale, so a holder can tell whether its countdown is still the live one.

use std::time::{Duration, Instant};

/// Idle time after the last edit before a pending save commits.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveToken(u64);

#[derive(Debug)]
pub struct Autosave {
    window: Duration,
    generation: u64,
    pending: Option<(AutosaveToken, Instant)>,
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}

impl Autosave {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// React to a buffer edit made at `now`.
    pub fn observe(&mut self, now: Instant, diverged: bool) -> Option<AutosaveToken> {
        if diverged {
            Some(self.arm(now))
        } else {
            self.cancel();
            None
        }
    }

    /// Start a fresh countdown, superseding any pending one.
    pub fn arm(&mut self, now: Instant) -> AutosaveToken {
        self.generation += 1;
        let token = AutosaveToken(self.generation);
        let deadline = now + self.window;
        self.pending = Some((token, deadline));
        tracing::debug!(generation = self.generation, "autosave armed");
        token
    }

    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
            tracing::debug!("autosave cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    pub fn is_current(&self, token: AutosaveToken) -> bool {
        self.pending.is_some_and(|(live, _)| live == token)
    }

    /// True exactly once when `now` reaches the pending deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some((_, deadline)) if now >= deadline => {
                self.pending = None;
                tracing::debug!(generation = self.generation, "autosave fired");
                true
            }
            _ => false,
        }
    }
}
